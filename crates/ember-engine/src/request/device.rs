use crate::backend::{Backend, DeviceRequest};
use crate::observers::UncapturedErrorCallback;
use crate::progress::ProgressModel;

use super::pending::PendingRequest;

/// Requests a device and blocks until the backend answers.
///
/// `request` carries the device-loss observer. On success, `on_error` is
/// registered as the device's single uncaptured-error observer before the device
/// is returned.
pub fn acquire_device_blocking<B: Backend>(
    backend: &B,
    progress: &ProgressModel,
    adapter: &B::Adapter,
    request: &DeviceRequest,
    on_error: UncapturedErrorCallback,
) -> Option<B::Device> {
    let pending = PendingRequest::shared();

    backend.request_device(
        adapter,
        request,
        PendingRequest::completion(&pending, "device"),
    );

    let suspensions = progress.wait_for(backend, || pending.borrow().is_complete());
    if suspensions > 0 {
        log::debug!("device request resolved after {suspensions} yields");
    }

    let device = PendingRequest::into_result(pending)?;
    backend.set_uncaptured_error_callback(&device, on_error);
    Some(device)
}
