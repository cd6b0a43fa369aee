use crate::backend::{AdapterOptions, Backend};
use crate::progress::ProgressModel;

use super::pending::PendingRequest;

/// Requests an adapter and blocks until the backend answers.
///
/// Returns `None` when no adapter is available; the completion callback has
/// already logged why. Never panics.
pub fn acquire_adapter_blocking<B: Backend>(
    backend: &B,
    progress: &ProgressModel,
    instance: &B::Instance,
    options: &AdapterOptions,
) -> Option<B::Adapter> {
    let pending = PendingRequest::shared();

    backend.request_adapter(
        instance,
        options,
        PendingRequest::completion(&pending, "adapter"),
    );

    let suspensions = progress.wait_for(backend, || pending.borrow().is_complete());
    if suspensions > 0 {
        log::debug!("adapter request resolved after {suspensions} yields");
    }

    PendingRequest::into_result(pending)
}
