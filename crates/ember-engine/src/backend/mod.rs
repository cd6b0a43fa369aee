//! Native GPU service boundary.
//!
//! This module is responsible for:
//! - the `Backend` trait: handle types plus the request, query, command and
//!   progress entry points the rest of the engine calls
//! - the `wgpu`-backed implementation
//!
//! Owning a handle value means owning the native object; dropping it is the
//! release call.

#[cfg(test)]
pub(crate) mod fake;
mod native;
mod types;

use std::time::Duration;

use crate::observers::{UncapturedErrorCallback, WorkDoneCallback};

pub use native::{WgpuBackend, WgpuDevice, WgpuQueue};
pub use types::{
    AdapterOptions, AdapterProperties, DeviceRequest, FeatureName, InstanceConfig, LimitsSignal,
    QueryStatus, RequestFailure, RequestStatus,
};

/// Completion of an adapter/device request.
///
/// Called at most once. Whether it runs before the request call returns
/// depends on the backend's execution model.
pub type RequestCallback<T> = Box<dyn FnOnce(Result<T, RequestFailure>)>;

/// Handle a capability query runs against.
pub enum Source<'a, B: Backend + ?Sized> {
    Adapter(&'a B::Adapter),
    Device(&'a B::Device),
}

impl<B: Backend + ?Sized> Source<'_, B> {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Adapter(_) => "adapter",
            Self::Device(_) => "device",
        }
    }
}

impl<B: Backend + ?Sized> Clone for Source<'_, B> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<B: Backend + ?Sized> Copy for Source<'_, B> {}

/// The native GPU service.
pub trait Backend {
    type Instance: 'static;
    type Adapter: 'static;
    type Device: 'static;
    type Queue: 'static;
    type CommandEncoder: 'static;
    type CommandBuffer: 'static;

    /// Returns `None` when the backend cannot be initialized at all.
    fn create_instance(&self, config: &InstanceConfig) -> Option<Self::Instance>;

    fn request_adapter(
        &self,
        instance: &Self::Instance,
        options: &AdapterOptions,
        callback: RequestCallback<Self::Adapter>,
    );

    /// Requests a device; `request.on_device_lost` must be attached to it.
    fn request_device(
        &self,
        adapter: &Self::Adapter,
        request: &DeviceRequest,
        callback: RequestCallback<Self::Device>,
    );

    fn set_uncaptured_error_callback(&self, device: &Self::Device, callback: UncapturedErrorCallback);

    fn limits(&self, source: Source<'_, Self>) -> (wgpu::Limits, LimitsSignal);

    /// Two-call enumeration: `None` returns the feature count, `Some(dest)`
    /// fills `dest` and returns how many entries were written.
    fn enumerate_features(
        &self,
        source: Source<'_, Self>,
        dest: Option<&mut [FeatureName]>,
    ) -> usize;

    fn adapter_properties(&self, adapter: &Self::Adapter) -> AdapterProperties;

    fn queue(&self, device: &Self::Device) -> Self::Queue;

    fn on_submitted_work_done(&self, queue: &Self::Queue, callback: WorkDoneCallback);

    fn create_command_encoder(&self, device: &Self::Device, label: &str) -> Self::CommandEncoder;

    /// Finalizes the encoder; the encoder is released here.
    fn finish(&self, encoder: Self::CommandEncoder) -> Self::CommandBuffer;

    /// Non-blocking; ownership of `buffer` moves to the backend.
    fn submit(&self, queue: &Self::Queue, buffer: Self::CommandBuffer);

    /// Flushes queued callbacks on eager-callback backends.
    fn tick(&self, device: &Self::Device);

    /// Non-blocking poll on polling backends.
    fn poll(&self, device: &Self::Device);

    /// Cooperative yield: gives the host a chance to deliver callbacks.
    fn sleep(&self, duration: Duration);
}
