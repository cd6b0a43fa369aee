//! Blocking adapter/device acquisition.
//!
//! Each request allocates a `PendingRequest`, hands the backend a completion
//! callback bound to it, and waits according to the configured
//! `ProgressModel` until the callback has run.

mod adapter;
mod device;
mod pending;

pub use adapter::acquire_adapter_blocking;
pub use device::acquire_device_blocking;
