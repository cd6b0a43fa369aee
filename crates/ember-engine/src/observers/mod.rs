//! Out-of-band device notifications.
//!
//! Device loss, uncaptured errors and queue completion are reported by the
//! backend outside the main call sequence, and only from inside a progress call.
//! Observers here log and never alter control flow.

mod observer;

pub use observer::{
    DeviceLostCallback, DeviceLostReason, ErrorKind, Observers, UncapturedErrorCallback,
    WorkDoneCallback, WorkDoneObserver, WorkDoneStatus, log_device_lost, log_uncaptured_error,
    log_work_done,
};
