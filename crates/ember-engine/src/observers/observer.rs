use std::fmt;
use std::sync::Arc;

/// Why the backend tore a device down.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DeviceLostReason {
    Unknown,
    /// The device was destroyed by its owner (expected at teardown).
    Destroyed,
    InstanceDropped,
    FailedCreation,
}

/// Class of an error that was not captured by an error scope.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    Validation,
    OutOfMemory,
    Internal,
    Unknown,
}

/// Completion status of a submitted work batch.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum WorkDoneStatus {
    Success,
    InstanceDropped,
    Error,
}

/// Invoked whenever the backend loses the device.
pub type DeviceLostCallback = Arc<dyn Fn(DeviceLostReason, Option<&str>) + Send + Sync>;

/// Invoked for API misuse or validation failures not tied to a specific call.
pub type UncapturedErrorCallback = Arc<dyn Fn(ErrorKind, Option<&str>) + Send + Sync>;

/// One-shot completion handed to the backend per submission batch.
pub type WorkDoneCallback = Box<dyn FnOnce(WorkDoneStatus) + Send>;

/// Long-lived work-done observer; wrapped into a [`WorkDoneCallback`] per batch.
pub type WorkDoneObserver = Arc<dyn Fn(WorkDoneStatus) + Send + Sync>;

/// The observer set wired into a device for its lifetime.
#[derive(Clone)]
pub struct Observers {
    pub device_lost: DeviceLostCallback,
    pub uncaptured_error: UncapturedErrorCallback,
    pub work_done: WorkDoneObserver,
}

impl Observers {
    /// Builds the one-shot callback for a single submission batch.
    pub fn work_done_callback(&self) -> WorkDoneCallback {
        let observer = Arc::clone(&self.work_done);
        Box::new(move |status| observer(status))
    }
}

impl Default for Observers {
    fn default() -> Self {
        Self {
            device_lost: Arc::new(log_device_lost),
            uncaptured_error: Arc::new(log_uncaptured_error),
            work_done: Arc::new(log_work_done),
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers").finish_non_exhaustive()
    }
}

pub fn log_device_lost(reason: DeviceLostReason, message: Option<&str>) {
    let message = message.unwrap_or("no message");
    match reason {
        // Dropping the device at teardown reports this on some backends.
        DeviceLostReason::Destroyed => log::debug!("device destroyed: {message}"),
        _ => log::warn!("device lost ({reason:?}): {message}"),
    }
}

pub fn log_uncaptured_error(kind: ErrorKind, message: Option<&str>) {
    log::error!(
        "uncaptured device error ({kind:?}): {}",
        message.unwrap_or("no message")
    );
}

pub fn log_work_done(status: WorkDoneStatus) {
    log::info!("queued work finished with status {status:?}");
}
