//! End-to-end execution driver.
//!
//! Walks the linear bootstrap sequence: instance, adapter, device, queue, one
//! command buffer, submission, drain, teardown. Each handle is released as soon
//! as the handle derived from it is ready; on abort, whatever was acquired is
//! released when it goes out of scope.

mod config;
mod error;
mod run;
mod stage;

pub use config::DriverConfig;
pub use error::{Abort, AbortReason, EXIT_FAILURE, EXIT_SUCCESS};
pub use run::{DriveReport, Driver};
pub use stage::Stage;
