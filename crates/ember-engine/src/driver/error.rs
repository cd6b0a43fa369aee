use std::fmt;

use super::Stage;

/// Process exit status on success.
pub const EXIT_SUCCESS: u8 = 0;

/// Process exit status for every failure; there is no finer taxonomy.
pub const EXIT_FAILURE: u8 = 1;

/// Which acquisition came back empty.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AbortReason {
    NoInstance,
    NoAdapter,
    NoDevice,
}

/// A hard acquisition failure that ended the sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Abort {
    /// Last stage reached before the failure.
    pub stage: Stage,
    pub reason: AbortReason,
}

impl Abort {
    pub fn exit_code(&self) -> u8 {
        EXIT_FAILURE
    }
}

impl fmt::Display for Abort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.reason {
            AbortReason::NoInstance => "could not initialize WebGPU",
            AbortReason::NoAdapter => "could not get a WebGPU adapter",
            AbortReason::NoDevice => "could not get a WebGPU device",
        };
        write!(f, "{what} (aborted at {})", self.stage)
    }
}

impl std::error::Error for Abort {}
