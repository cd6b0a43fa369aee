use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::backend::Backend;

/// Sleep length of one cooperative yield.
pub const DEFAULT_YIELD_INTERVAL: Duration = Duration::from_millis(100);

/// How the configured backend makes pending callbacks fire.
///
/// Selected once through configuration; bridges and the driver never branch on
/// backend identity themselves.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ProgressModel {
    /// Requests resolve before returning; queued callbacks are flushed by `tick`.
    EagerCallback,
    /// Requests resolve before returning; queued callbacks are flushed by `poll`.
    Polling,
    /// Requests may resolve later; the caller yields with bounded sleeps.
    ///
    /// Only useful with a backend whose `sleep` lets the host deliver callbacks.
    CooperativeYield { interval: Duration },
}

impl Default for ProgressModel {
    fn default() -> Self {
        Self::Polling
    }
}

impl ProgressModel {
    /// Whether waiting on a request may suspend the caller.
    pub fn suspends(&self) -> bool {
        matches!(self, Self::CooperativeYield { .. })
    }

    /// Blocks until `done` reports completion and returns the number of
    /// suspensions performed.
    ///
    /// Eager and polling backends complete inside the request call, so `done` is
    /// checked once. There is no timeout: a backend that never completes under
    /// the cooperative model hangs the caller.
    pub fn wait_for<B>(&self, backend: &B, mut done: impl FnMut() -> bool) -> u32
    where
        B: Backend + ?Sized,
    {
        match *self {
            Self::EagerCallback | Self::Polling => {
                if !done() {
                    log::warn!("request still pending after returning on a {self} backend");
                }
                0
            }
            Self::CooperativeYield { interval } => {
                let mut suspensions = 0;
                while !done() {
                    backend.sleep(interval);
                    suspensions += 1;
                }
                suspensions
            }
        }
    }

    /// Performs one progress-advancing call.
    pub fn advance<B>(&self, backend: &B, device: &B::Device)
    where
        B: Backend + ?Sized,
    {
        match *self {
            Self::EagerCallback => backend.tick(device),
            Self::Polling => backend.poll(device),
            Self::CooperativeYield { interval } => backend.sleep(interval),
        }
    }
}

impl fmt::Display for ProgressModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EagerCallback => f.write_str("tick"),
            Self::Polling => f.write_str("poll"),
            Self::CooperativeYield { interval } => write!(f, "yield:{}", interval.as_millis()),
        }
    }
}

/// Error returned when a progress model string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseProgressError {
    pub input: String,
}

impl fmt::Display for ParseProgressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown progress model {:?} (expected tick, poll, yield or yield:<ms>)",
            self.input
        )
    }
}

impl std::error::Error for ParseProgressError {}

impl FromStr for ProgressModel {
    type Err = ParseProgressError;

    /// Accepts `tick`/`eager`, `poll`, `yield` and `yield:<ms>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseProgressError { input: s.to_owned() };

        match s.trim().to_ascii_lowercase().as_str() {
            "tick" | "eager" => Ok(Self::EagerCallback),
            "poll" => Ok(Self::Polling),
            "yield" => Ok(Self::CooperativeYield {
                interval: DEFAULT_YIELD_INTERVAL,
            }),
            other => {
                let ms = other
                    .strip_prefix("yield:")
                    .and_then(|ms| ms.parse::<u64>().ok())
                    .filter(|ms| *ms > 0)
                    .ok_or_else(err)?;
                Ok(Self::CooperativeYield {
                    interval: Duration::from_millis(ms),
                })
            }
        }
    }
}
