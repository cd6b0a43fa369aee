//! Logging utilities.
//!
//! This module centralizes logger initialization. Everything else in the engine
//! only talks to the `log` facade.

#[cfg(test)]
pub(crate) mod capture;
mod init;

pub use init::{DEFAULT_FILTER, LoggingConfig, init_logging};
