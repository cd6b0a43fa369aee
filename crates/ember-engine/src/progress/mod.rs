//! Backend execution models.
//!
//! The only place that knows how a backend delivers callbacks: eagerly inside
//! the request, through a non-blocking poll, or while the caller yields.
//! Everything else asks this module to wait or to advance.

mod model;

pub use model::{DEFAULT_YIELD_INTERVAL, ParseProgressError, ProgressModel};
