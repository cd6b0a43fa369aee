//! Capability reporting.
//!
//! Read-only queries against an adapter or device whose only side effect is
//! log output. Safe on every backend variant.

mod features;
mod limits;
mod properties;

pub use features::{query_features, report_features};
pub use limits::report_limits;
pub use properties::{format_properties, report_properties};
