//! Ember engine crate.
//!
//! GPU bootstrap pieces: the native backend boundary, blocking adapter/device
//! acquisition over callback-driven requests, capability reporting, and the
//! execution driver that ties them together. The window runtime and logging
//! setup used by the probe binary live here too.

pub mod backend;
pub mod caps;
pub mod driver;
pub mod observers;
pub mod progress;
pub mod request;
pub mod window;

pub mod logging;
