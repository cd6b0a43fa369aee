//! Window + idle loop.
//!
//! Owns the `winit` EventLoop and the single fixed-size window, runs one GPU
//! job after the window exists, then idles until the window is closed.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
