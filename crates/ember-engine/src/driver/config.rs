use crate::backend::{AdapterOptions, InstanceConfig};
use crate::observers::Observers;
use crate::progress::ProgressModel;

/// Driver configuration.
///
/// Defaults describe the plain bootstrap: default backends and adapter
/// options, no required features, default limits, the platform's progress
/// model and five drain iterations.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub instance: InstanceConfig,
    pub adapter: AdapterOptions,

    pub device_label: String,
    pub queue_label: String,
    pub encoder_label: String,

    /// Features requested from the device.
    ///
    /// Favor an empty set for portability.
    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Selects wait and progress behavior for the backend in use.
    pub progress: ProgressModel,

    /// Progress calls issued after submission so that out-of-band callbacks
    /// get a chance to fire.
    pub drain_iterations: u32,

    pub observers: Observers,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            instance: InstanceConfig::default(),
            adapter: AdapterOptions::default(),
            device_label: "ember device".to_string(),
            queue_label: "ember default queue".to_string(),
            encoder_label: "ember command encoder".to_string(),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            progress: ProgressModel::default(),
            drain_iterations: 5,
            observers: Observers::default(),
        }
    }
}

impl DriverConfig {
    /// Defaults overridden by `EMBER_PROGRESS` and `EMBER_DRAIN_ITERATIONS`.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`. Invalid values are logged and ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = lookup("EMBER_PROGRESS") {
            match value.parse() {
                Ok(progress) => self.progress = progress,
                Err(e) => log::warn!("ignoring EMBER_PROGRESS: {e}"),
            }
        }

        if let Some(value) = lookup("EMBER_DRAIN_ITERATIONS") {
            match value.trim().parse() {
                Ok(n) => self.drain_iterations = n,
                Err(e) => log::warn!("ignoring EMBER_DRAIN_ITERATIONS={value:?}: {e}"),
            }
        }

        self
    }
}
