use crate::backend::{Backend, DeviceRequest, Source};
use crate::caps;
use crate::request::{acquire_adapter_blocking, acquire_device_blocking};

use super::{Abort, AbortReason, DriverConfig, EXIT_SUCCESS, Stage};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveReport {
    /// Every stage entered, starting at `Uninit`.
    pub trace: Vec<Stage>,
    /// Progress calls issued while draining.
    pub progress_calls: u32,
}

impl DriveReport {
    pub fn exit_code(&self) -> u8 {
        EXIT_SUCCESS
    }
}

/// Runs the bootstrap sequence once against a backend.
pub struct Driver<'b, B: Backend> {
    backend: &'b B,
    config: DriverConfig,
    stage: Stage,
    trace: Vec<Stage>,
}

impl<'b, B: Backend> Driver<'b, B> {
    pub fn new(backend: &'b B, config: DriverConfig) -> Self {
        Self {
            backend,
            config,
            stage: Stage::Uninit,
            trace: vec![Stage::Uninit],
        }
    }

    /// Runs the sequence to `Terminal`.
    ///
    /// Consumes the driver: the sequence runs once. Every early return drops the
    /// handles acquired so far, so an abort never leaks.
    pub fn run(mut self) -> Result<DriveReport, Abort> {
        let backend = self.backend;
        let progress = self.config.progress;

        let Some(instance) = backend.create_instance(&self.config.instance) else {
            return Err(self.abort(AbortReason::NoInstance));
        };
        self.enter(Stage::InstanceReady);

        let Some(adapter) =
            acquire_adapter_blocking(backend, &progress, &instance, &self.config.adapter)
        else {
            return Err(self.abort(AbortReason::NoAdapter));
        };
        self.enter(Stage::AdapterReady);
        drop(instance);

        caps::report_limits(backend, Source::Adapter(&adapter));
        caps::report_features(backend, Source::Adapter(&adapter));
        caps::report_properties(backend, &adapter);

        let request = DeviceRequest {
            label: self.config.device_label.clone(),
            default_queue_label: self.config.queue_label.clone(),
            required_features: self.config.required_features.clone(),
            required_limits: self.config.required_limits.clone(),
            on_device_lost: self.config.observers.device_lost.clone(),
        };
        let on_error = self.config.observers.uncaptured_error.clone();

        let Some(device) = acquire_device_blocking(backend, &progress, &adapter, &request, on_error)
        else {
            return Err(self.abort(AbortReason::NoDevice));
        };
        self.enter(Stage::DeviceReady);
        drop(adapter);

        caps::report_limits(backend, Source::Device(&device));
        caps::report_features(backend, Source::Device(&device));

        let queue = backend.queue(&device);
        backend.on_submitted_work_done(&queue, self.config.observers.work_done_callback());
        self.enter(Stage::QueueReady);

        let encoder = backend.create_command_encoder(&device, &self.config.encoder_label);
        let command_buffer = backend.finish(encoder);
        self.enter(Stage::Encoded);

        backend.submit(&queue, command_buffer);
        self.enter(Stage::Submitted);

        drop(queue);
        self.enter(Stage::Draining);

        let progress_calls = self.config.drain_iterations;
        for i in 0..progress_calls {
            log::debug!("advancing device ({}/{progress_calls}, {progress})", i + 1);
            progress.advance(backend, &device);
        }

        drop(device);
        self.enter(Stage::Released);
        self.enter(Stage::Terminal);

        Ok(DriveReport {
            trace: self.trace,
            progress_calls,
        })
    }

    fn enter(&mut self, stage: Stage) {
        debug_assert_eq!(self.stage.next(), Some(stage), "non-linear transition");

        log::debug!("{} -> {}", self.stage, stage);
        self.stage = stage;
        self.trace.push(stage);
    }

    fn abort(&self, reason: AbortReason) -> Abort {
        let abort = Abort {
            stage: self.stage,
            reason,
        };
        log::error!("{abort}");
        abort
    }
}
