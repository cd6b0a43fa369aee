use anyhow::{Context, Result};

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub size: LogicalSize<f64>,

    /// Exit as soon as the job has run instead of idling until the window is
    /// closed.
    pub close_after_run: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "ember".to_string(),
            size: LogicalSize::new(640.0, 480.0),
            close_after_run: false,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Creates the window, runs `job` once and returns its exit status.
    ///
    /// A non-zero status ends the loop immediately. Errors from the window
    /// toolkit are returned as `Err`.
    pub fn run<J>(config: RuntimeConfig, job: J) -> Result<u8>
    where
        J: FnOnce() -> u8,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, job);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        state.finish()
    }
}

struct AppState<J> {
    config: RuntimeConfig,
    job: Option<J>,
    window: Option<Window>,
    status: Option<u8>,
    error: Option<anyhow::Error>,
}

impl<J> AppState<J>
where
    J: FnOnce() -> u8,
{
    fn new(config: RuntimeConfig, job: J) -> Self {
        Self {
            config,
            job: Some(job),
            window: None,
            status: None,
            error: None,
        }
    }

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.size)
            .with_resizable(false);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        self.window = Some(window);
        Ok(())
    }

    fn run_job(&mut self) -> Option<u8> {
        let job = self.job.take()?;
        let status = job();
        self.status = Some(status);
        Some(status)
    }

    fn finish(self) -> Result<u8> {
        if let Some(e) = self.error {
            return Err(e);
        }
        self.status
            .context("event loop exited before the GPU job ran")
    }
}

impl<J> ApplicationHandler for AppState<J>
where
    J: FnOnce() -> u8,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        if let Err(e) = self.create_window(event_loop) {
            self.error = Some(e);
            event_loop.exit();
            return;
        }

        if let Some(status) = self.run_job() {
            if status != 0 || self.config.close_after_run {
                event_loop.exit();
                return;
            }
            log::info!("GPU work finished; close the window to exit");
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        // Nothing to render; sleep until the toolkit has events.
        event_loop.set_control_flow(ControlFlow::Wait);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let WindowEvent::CloseRequested = event {
            self.window = None;
            event_loop.exit();
        }
    }
}
