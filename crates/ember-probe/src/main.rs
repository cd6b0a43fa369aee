use std::process::ExitCode;

use anyhow::{Context, Result};
use ember_engine::backend::WgpuBackend;
use ember_engine::driver::{Driver, DriverConfig, EXIT_FAILURE};
use ember_engine::logging::{LoggingConfig, init_logging};
use ember_engine::window::{Runtime, RuntimeConfig};

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    println!();
    println!("  ember probe: instance -> adapter -> device -> queue -> submit");
    println!();

    match run() {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::from(EXIT_FAILURE)
        }
    }
}

fn run() -> Result<u8> {
    let config = RuntimeConfig {
        title: "Ember probe".to_string(),
        close_after_run: env_flag("EMBER_CLOSE_AFTER_RUN"),
        ..RuntimeConfig::default()
    };

    Runtime::run(config, probe_gpu).context("window toolkit failed")
}

/// Runs the bootstrap sequence on the `wgpu` backend.
fn probe_gpu() -> u8 {
    let backend = WgpuBackend;
    let config = DriverConfig::from_env();
    log::debug!("progress model: {}", config.progress);

    match Driver::new(&backend, config).run() {
        Ok(report) => {
            log::info!(
                "WebGPU initialized successfully ({} stages, {} progress calls)",
                report.trace.len(),
                report.progress_calls
            );
            report.exit_code()
        }
        // The driver already logged the diagnostic.
        Err(abort) => abort.exit_code(),
    }
}

fn env_flag(key: &str) -> bool {
    std::env::var(key).is_ok_and(|v| matches!(v.trim(), "1" | "true" | "yes"))
}
