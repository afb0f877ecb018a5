//! GL area demo: a triangle rotated by mouse drags and axis sliders, scaled
//! with the wheel.
//!
//! Left drag rotates around X and Y, right drag around Z, the wheel scales.
//! Escape quits.

mod app;
mod config;
mod controls;
mod layout;

use std::process::ExitCode;

use anyhow::{Context, Result};

use glarea_engine::logging::{init_logging, LoggingConfig};
use glarea_engine::window::Runtime;

use crate::app::GlAreaApp;
use crate::config::DemoConfig;

fn main() -> ExitCode {
    let config = match DemoConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            init_logging(LoggingConfig::default());
            log::error!("{err:#}");
            return ExitCode::FAILURE;
        }
    };
    init_logging(config.logging.clone());

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: DemoConfig) -> Result<()> {
    log::info!(
        "starting \"{}\" ({}x{})",
        config.runtime.title,
        config.runtime.initial_size.width,
        config.runtime.initial_size.height
    );

    let app = GlAreaApp::new(&config);
    Runtime::run(config.runtime, config.gpu, app).context("glarea demo failed")
}
