use anyhow::{bail, Result};

use glarea_engine::device::GpuInit;
use glarea_engine::logging::LoggingConfig;
use glarea_engine::paint::Color;
use glarea_engine::window::RuntimeConfig;

use crate::layout::LayoutMetrics;

/// Everything the demo needs to start, with the stock look as defaults.
#[derive(Debug, Clone)]
pub struct DemoConfig {
    pub runtime: RuntimeConfig,
    pub gpu: GpuInit,
    pub logging: LoggingConfig,
    pub layout: LayoutMetrics,

    /// Window background behind the drawing surface and sliders.
    pub clear_color: Color,

    /// Drawing surface background.
    pub area_color: Color,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            runtime: RuntimeConfig::default(),
            gpu: GpuInit::default(),
            logging: LoggingConfig::default(),
            layout: LayoutMetrics::default(),
            clear_color: Color::from_straight(0.93, 0.93, 0.92, 1.0),
            area_color: Color::BLACK,
        }
    }
}

impl DemoConfig {
    /// Defaults plus overrides from the process environment.
    ///
    /// - `GLAREA_BACKEND`: `gl`, `vulkan`, `metal`, `dx12` or `all`
    /// - `GLAREA_LOG`: log filter, takes precedence over `RUST_LOG`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(name) = std::env::var("GLAREA_BACKEND") {
            config.gpu.backends = parse_backends(&name)?;
        }
        config.logging.env_filter = std::env::var("GLAREA_LOG").ok();

        Ok(config)
    }
}

fn parse_backends(name: &str) -> Result<wgpu::Backends> {
    let backends = match name.trim().to_ascii_lowercase().as_str() {
        "" | "all" => wgpu::Backends::all(),
        "gl" | "gles" | "opengl" => wgpu::Backends::GL,
        "vulkan" | "vk" => wgpu::Backends::VULKAN,
        "metal" => wgpu::Backends::METAL,
        "dx12" | "d3d12" => wgpu::Backends::DX12,
        other => {
            bail!("unknown GLAREA_BACKEND {other:?} (expected gl, vulkan, metal, dx12 or all)")
        }
    };
    Ok(backends)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_window_matches_stock_demo() {
        let c = DemoConfig::default();
        assert_eq!(c.runtime.title, "OpenGL Area");
        assert_eq!(c.runtime.initial_size.width, 700.0);
        assert_eq!(c.runtime.initial_size.height, 800.0);
        assert_eq!(c.area_color, Color::BLACK);
    }

    #[test]
    fn backend_names_are_case_insensitive() {
        assert_eq!(parse_backends("GL").unwrap(), wgpu::Backends::GL);
        assert_eq!(parse_backends(" opengl ").unwrap(), wgpu::Backends::GL);
        assert_eq!(parse_backends("").unwrap(), wgpu::Backends::all());
    }

    #[test]
    fn unknown_backend_is_an_error() {
        let err = parse_backends("glide").unwrap_err();
        assert!(err.to_string().contains("glide"));
    }
}
