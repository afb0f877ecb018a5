//! GL area engine crate.
//!
//! Owns the platform + GPU runtime pieces the demo binary builds on: the
//! winit loop, the wgpu surface, platform-agnostic input and the two
//! renderers (transformed triangle, flat quads for controls).

pub mod device;
pub mod window;
pub mod input;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;
