//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers) and builds them
//! lazily on first use for the current surface format.
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - Renderers convert to physical pixels / NDC with the viewport and scale factor.

mod ctx;
mod pipeline;
pub mod quad;
pub mod triangle;

pub use ctx::{RenderCtx, RenderTarget};
pub use pipeline::PipelineState;
