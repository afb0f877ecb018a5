//! Coordinate types shared by the runtime, renderers and the demo layout.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down

mod rect;
mod viewport;

pub use rect::Rect;
pub use viewport::Viewport;
