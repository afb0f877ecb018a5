//! Core engine-facing contracts.
//!
//! Defines the interface between the runtime (platform loop) and the
//! application: the `App` trait and the contexts handed to its callbacks.
//! Runtime internals do not leak through these types.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, InputCtx, WindowCtx};
