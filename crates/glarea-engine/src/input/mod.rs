//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! The runtime translates platform events into `InputEvent`s through
//! `platform::winit` before handing them to the app.

pub(crate) mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
};
