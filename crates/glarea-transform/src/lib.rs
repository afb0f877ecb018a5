//! Interactive transform core for the GL area demo.
//!
//! Turns pointer drags, wheel steps and slider values into three rotation
//! angles and a uniform scale, and builds the model matrix the renderer
//! uploads every frame.
//!
//! Nothing here knows about windows or GPUs. The host feeds samples through
//! [`TransformInput`] and receives redraw / slider-sync notifications through
//! [`ViewHost`].
//!
//! ```rust,ignore
//! let mut ctl = TransformController::new();
//! ctl.on_button(ButtonEvent::pressed(PointerButton::Primary), &mut host);
//! ctl.on_motion(MotionSample::new(10.0, 10.0, HeldButtons::primary()), &mut host);
//! ctl.on_motion(MotionSample::new(15.0, 12.0, HeldButtons::primary()), &mut host);
//! let mvp = ctl.on_redraw();
//! ```

pub mod axis;
pub mod controller;
pub mod drag;
pub mod matrix;
pub mod state;

pub use axis::Axis;
pub use controller::{TransformController, TransformInput, ViewHost};
pub use drag::{
    ButtonEvent, ButtonState, DragDelta, DragPair, DragTracker, HeldButtons, MotionSample,
    PointerButton,
};
pub use matrix::{model_matrix, ModelMatrix};
pub use state::{normalize_degrees, ScrollDirection, TransformState};
