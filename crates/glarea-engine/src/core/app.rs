use crate::input::InputEvent;

use super::ctx::{FrameCtx, InputCtx};

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by higher layers.
///
/// The runtime does not redraw on its own between input events; an app that
/// changed what it shows calls [`InputCtx::request_redraw`].
pub trait App {
    /// Called for each translated input event, after `ctx.input` reflects it.
    fn on_input(&mut self, ctx: &mut InputCtx<'_>, event: &InputEvent) -> AppControl {
        let _ = (ctx, event);
        AppControl::Continue
    }

    /// Called once per redraw of a window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;
}
