use winit::window::{Window, WindowId};

use crate::coords::Viewport;
use crate::device::{Gpu, SurfaceErrorAction};
use crate::input::InputState;
use crate::paint::Color;
use crate::render::{RenderCtx, RenderTarget};
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// The window a callback is running for.
pub struct WindowCtx<'a> {
    pub id:     WindowId,
    pub window: &'a Window,
}

impl WindowCtx<'_> {
    /// Inner size in logical pixels.
    pub fn logical_size(&self) -> (f32, f32) {
        let size = self.window.inner_size().to_logical::<f64>(self.window.scale_factor());
        (size.width as f32, size.height as f32)
    }

    #[inline]
    pub fn scale_factor(&self) -> f32 {
        self.window.scale_factor() as f32
    }
}

/// Context for `App::on_input`.
pub struct InputCtx<'a> {
    pub window:  WindowCtx<'a>,
    /// Already includes the event being delivered.
    pub input:   &'a InputState,
    pub runtime: &'a mut RuntimeCtx,
}

impl InputCtx<'_> {
    /// Schedules a redraw of this window.
    ///
    /// Several requests before the next frame collapse into one redraw.
    pub fn request_redraw(&mut self) {
        self.runtime.request_redraw(self.window.id);
    }
}

/// Context for `App::on_frame`.
///
/// `'a` covers the callback, `'w` is the window borrow held by `Gpu<'w>`.
pub struct FrameCtx<'a, 'w> {
    pub window:  WindowCtx<'a>,
    pub gpu:     &'a mut Gpu<'w>,
    pub input:   &'a InputState,
    pub runtime: &'a mut RuntimeCtx,
}

impl FrameCtx<'_, '_> {
    /// Acquires a frame, clears it to `clear`, runs `draw` and presents.
    ///
    /// When the surface has no texture to hand out the frame is dropped and
    /// `draw` never runs. Only an unrecoverable surface returns `Exit`.
    pub fn render<F>(&mut self, clear: Color, draw: F) -> AppControl
    where
        F: FnOnce(&RenderCtx<'_>, &mut RenderTarget<'_>),
    {
        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                return match self.gpu.handle_surface_error(err) {
                    SurfaceErrorAction::Fatal => AppControl::Exit,
                    _ => AppControl::Continue,
                };
            }
        };

        let (w, h) = self.window.logical_size();
        let physical = self.gpu.size();
        let rctx = RenderCtx::new(
            self.gpu.device(),
            self.gpu.queue(),
            self.gpu.surface_format(),
            Viewport::new(w, h),
            self.window.scale_factor(),
            (physical.width, physical.height),
        );

        // The target borrows the encoder; it must be gone before submit.
        {
            let mut target = RenderTarget::new(&mut frame.encoder, &frame.view);
            target.clear(clear);
            draw(&rctx, &mut target);
        }

        self.window.window.pre_present_notify();
        self.gpu.submit(frame);
        AppControl::Continue
    }
}
