use crate::axis::Axis;
use crate::drag::{ButtonEvent, DragTracker, MotionSample};
use crate::matrix::{model_matrix, ModelMatrix};
use crate::state::{ScrollDirection, TransformState};

/// Outputs the core sends back to whatever hosts it.
pub trait ViewHost {
    /// Ask for a repaint. Requests may be coalesced by the host.
    fn queue_redraw(&mut self);

    /// Keep an external control for `axis` in sync with a drag-driven change.
    fn sync_axis(&mut self, axis: Axis, degrees: f32) {
        let _ = (axis, degrees);
    }
}

/// Input callbacks implemented by the core and driven by the event dispatcher.
pub trait TransformInput {
    fn on_motion(&mut self, sample: MotionSample, host: &mut dyn ViewHost);

    fn on_button(&mut self, event: ButtonEvent, host: &mut dyn ViewHost);

    fn on_scroll(&mut self, direction: ScrollDirection, host: &mut dyn ViewHost);

    /// Absolute angle from a slider-like control.
    fn on_axis_change(&mut self, axis: Axis, degrees: f32, host: &mut dyn ViewHost);

    /// Matrix for the frame about to be drawn.
    fn on_redraw(&self) -> ModelMatrix;
}

/// Owns the transform state and the drag tracker.
#[derive(Debug, Clone, Default)]
pub struct TransformController {
    state: TransformState,
    drag: DragTracker,
}

impl TransformController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> &TransformState {
        &self.state
    }

    #[inline]
    pub fn drag(&self) -> &DragTracker {
        &self.drag
    }

    /// Drops open gestures without touching the angles.
    pub fn cancel_drags(&mut self) {
        self.drag.cancel_all();
    }
}

impl TransformInput for TransformController {
    fn on_motion(&mut self, sample: MotionSample, host: &mut dyn ViewHost) {
        let Some((pair, delta)) = self.drag.on_motion(sample) else {
            return;
        };

        for &axis in self.state.apply_drag(pair, delta) {
            host.sync_axis(axis, self.state.rotation(axis));
        }
        host.queue_redraw();
    }

    fn on_button(&mut self, event: ButtonEvent, _host: &mut dyn ViewHost) {
        self.drag.on_button(event);
    }

    fn on_scroll(&mut self, direction: ScrollDirection, host: &mut dyn ViewHost) {
        let scale = self.state.apply_scroll(direction);
        log::debug!("scale -> {scale:.2}");
        host.queue_redraw();
    }

    fn on_axis_change(&mut self, axis: Axis, degrees: f32, host: &mut dyn ViewHost) {
        self.state.set_axis(axis, degrees);
        host.queue_redraw();
    }

    fn on_redraw(&self) -> ModelMatrix {
        let [x, y, z] = self.state.rotations();
        model_matrix(x, y, z, self.state.scale())
    }
}
