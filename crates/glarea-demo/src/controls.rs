use glarea_engine::coords::Rect;
use glarea_engine::paint::Color;
use glarea_engine::render::quad::Quad;
use glarea_transform::state::FULL_TURN;
use glarea_transform::Axis;

const MIN: f32 = 0.0;
const MAX: f32 = FULL_TURN;
const STEP: f32 = 1.0;

const TRACK_HEIGHT: f32 = 4.0;
const THUMB_WIDTH: f32 = 10.0;
const THUMB_INSET: f32 = 4.0;

/// Horizontal angle slider for one axis, range `[0, 360]` in steps of 1.
///
/// Press anywhere on the row to jump the value there; keep the button down
/// to drag. The value also follows external updates via [`set_value`].
///
/// [`set_value`]: AxisSlider::set_value
#[derive(Debug, Clone)]
pub struct AxisSlider {
    axis: Axis,
    value: f32,
    dragging: bool,
}

impl AxisSlider {
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            value: MIN,
            dragging: false,
        }
    }

    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Display update from outside (a drag on the drawing surface).
    pub fn set_value(&mut self, v: f32) {
        self.value = v.clamp(MIN, MAX);
    }

    /// Starts a drag at `x`; returns the new value.
    pub fn press(&mut self, row: Rect, x: f32) -> f32 {
        self.dragging = true;
        self.value = value_at(row, x);
        self.value
    }

    /// Follows the pointer while dragging.
    ///
    /// Returns the new value only when it changed.
    pub fn drag_to(&mut self, row: Rect, x: f32) -> Option<f32> {
        if !self.dragging {
            return None;
        }
        let v = value_at(row, x);
        if v == self.value {
            return None;
        }
        self.value = v;
        Some(v)
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    /// Normalized value in [0, 1].
    fn normalized(&self) -> f32 {
        ((self.value - MIN) / (MAX - MIN)).clamp(0.0, 1.0)
    }

    /// Track, fill and thumb for a row rect, back to front.
    pub fn quads(&self, row: Rect) -> [Quad; 3] {
        let track = track_rect(row);
        let thumb_cx = track.x + self.normalized() * track.width;
        let tint = tint(self.axis);

        let fill = Rect::new(track.x, track.y, thumb_cx - track.x, track.height);
        let thumb = Rect::new(
            thumb_cx - THUMB_WIDTH * 0.5,
            row.y + THUMB_INSET,
            THUMB_WIDTH,
            (row.height - 2.0 * THUMB_INSET).max(0.0),
        );

        let thumb_color = if self.dragging {
            tint
        } else {
            Color::from_straight(0.98, 0.98, 0.98, 1.0)
        };

        [
            Quad::new(track, Color::from_straight(0.72, 0.72, 0.72, 1.0)),
            Quad::new(fill, tint),
            Quad::new(thumb, thumb_color),
        ]
    }
}

/// Per-axis color (no labels are drawn, so color tells the rows apart).
pub fn tint(axis: Axis) -> Color {
    match axis {
        Axis::X => Color::from_straight(0.85, 0.25, 0.25, 1.0),
        Axis::Y => Color::from_straight(0.25, 0.7, 0.3, 1.0),
        Axis::Z => Color::from_straight(0.25, 0.45, 0.9, 1.0),
    }
}

/// Track spans the row minus half a thumb on each side so the thumb stays
/// inside the row at both ends.
fn track_rect(row: Rect) -> Rect {
    let half = THUMB_WIDTH * 0.5;
    Rect::new(
        row.x + half,
        row.y + (row.height - TRACK_HEIGHT) * 0.5,
        (row.width - THUMB_WIDTH).max(0.0),
        TRACK_HEIGHT,
    )
}

/// Value under `x`, clamped and snapped to the step.
fn value_at(row: Rect, x: f32) -> f32 {
    let track = track_rect(row);
    if track.width <= 0.0 {
        return MIN;
    }
    let t = ((x - track.x) / track.width).clamp(0.0, 1.0);
    let raw = MIN + t * (MAX - MIN);
    ((raw / STEP).round() * STEP).clamp(MIN, MAX)
}
