use crate::axis::Axis;
use crate::drag::{DragDelta, DragPair};

/// Degrees in one full turn.
pub const FULL_TURN: f32 = 360.0;

/// Scale bounds and wheel step.
pub const SCALE_MIN: f32 = 0.1;
pub const SCALE_MAX: f32 = 2.0;
pub const SCALE_STEP: f32 = 0.1;

/// Wheel direction.
///
/// `Forward` is "wheel up" / away from the user and shrinks the triangle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ScrollDirection {
    Forward,
    Backward,
}

/// Reduces an angle in degrees to `[0, 360)`.
///
/// Works for any finite magnitude (multi-turn drags included). Non-finite
/// input maps to `0.0`.
pub fn normalize_degrees(degrees: f32) -> f32 {
    if !degrees.is_finite() {
        return 0.0;
    }

    let mut a = degrees.rem_euclid(FULL_TURN);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    while a >= FULL_TURN {
        a -= FULL_TURN;
    }
    while a < 0.0 {
        a += FULL_TURN;
    }
    a
}

/// Rotation angles (degrees, per axis) and uniform scale.
///
/// Invariants:
/// - angles written by drags are always in `[0, 360)`
/// - `scale` is always in `[SCALE_MIN, SCALE_MAX]`
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformState {
    rotation: [f32; Axis::COUNT],
    scale: f32,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            rotation: [0.0; Axis::COUNT],
            scale: 1.0,
        }
    }
}

impl TransformState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn rotation(&self, axis: Axis) -> f32 {
        self.rotation[axis.index()]
    }

    #[inline]
    pub fn rotations(&self) -> [f32; Axis::COUNT] {
        self.rotation
    }

    #[inline]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Adds a pointer delta to the axes driven by `pair` and normalizes them.
    ///
    /// - primary: `dx` turns Y, `dy` turns X with inverted sign
    /// - secondary: `dx` turns Z
    ///
    /// Returns the axes that changed, in update order.
    pub fn apply_drag(&mut self, pair: DragPair, delta: DragDelta) -> &'static [Axis] {
        match pair {
            DragPair::Primary => {
                self.rotate_by(Axis::Y, delta.dx);
                self.rotate_by(Axis::X, -delta.dy);
            }
            DragPair::Secondary => {
                self.rotate_by(Axis::Z, delta.dx);
            }
        }
        pair.axes()
    }

    /// Steps the scale by one wheel notch and clamps it.
    pub fn apply_scroll(&mut self, direction: ScrollDirection) -> f32 {
        match direction {
            ScrollDirection::Forward => self.scale -= SCALE_STEP,
            ScrollDirection::Backward => self.scale += SCALE_STEP,
        }
        self.scale = self.scale.clamp(SCALE_MIN, SCALE_MAX);
        self.scale
    }

    /// Assigns an absolute angle reported by a slider.
    ///
    /// The slider range is already `[0, 360]`, so no normalization happens.
    pub fn set_axis(&mut self, axis: Axis, degrees: f32) {
        debug_assert!(
            (0.0..=FULL_TURN).contains(&degrees),
            "slider value {degrees} outside [0, 360]"
        );
        self.rotation[axis.index()] = degrees;
    }

    fn rotate_by(&mut self, axis: Axis, degrees: f32) {
        let slot = &mut self.rotation[axis.index()];
        *slot = normalize_degrees(*slot + degrees);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: [f32; 12] = [
        0.0, 0.5, -0.5, 359.9, 360.0, -360.0, 720.5, -1080.25, 1.0e-6, -1.0e-6, 12345.0, -98765.5,
    ];

    fn in_range(a: f32) -> bool {
        (0.0..FULL_TURN).contains(&a)
    }

    // ── normalize_degrees ─────────────────────────────────────────────────

    #[test]
    fn normalize_lands_in_half_open_range() {
        for &start in &[0.0f32, 90.0, 359.0] {
            for &d in &SAMPLES {
                let n = normalize_degrees(start + d);
                assert!(in_range(n), "normalize({start} + {d}) = {n}");
            }
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        for &x in &SAMPLES {
            let once = normalize_degrees(x);
            assert_eq!(normalize_degrees(once), once, "input {x}");
        }
    }

    #[test]
    fn normalize_full_turn_maps_to_zero() {
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert_eq!(normalize_degrees(-360.0), 0.0);
    }

    #[test]
    fn normalize_handles_multiple_wraps() {
        assert_eq!(normalize_degrees(3.0 * 360.0 + 10.0), 10.0);
        assert_eq!(normalize_degrees(-2.0 * 360.0 - 10.0), 350.0);
    }

    #[test]
    fn normalize_large_magnitude_terminates() {
        let n = normalize_degrees(1.0e12);
        assert!(in_range(n));
    }

    #[test]
    fn normalize_non_finite_is_zero() {
        assert_eq!(normalize_degrees(f32::NAN), 0.0);
        assert_eq!(normalize_degrees(f32::INFINITY), 0.0);
    }

    // ── apply_drag ────────────────────────────────────────────────────────

    #[test]
    fn primary_drag_turns_y_and_inverted_x() {
        let mut s = TransformState::new();
        let touched = s.apply_drag(DragPair::Primary, DragDelta::new(30.0, 10.0));
        assert_eq!(touched, &[Axis::Y, Axis::X]);
        assert_eq!(s.rotation(Axis::Y), 30.0);
        assert_eq!(s.rotation(Axis::X), 350.0);
        assert_eq!(s.rotation(Axis::Z), 0.0);
    }

    #[test]
    fn secondary_drag_turns_z_only() {
        let mut s = TransformState::new();
        let touched = s.apply_drag(DragPair::Secondary, DragDelta::new(-45.0, 99.0));
        assert_eq!(touched, &[Axis::Z]);
        assert_eq!(s.rotation(Axis::Z), 315.0);
        assert_eq!(s.rotation(Axis::X), 0.0);
        assert_eq!(s.rotation(Axis::Y), 0.0);
    }

    #[test]
    fn drag_past_boundary_several_times_stays_normalized() {
        let mut s = TransformState::new();
        for _ in 0..10 {
            s.apply_drag(DragPair::Primary, DragDelta::new(250.0, -250.0));
            assert!(in_range(s.rotation(Axis::X)));
            assert!(in_range(s.rotation(Axis::Y)));
        }
        // 2500 mod 360 = 340
        assert!((s.rotation(Axis::Y) - 340.0).abs() < 1e-3);
    }

    // ── apply_scroll ──────────────────────────────────────────────────────

    #[test]
    fn scroll_forward_shrinks_backward_grows() {
        let mut s = TransformState::new();
        let smaller = s.apply_scroll(ScrollDirection::Forward);
        assert!((smaller - 0.9).abs() < 1e-6);
        s.apply_scroll(ScrollDirection::Backward);
        s.apply_scroll(ScrollDirection::Backward);
        assert!((s.scale() - 1.1).abs() < 1e-6);
    }

    #[test]
    fn scroll_forward_saturates_at_min() {
        let mut s = TransformState::new();
        for _ in 0..50 {
            s.apply_scroll(ScrollDirection::Forward);
            assert!(s.scale() >= SCALE_MIN && s.scale() <= SCALE_MAX);
        }
        assert_eq!(s.scale(), SCALE_MIN);
    }

    #[test]
    fn scroll_backward_saturates_at_max() {
        let mut s = TransformState::new();
        for _ in 0..50 {
            s.apply_scroll(ScrollDirection::Backward);
        }
        assert_eq!(s.scale(), SCALE_MAX);
    }

    // ── set_axis ──────────────────────────────────────────────────────────

    #[test]
    fn set_axis_assigns_verbatim() {
        let mut s = TransformState::new();
        s.set_axis(Axis::Y, 123.5);
        assert_eq!(s.rotation(Axis::Y), 123.5);
        s.set_axis(Axis::Z, 360.0);
        assert_eq!(s.rotation(Axis::Z), 360.0);
    }
}
