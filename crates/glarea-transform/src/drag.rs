//! Pointer drag tracking.
//!
//! Each tracked button owns an independent [`DragSession`]. A session records
//! its anchor on the first motion sample after the press and emits a delta
//! for every later sample until the button is released.

use crate::axis::Axis;

/// Pointer buttons the tracker cares about.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Button transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ButtonEvent {
    pub button: PointerButton,
    pub state: ButtonState,
}

impl ButtonEvent {
    #[inline]
    pub const fn pressed(button: PointerButton) -> Self {
        Self { button, state: ButtonState::Pressed }
    }

    #[inline]
    pub const fn released(button: PointerButton) -> Self {
        Self { button, state: ButtonState::Released }
    }
}

/// Buttons held during a motion sample.
///
/// Stored as booleans rather than a bitmask to keep it explicit.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct HeldButtons {
    pub primary: bool,
    pub secondary: bool,
    pub middle: bool,
}

impl HeldButtons {
    pub const fn none() -> Self {
        Self { primary: false, secondary: false, middle: false }
    }

    pub const fn primary() -> Self {
        Self { primary: true, secondary: false, middle: false }
    }

    pub const fn secondary() -> Self {
        Self { primary: false, secondary: true, middle: false }
    }

    /// The single rotation pair selected by this mask.
    ///
    /// Returns `None` unless exactly one of primary/secondary is held and the
    /// middle button is up.
    pub fn drag_pair(self) -> Option<DragPair> {
        match (self.primary, self.secondary, self.middle) {
            (true, false, false) => Some(DragPair::Primary),
            (false, true, false) => Some(DragPair::Secondary),
            _ => None,
        }
    }
}

/// Pointer position plus held buttons, in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MotionSample {
    pub x: f32,
    pub y: f32,
    pub buttons: HeldButtons,
}

impl MotionSample {
    #[inline]
    pub const fn new(x: f32, y: f32, buttons: HeldButtons) -> Self {
        Self { x, y, buttons }
    }
}

/// Which rotation axes a drag drives.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DragPair {
    /// Primary button: horizontal turns Y, vertical turns X.
    Primary,
    /// Secondary button: horizontal turns Z.
    Secondary,
}

impl DragPair {
    pub const fn axes(self) -> &'static [Axis] {
        match self {
            DragPair::Primary => &[Axis::Y, Axis::X],
            DragPair::Secondary => &[Axis::Z],
        }
    }

    const fn slot(self) -> usize {
        match self {
            DragPair::Primary => 0,
            DragPair::Secondary => 1,
        }
    }
}

/// Signed pixel movement since the previous sample.
///
/// `dy` is always `0.0` for secondary drags, which only track x.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DragDelta {
    pub dx: f32,
    pub dy: f32,
}

impl DragDelta {
    #[inline]
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}

/// Anchor state for one button's gesture.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
struct DragSession {
    anchor: Option<(f32, f32)>,
}

impl DragSession {
    #[inline]
    fn is_active(&self) -> bool {
        self.anchor.is_some()
    }

    fn sample(&mut self, pair: DragPair, x: f32, y: f32) -> Option<DragDelta> {
        // Secondary drags only follow x; pin y so it never contributes.
        let y = match pair {
            DragPair::Primary => y,
            DragPair::Secondary => 0.0,
        };

        let prev = self.anchor.replace((x, y))?;
        Some(DragDelta::new(x - prev.0, y - prev.1))
    }

    fn reset(&mut self) {
        self.anchor = None;
    }
}

/// Converts motion/button streams into drag deltas.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    sessions: [DragSession; 2],
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `pair` has recorded an anchor and is emitting deltas.
    pub fn is_dragging(&self, pair: DragPair) -> bool {
        self.sessions[pair.slot()].is_active()
    }

    /// Feeds one motion sample.
    ///
    /// Returns the delta for the active pair, or `None` when the sample only
    /// anchors a new gesture or no single tracked button is held. Zero deltas
    /// are returned like any other.
    pub fn on_motion(&mut self, sample: MotionSample) -> Option<(DragPair, DragDelta)> {
        let pair = sample.buttons.drag_pair()?;
        let session = &mut self.sessions[pair.slot()];

        let starting = !session.is_active();
        let delta = session.sample(pair, sample.x, sample.y);
        if starting {
            log::debug!("drag start: {pair:?} at ({}, {})", sample.x, sample.y);
        }

        delta.map(|d| (pair, d))
    }

    /// Feeds a button transition. Releases end the matching session.
    pub fn on_button(&mut self, event: ButtonEvent) {
        if event.state != ButtonState::Released {
            return;
        }

        let pair = match event.button {
            PointerButton::Primary => DragPair::Primary,
            PointerButton::Secondary => DragPair::Secondary,
            PointerButton::Middle => return,
        };

        let session = &mut self.sessions[pair.slot()];
        if session.is_active() {
            log::debug!("drag end: {pair:?}");
        }
        session.reset();
    }

    /// Drops every open session (e.g. on focus loss).
    pub fn cancel_all(&mut self) {
        for s in &mut self.sessions {
            s.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primary(x: f32, y: f32) -> MotionSample {
        MotionSample::new(x, y, HeldButtons::primary())
    }

    fn secondary(x: f32, y: f32) -> MotionSample {
        MotionSample::new(x, y, HeldButtons::secondary())
    }

    // ── session lifecycle ─────────────────────────────────────────────────

    #[test]
    fn press_then_release_emits_nothing() {
        let mut t = DragTracker::new();
        t.on_button(ButtonEvent::pressed(PointerButton::Primary));
        t.on_button(ButtonEvent::released(PointerButton::Primary));
        assert!(!t.is_dragging(DragPair::Primary));
    }

    #[test]
    fn first_sample_anchors_without_delta() {
        let mut t = DragTracker::new();
        assert_eq!(t.on_motion(primary(10.0, 10.0)), None);
        assert!(t.is_dragging(DragPair::Primary));
    }

    #[test]
    fn every_sample_after_anchor_emits_including_zero() {
        let mut t = DragTracker::new();
        let out: Vec<_> = [primary(10.0, 10.0), primary(15.0, 12.0), primary(15.0, 12.0)]
            .into_iter()
            .filter_map(|s| t.on_motion(s))
            .collect();

        assert_eq!(
            out,
            vec![
                (DragPair::Primary, DragDelta::new(5.0, 2.0)),
                (DragPair::Primary, DragDelta::new(0.0, 0.0)),
            ]
        );
        assert_eq!(out.iter().filter(|(_, d)| !d.is_zero()).count(), 1);
    }

    #[test]
    fn release_resets_anchor() {
        let mut t = DragTracker::new();
        t.on_motion(primary(0.0, 0.0));
        t.on_motion(primary(5.0, 5.0));
        t.on_button(ButtonEvent::released(PointerButton::Primary));
        assert!(!t.is_dragging(DragPair::Primary));

        // New gesture re-anchors instead of jumping from the old position.
        assert_eq!(t.on_motion(primary(100.0, 100.0)), None);
        assert_eq!(
            t.on_motion(primary(101.0, 100.0)),
            Some((DragPair::Primary, DragDelta::new(1.0, 0.0)))
        );
    }

    #[test]
    fn rapid_reversals_track_each_step() {
        let mut t = DragTracker::new();
        t.on_motion(primary(50.0, 50.0));
        let deltas: Vec<_> = [60.0, 40.0, 70.0, 30.0]
            .into_iter()
            .filter_map(|x| t.on_motion(primary(x, 50.0)))
            .map(|(_, d)| d.dx)
            .collect();
        assert_eq!(deltas, vec![10.0, -20.0, 30.0, -40.0]);
    }

    // ── button masks ──────────────────────────────────────────────────────

    #[test]
    fn motion_without_buttons_is_noop() {
        let mut t = DragTracker::new();
        assert_eq!(t.on_motion(MotionSample::new(1.0, 1.0, HeldButtons::none())), None);
        assert!(!t.is_dragging(DragPair::Primary));
        assert!(!t.is_dragging(DragPair::Secondary));
    }

    #[test]
    fn chorded_buttons_are_ignored() {
        let mut t = DragTracker::new();
        let both = HeldButtons { primary: true, secondary: true, middle: false };
        assert_eq!(t.on_motion(MotionSample::new(1.0, 1.0, both)), None);
        let with_middle = HeldButtons { primary: true, secondary: false, middle: true };
        assert_eq!(t.on_motion(MotionSample::new(1.0, 1.0, with_middle)), None);
        assert!(!t.is_dragging(DragPair::Primary));
    }

    #[test]
    fn secondary_tracks_x_only() {
        let mut t = DragTracker::new();
        t.on_motion(secondary(10.0, 10.0));
        assert_eq!(
            t.on_motion(secondary(4.0, 90.0)),
            Some((DragPair::Secondary, DragDelta::new(-6.0, 0.0)))
        );
    }

    #[test]
    fn sessions_are_independent_per_button() {
        let mut t = DragTracker::new();
        t.on_motion(primary(0.0, 0.0));
        t.on_motion(secondary(0.0, 0.0));

        t.on_button(ButtonEvent::released(PointerButton::Secondary));
        assert!(t.is_dragging(DragPair::Primary));
        assert!(!t.is_dragging(DragPair::Secondary));
    }

    #[test]
    fn middle_release_leaves_sessions_alone() {
        let mut t = DragTracker::new();
        t.on_motion(primary(0.0, 0.0));
        t.on_button(ButtonEvent::released(PointerButton::Middle));
        assert!(t.is_dragging(DragPair::Primary));
    }

    #[test]
    fn cancel_all_drops_sessions() {
        let mut t = DragTracker::new();
        t.on_motion(primary(0.0, 0.0));
        t.on_motion(secondary(0.0, 0.0));
        t.cancel_all();
        assert!(!t.is_dragging(DragPair::Primary));
        assert!(!t.is_dragging(DragPair::Secondary));
    }
}
