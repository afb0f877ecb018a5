/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, px: f32, py: f32) -> bool {
        px >= self.x && py >= self.y && px < self.right() && py < self.bottom()
    }

    /// Shrinks every side by `amount`, never below zero size.
    pub fn inset(self, amount: f32) -> Rect {
        Rect::new(
            self.x + amount,
            self.y + amount,
            (self.width - 2.0 * amount).max(0.0),
            (self.height - 2.0 * amount).max(0.0),
        )
    }

    /// Cuts a strip of `height` off the bottom.
    ///
    /// Returns `(rest, strip)`; the strip is clamped to the available height.
    pub fn split_bottom(self, height: f32) -> (Rect, Rect) {
        let h = height.clamp(0.0, self.height);
        let rest = Rect::new(self.x, self.y, self.width, self.height - h);
        let strip = Rect::new(self.x, self.bottom() - h, self.width, h);
        (rest, strip)
    }

    /// Converts to a physical-pixel `(x, y, w, h)` rect clamped to `limit`.
    ///
    /// Returns `None` when nothing is left after clamping.
    pub fn to_physical(self, scale: f32, limit: (u32, u32)) -> Option<(u32, u32, u32, u32)> {
        let (lw, lh) = limit;
        let x0 = ((self.x * scale).max(0.0) as u32).min(lw);
        let y0 = ((self.y * scale).max(0.0) as u32).min(lh);
        let x1 = ((self.right() * scale).max(0.0) as u32).min(lw);
        let y1 = ((self.bottom() * scale).max(0.0) as u32).min(lh);

        let (w, h) = (x1.saturating_sub(x0), y1.saturating_sub(y0));
        if w == 0 || h == 0 { None } else { Some((x0, y0, w, h)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive_bottom_right_exclusive() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(0.0, 0.0));
        assert!(rect.contains(9.9, 9.9));
        assert!(!rect.contains(10.0, 10.0));
        assert!(!rect.contains(-1.0, 5.0));
    }

    // ── inset ─────────────────────────────────────────────────────────────

    #[test]
    fn inset_shrinks_all_sides() {
        assert_eq!(r(0.0, 0.0, 100.0, 80.0).inset(6.0), r(6.0, 6.0, 88.0, 68.0));
    }

    #[test]
    fn inset_clamps_to_zero() {
        let inner = r(0.0, 0.0, 10.0, 10.0).inset(20.0);
        assert!(inner.is_empty());
        assert_eq!(inner.width, 0.0);
    }

    // ── split_bottom ──────────────────────────────────────────────────────

    #[test]
    fn split_bottom_partitions_height() {
        let (rest, strip) = r(0.0, 10.0, 50.0, 100.0).split_bottom(30.0);
        assert_eq!(rest, r(0.0, 10.0, 50.0, 70.0));
        assert_eq!(strip, r(0.0, 80.0, 50.0, 30.0));
    }

    #[test]
    fn split_bottom_clamps_oversized_strip() {
        let (rest, strip) = r(0.0, 0.0, 50.0, 20.0).split_bottom(30.0);
        assert!(rest.is_empty());
        assert_eq!(strip.height, 20.0);
    }

    // ── to_physical ───────────────────────────────────────────────────────

    #[test]
    fn to_physical_applies_scale() {
        assert_eq!(r(10.0, 5.0, 20.0, 10.0).to_physical(2.0, (1000, 1000)), Some((20, 10, 40, 20)));
    }

    #[test]
    fn to_physical_clamps_to_limit() {
        assert_eq!(r(90.0, 0.0, 50.0, 10.0).to_physical(1.0, (100, 100)), Some((90, 0, 10, 10)));
    }

    #[test]
    fn to_physical_outside_limit_is_none() {
        assert_eq!(r(200.0, 0.0, 50.0, 10.0).to_physical(1.0, (100, 100)), None);
    }
}
