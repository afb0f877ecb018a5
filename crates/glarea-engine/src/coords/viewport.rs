use super::Rect;

/// Window drawable size in logical pixels.
///
/// Renderers use it as the basis for converting logical px to NDC and, with
/// the scale factor, to physical viewport/scissor rects.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    #[inline]
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}
