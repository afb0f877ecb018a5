//! Window layout: the drawing surface on top, one slider row per axis below.
//!
//! Pure geometry in logical pixels so hit testing and drawing agree and can
//! be tested without a window.

use glarea_engine::coords::Rect;
use glarea_transform::Axis;

/// Spacing constants for the vertical box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutMetrics {
    /// Gap between the window edge and the content.
    pub border: f32,
    /// Gap between stacked children.
    pub spacing: f32,
    pub slider_row_height: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self {
            border: 6.0,
            spacing: 6.0,
            slider_row_height: 28.0,
        }
    }
}

/// Resolved rects for one window size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Layout {
    pub area: Rect,
    pub sliders: [Rect; Axis::COUNT],
}

/// Region under a point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Region {
    Area,
    Slider(Axis),
}

impl Layout {
    /// Lays out a window of `width` x `height`.
    ///
    /// Sliders keep their row height; the drawing surface takes what is left
    /// and collapses to empty when the window is too small.
    pub fn compute(width: f32, height: f32, m: LayoutMetrics) -> Self {
        let mut rest = Rect::new(0.0, 0.0, width, height).inset(m.border);
        let mut sliders = [Rect::default(); Axis::COUNT];

        // Bottom-up: Z is the last row.
        for axis in Axis::ALL.iter().rev() {
            let (above, row) = rest.split_bottom(m.slider_row_height);
            sliders[axis.index()] = row;
            rest = above.split_bottom(m.spacing).0;
        }

        Self { area: rest, sliders }
    }

    #[inline]
    pub fn slider(&self, axis: Axis) -> Rect {
        self.sliders[axis.index()]
    }

    pub fn hit(&self, x: f32, y: f32) -> Option<Region> {
        if self.area.contains(x, y) {
            return Some(Region::Area);
        }
        self.sliders
            .iter()
            .position(|row| row.contains(x, y))
            .map(|i| Region::Slider(Axis::from_index_checked(i)))
    }
}
