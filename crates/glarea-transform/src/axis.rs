use std::fmt;

/// Rotation axis identifier.
///
/// Indices are fixed: X = 0, Y = 1, Z = 2.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const COUNT: usize = 3;
    pub const ALL: [Axis; Axis::COUNT] = [Axis::X, Axis::Y, Axis::Z];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Returns `None` for indices outside `0..3`.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Axis> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    /// Like [`from_index`](Self::from_index) but treats a bad index as a caller bug.
    ///
    /// Panics when `index >= 3`.
    #[inline]
    pub fn from_index_checked(index: usize) -> Axis {
        match Self::from_index(index) {
            Some(axis) => axis,
            None => panic!("axis index {index} out of range (expected 0..{})", Axis::COUNT),
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Axis::X => "X axis",
            Axis::Y => "Y axis",
            Axis::Z => "Z axis",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trips_for_all_axes() {
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
            assert_eq!(Axis::from_index(i), Some(*axis));
        }
    }

    #[test]
    fn from_index_rejects_out_of_range() {
        assert_eq!(Axis::from_index(3), None);
        assert_eq!(Axis::from_index(usize::MAX), None);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn from_index_checked_fails_fast() {
        let _ = Axis::from_index_checked(7);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(Axis::Z.to_string(), "Z axis");
    }
}
