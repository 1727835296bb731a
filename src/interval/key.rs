use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed range `[lower, upper]` of ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntervalKey {
    lower: u32,
    upper: u32,
}

impl IntervalKey {
    /// Create a key from two bounds, in either order.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    /// The window `[center - radius, center + radius]`, saturating at both ends.
    pub fn around(center: u32, radius: u32) -> Self {
        Self {
            lower: center.saturating_sub(radius),
            upper: center.saturating_add(radius),
        }
    }

    /// Lower bound (inclusive)
    pub fn lower(&self) -> u32 {
        self.lower
    }

    /// Upper bound (inclusive)
    pub fn upper(&self) -> u32 {
        self.upper
    }

    /// Whether the two ranges share at least one point.
    pub fn overlaps(&self, other: &IntervalKey) -> bool {
        !(self.upper < other.lower || self.lower > other.upper)
    }

    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: u32) -> bool {
        self.lower <= value && value <= self.upper
    }
}

impl fmt::Display for IntervalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
