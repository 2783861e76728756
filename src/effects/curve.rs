//! Linear parameter ranges

use serde::{Deserialize, Serialize};

/// A `[start, end]` pair interpolated across a burst
///
/// Serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "(f32, f32)", into = "(f32, f32)")]
pub struct Range {
    pub start: f32,
    pub end: f32,
}

impl Range {
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Same value at every point
    pub const fn constant(value: f32) -> Self {
        Self::new(value, value)
    }

    /// Plain linear interpolation at progress `t` (clamped to [0, 1])
    #[inline]
    pub fn lerp(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        self.start + (self.end - self.start) * t
    }
}

impl From<(f32, f32)> for Range {
    fn from((start, end): (f32, f32)) -> Self {
        Self::new(start, end)
    }
}

impl From<Range> for (f32, f32) {
    fn from(range: Range) -> Self {
        (range.start, range.end)
    }
}
