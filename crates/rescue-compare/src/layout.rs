//! Multi-scene layout math

use rescue_scene::Scene;
use std::ops::Range;

/// Panel grid for a multi-scene figure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    /// Number of rows
    pub rows: usize,
    /// Number of columns
    pub cols: usize,
}

impl GridLayout {
    /// Panel count from which the grid switches to two rows
    pub const TWO_ROW_THRESHOLD: usize = 4;

    /// Layout for `n` panels
    ///
    /// Fewer than four panels sit in one row; from four on, two rows of
    /// `ceil((n + 1) / 2)` columns.
    #[must_use]
    pub fn for_panels(n: usize) -> Self {
        if n >= Self::TWO_ROW_THRESHOLD {
            Self {
                rows: 2,
                cols: (n + 1).div_ceil(2),
            }
        } else {
            Self { rows: 1, cols: n }
        }
    }

    /// Number of slots
    #[inline]
    #[must_use]
    pub fn slots(&self) -> usize {
        self.rows * self.cols
    }

    /// Row-major `(row, col)` of slot `index`
    #[must_use]
    pub fn position(&self, index: usize) -> Option<(usize, usize)> {
        if self.cols == 0 || index >= self.slots() {
            return None;
        }
        Some((index / self.cols, index % self.cols))
    }
}

/// Axis ranges for one 3D panel
#[derive(Debug, Clone, PartialEq)]
pub struct AxisLimits {
    /// X range
    pub x: Range<f64>,
    /// Y range
    pub y: Range<f64>,
    /// Z range
    pub z: Range<f64>,
}

impl AxisLimits {
    /// `0..grid bound` per axis, widened to cover any coordinate outside it
    ///
    /// Unknown bounds `(0, 0, 0)` therefore expand to the data. An axis
    /// never collapses to zero width.
    #[must_use]
    pub fn for_scene(scene: &Scene) -> Self {
        let bounds = scene.grid_bounds();
        let mut lo = [0i64; 3];
        let mut hi = [i64::from(bounds.x), i64::from(bounds.y), i64::from(bounds.z)];

        for point in scene.points() {
            for (axis, value) in point.to_array().into_iter().enumerate() {
                lo[axis] = lo[axis].min(i64::from(value));
                hi[axis] = hi[axis].max(i64::from(value));
            }
        }

        let range = |axis: usize| {
            let upper = if hi[axis] > lo[axis] { hi[axis] } else { lo[axis] + 1 };
            lo[axis] as f64..upper as f64
        };
        Self {
            x: range(0),
            y: range(1),
            z: range(2),
        }
    }
}
