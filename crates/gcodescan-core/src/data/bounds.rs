//! Running min/max tracking over recorded points

use serde::{Deserialize, Serialize};

use super::vector::{Axis, Vector3D};

/// Tracks minimum and maximum of recorded coordinates
///
/// Both corners start unset. The first recorded point sets both of them;
/// later points widen each axis independently. An empty tracker reports
/// `None` for its corners and a zero [`size`](MinMax3D::size).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MinMax3D {
    min: Option<Vector3D>,
    max: Option<Vector3D>,
}

impl MinMax3D {
    /// Create an empty tracker
    pub fn new() -> Self {
        Self::default()
    }

    /// Widen the tracked box to include `point`
    pub fn record(&mut self, point: Vector3D) {
        let (min, max) = match (self.min, self.max) {
            (Some(min), Some(max)) => {
                let mut lo = min;
                let mut hi = max;
                for axis in Axis::ALL {
                    let value = point.get(axis);
                    if value < lo.get(axis) {
                        lo = lo.with(axis, value);
                    }
                    if value > hi.get(axis) {
                        hi = hi.with(axis, value);
                    }
                }
                (lo, hi)
            }
            _ => (point, point),
        };
        self.min = Some(min);
        self.max = Some(max);
    }

    /// Lower corner, `None` until something was recorded
    pub fn min(&self) -> Option<Vector3D> {
        self.min
    }

    /// Upper corner, `None` until something was recorded
    pub fn max(&self) -> Option<Vector3D> {
        self.max
    }

    /// Whether no point has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Componentwise extent of the recorded points
    pub fn size(&self) -> Vector3D {
        match (self.min, self.max) {
            (Some(min), Some(max)) => (max - min).abs(),
            _ => Vector3D::ZERO,
        }
    }
}
