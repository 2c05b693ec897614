//! Arc planner
//!
//! Turns a G2/G3 move into a sequence of points on the arc. Intermediate
//! points rotate the radius vector by a fixed small angle using truncated
//! series for sine and cosine; every `correction_interval` steps the vector
//! is recomputed exactly so the accumulated error stays bounded. Z moves
//! linearly across the arc, turning it into a helix when it changes.

use gcodescan_core::Vector3D;
use std::f64::consts::TAU;
use tracing::warn;

/// Arcs whose travel is shorter than this (mm) are dropped
pub const MIN_ARC_TRAVEL: f64 = 0.001;

/// Arcs that would need more segments than this are dropped
pub const MAX_ARC_SEGMENTS: u32 = 1_000_000;

/// Arc subdivision parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSettings {
    /// Maximum length of one segment, in mm
    pub mm_per_arc_segment: f64,
    /// Incremental steps between exact corrections
    pub correction_interval: u32,
}

impl Default for ArcSettings {
    fn default() -> Self {
        Self {
            mm_per_arc_segment: 1.0,
            correction_interval: 25,
        }
    }
}

/// Points of a planned arc, ending exactly on the target
#[derive(Debug, Clone)]
pub struct ArcPath {
    center_x: f64,
    center_y: f64,
    start_r: (f64, f64),
    r: (f64, f64),
    start_z: f64,
    delta_z: f64,
    target: Vector3D,
    theta: f64,
    cos_t: f64,
    sin_t: f64,
    sweep: f64,
    radius: f64,
    segments: u32,
    step: u32,
    since_correction: u32,
    correction_interval: u32,
}

impl ArcPath {
    /// Plan an arc from `start` to `target` around `start + center_offset`
    ///
    /// `center_offset` is the already scaled (I, J) pair. A sweep of the
    /// wrong sign for the direction, or no sweep at all, is corrected by a
    /// full turn, so identical start and target describe a full circle.
    /// Returns `None` when the arc travels less than [`MIN_ARC_TRAVEL`] or
    /// would need more than [`MAX_ARC_SEGMENTS`] segments.
    pub fn plan(
        start: Vector3D,
        target: Vector3D,
        center_offset: (f64, f64),
        clockwise: bool,
        settings: ArcSettings,
    ) -> Option<Self> {
        let (i, j) = center_offset;
        let center_x = start.x + i;
        let center_y = start.y + j;
        let r = (-i, -j);
        let rt = (target.x - center_x, target.y - center_y);
        let radius = i.hypot(j);

        let mut sweep = (r.0 * rt.1 - r.1 * rt.0).atan2(r.0 * rt.0 + r.1 * rt.1);
        if clockwise {
            if sweep >= 0.0 {
                sweep -= TAU;
            }
        } else if sweep <= 0.0 {
            sweep += TAU;
        }

        let delta_z = target.z - start.z;
        let travel = (sweep * radius).hypot(delta_z);
        if travel < MIN_ARC_TRAVEL {
            return None;
        }

        let count = (travel / settings.mm_per_arc_segment).floor();
        if count.is_nan() || count > f64::from(MAX_ARC_SEGMENTS) {
            warn!(
                travel,
                mm_per_arc_segment = settings.mm_per_arc_segment,
                "Arc needs too many segments, ignoring it"
            );
            return None;
        }
        let segments = (count as u32).max(1);
        let theta = sweep / f64::from(segments);

        Some(Self {
            center_x,
            center_y,
            start_r: r,
            r,
            start_z: start.z,
            delta_z,
            target,
            theta,
            cos_t: 1.0 - theta * theta / 2.0,
            sin_t: theta - theta * theta * theta / 6.0,
            sweep,
            radius,
            segments,
            step: 1,
            since_correction: 0,
            correction_interval: settings.correction_interval.max(1),
        })
    }

    /// Signed angular sweep in radians, negative when clockwise
    pub fn sweep(&self) -> f64 {
        self.sweep
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of segments, which is also the number of points yielded
    pub fn segments(&self) -> u32 {
        self.segments
    }

    fn advance(&mut self, step: u32) {
        if self.since_correction + 1 < self.correction_interval {
            let (x, y) = self.r;
            self.r = (
                x * self.cos_t - y * self.sin_t,
                x * self.sin_t + y * self.cos_t,
            );
            self.since_correction += 1;
        } else {
            let angle = f64::from(step) * self.theta;
            let (cos, sin) = (angle.cos(), angle.sin());
            let (x, y) = self.start_r;
            self.r = (x * cos - y * sin, x * sin + y * cos);
            self.since_correction = 0;
        }
    }
}

impl Iterator for ArcPath {
    type Item = Vector3D;

    fn next(&mut self) -> Option<Vector3D> {
        let step = self.step;
        if step > self.segments {
            return None;
        }
        self.step += 1;

        if step == self.segments {
            return Some(self.target);
        }

        self.advance(step);
        let fraction = f64::from(step) / f64::from(self.segments);
        Some(Vector3D::new(
            self.center_x + self.r.0,
            self.center_y + self.r.1,
            self.start_z + self.delta_z * fraction,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.segments + 1).saturating_sub(self.step) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ArcPath {}
