//! Three-component vector value type
//!
//! `Vector3D` is the coordinate and arithmetic primitive used by the
//! interpreter. All operators return a new value; nothing is mutated in place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

/// Cartesian axis selector
///
/// Used wherever a command touches axes individually (homing, coordinate
/// resets, bounding-box updates) so that per-axis code is a plain loop over
/// [`Axis::ALL`] instead of three copies of the same statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All cartesian axes in X, Y, Z order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Parameter letter used for this axis in a program line
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// 3D vector value
///
/// Supports addition, subtraction, negation and multiplication with a scalar
/// (from either side), plus componentwise absolute value and Euclidean length.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3D {
    /// Vector with all components at zero
    pub const ZERO: Vector3D = Vector3D {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    /// Create a vector from its components
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Componentwise absolute value
    pub fn abs(&self) -> Self {
        Self::new(self.x.abs(), self.y.abs(), self.z.abs())
    }

    /// Component on the given axis
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// Copy of this vector with one component replaced
    pub fn with(self, axis: Axis, value: f64) -> Self {
        match axis {
            Axis::X => Self { x: value, ..self },
            Axis::Y => Self { y: value, ..self },
            Axis::Z => Self { z: value, ..self },
        }
    }

    /// Componentwise minimum
    pub fn min(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Componentwise maximum
    pub fn max(self, other: Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }
}

impl From<(f64, f64, f64)> for Vector3D {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for Vector3D {
    type Output = Vector3D;

    fn add(self, other: Vector3D) -> Vector3D {
        Vector3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Vector3D {
    type Output = Vector3D;

    fn sub(self, other: Vector3D) -> Vector3D {
        Vector3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<f64> for Vector3D {
    type Output = Vector3D;

    fn mul(self, factor: f64) -> Vector3D {
        Vector3D::new(self.x * factor, self.y * factor, self.z * factor)
    }
}

impl Mul<Vector3D> for f64 {
    type Output = Vector3D;

    fn mul(self, vector: Vector3D) -> Vector3D {
        vector * self
    }
}

impl Neg for Vector3D {
    type Output = Vector3D;

    fn neg(self) -> Vector3D {
        Vector3D::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_arithmetic() {
        let a = Vector3D::new(1.0, 1.0, 1.0);
        let b = Vector3D::new(4.0, 4.0, 4.0);

        assert_eq!(a + b, Vector3D::new(5.0, 5.0, 5.0));
        assert_eq!(b - a, Vector3D::new(3.0, 3.0, 3.0));
        assert_eq!((a - b).abs(), Vector3D::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vector3D::new(2.0, 2.0, 2.0));
        assert_eq!(a * 2.0, 2.0 * a);
        assert_eq!(-a, Vector3D::new(-1.0, -1.0, -1.0));
    }

    #[test]
    fn test_vector_length() {
        let v = Vector3D::new(3.0, 4.0, 12.0);
        assert_eq!(v.length(), 13.0);
        assert_eq!(Vector3D::ZERO.length(), 0.0);
    }

    #[test]
    fn test_copy_is_independent() {
        let a = Vector3D::new(1.0, 2.0, 3.0);
        let mut copied = a;
        copied.x = 10.0;
        assert_eq!(a.x, 1.0);
        assert_ne!(a, copied);
    }

    #[test]
    fn test_axis_access() {
        let v = Vector3D::new(1.0, 2.0, 3.0);
        assert_eq!(v.get(Axis::X), 1.0);
        assert_eq!(v.get(Axis::Y), 2.0);
        assert_eq!(v.get(Axis::Z), 3.0);

        let moved = v.with(Axis::Y, -5.0);
        assert_eq!(moved, Vector3D::new(1.0, -5.0, 3.0));
        assert_eq!(v.y, 2.0);
    }

    #[test]
    fn test_axis_letters() {
        let letters: String = Axis::ALL.iter().map(|a| a.letter()).collect();
        assert_eq!(letters, "XYZ");
        assert_eq!(Axis::Z.to_string(), "Z");
    }

    #[test]
    fn test_componentwise_min_max() {
        let a = Vector3D::new(1.0, 5.0, -2.0);
        let b = Vector3D::new(3.0, 0.0, -1.0);
        assert_eq!(a.min(b), Vector3D::new(1.0, 0.0, -2.0));
        assert_eq!(a.max(b), Vector3D::new(3.0, 5.0, -1.0));
    }
}
