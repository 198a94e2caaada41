//! 2D vector value type.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::{GeometryError, Transform};

/// A 2D point or displacement.
///
/// Every operation returns a new value; operands are never mutated.
/// Serializes as `{"X": x, "Y": y}` to match the server's point format.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
}

impl Vector {
    pub const ORIGIN: Vector = Vector { x: 0.0, y: 0.0 };
    pub const AXIS_X: Vector = Vector { x: 1.0, y: 0.0 };
    pub const AXIS_Y: Vector = Vector { x: 0.0, y: 1.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length.
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Vector of length one pointing the same way.
    ///
    /// A zero-length vector divides by zero and yields NaN components.
    /// Use [`Vector::try_unit`] when the input may be degenerate.
    pub fn unit(&self) -> Vector {
        *self / self.norm()
    }

    /// Like [`Vector::unit`] but fails with [`GeometryError::ZeroLength`].
    pub fn try_unit(&self) -> Result<Vector, GeometryError> {
        let norm = self.norm();
        if norm == 0.0 {
            return Err(GeometryError::ZeroLength);
        }
        Ok(*self / norm)
    }

    pub fn dot(&self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 3D cross product `self x other`.
    pub fn cross(&self, other: Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Counter-clockwise angle from `self` to `other`, in `-pi..=pi`.
    pub fn signed_angle(&self, other: Vector) -> f64 {
        self.cross(other).atan2(self.dot(other))
    }

    /// Unsigned angle between the two vectors, in `0..=pi`.
    ///
    /// NaN when either vector has zero length. See [`Vector::try_angle_to`].
    pub fn angle_to(&self, other: Vector) -> f64 {
        (self.dot(other) / (self.norm() * other.norm())).acos()
    }

    /// Like [`Vector::angle_to`] but fails with [`GeometryError::ZeroLength`].
    pub fn try_angle_to(&self, other: Vector) -> Result<f64, GeometryError> {
        let denom = self.norm() * other.norm();
        if denom == 0.0 {
            return Err(GeometryError::ZeroLength);
        }
        // Rounding can push the cosine slightly outside [-1, 1]
        Ok((self.dot(other) / denom).clamp(-1.0, 1.0).acos())
    }

    pub fn distance_to(&self, other: Vector) -> f64 {
        (*self - other).norm()
    }

    /// Apply `transform` to this vector treated as a point (weight 1).
    pub fn transformed(&self, transform: &Transform) -> Vector {
        transform.apply(*self)
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        Vector::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        Vector::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        rhs * self
    }
}

/// `v * t` applies the transform to the point, same as `t * v`.
impl Mul<Transform> for Vector {
    type Output = Vector;

    fn mul(self, rhs: Transform) -> Vector {
        rhs.apply(self)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    fn div(self, rhs: f64) -> Vector {
        Vector::new(self.x / rhs, self.y / rhs)
    }
}

impl From<[f64; 2]> for Vector {
    fn from([x, y]: [f64; 2]) -> Self {
        Vector::new(x, y)
    }
}

impl From<(f64, f64)> for Vector {
    fn from((x, y): (f64, f64)) -> Self {
        Vector::new(x, y)
    }
}

impl From<Vector> for (f64, f64) {
    fn from(v: Vector) -> Self {
        (v.x, v.y)
    }
}
