//! 2D affine geometry used by every remote entity operation.
//!
//! All types here are plain values with no I/O:
//!
//! - [`Vector`] - a 2D point or displacement
//! - [`Xyr`] - position plus rotation, the wire form of a rigid transform
//! - [`Transform`] - a 3x3 homogeneous affine matrix
//! - [`Aabb`] - an axis-aligned bounding box
//!
//! Coordinates carry no unit of their own. The [`crate::interface`] layer
//! decides whether a value is in client units or in server millimeters.

mod aabb;
mod transform;
mod vector;

use thiserror::Error;

pub use aabb::Aabb;
pub use transform::{Transform, Xyr};
pub use vector::Vector;

/// Degenerate geometric operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Normalizing or measuring the angle of a zero-length vector.
    #[error("Vector has zero length")]
    ZeroLength,

    /// Inverting a matrix whose determinant is zero.
    #[error("Transform matrix is singular")]
    SingularMatrix,

    /// Bounding box whose min corner exceeds its max corner on some axis.
    #[error("Bounding box min corner exceeds max corner")]
    InvertedBounds,

    /// Building a bounding box from no points.
    #[error("Cannot build a bounding box from an empty point set")]
    EmptyPointSet,
}
