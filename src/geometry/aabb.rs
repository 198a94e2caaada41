//! Axis-aligned bounding boxes.

use serde::{Deserialize, Serialize};

use super::{GeometryError, Vector};

/// Axis-aligned bounding box given by its min and max corners.
///
/// Precondition: `min_bound <= max_bound` on both axes. [`Aabb::new`] trusts
/// the caller; [`Aabb::try_new`] checks it. Both axes are closed intervals,
/// so boxes that only touch along an edge still intersect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min_bound: Vector,
    pub max_bound: Vector,
}

impl Aabb {
    pub const fn new(min_bound: Vector, max_bound: Vector) -> Self {
        Self {
            min_bound,
            max_bound,
        }
    }

    pub fn try_new(min_bound: Vector, max_bound: Vector) -> Result<Self, GeometryError> {
        if min_bound.x > max_bound.x || min_bound.y > max_bound.y {
            return Err(GeometryError::InvertedBounds);
        }
        Ok(Self::new(min_bound, max_bound))
    }

    /// Smallest box containing every point.
    pub fn from_points<I>(points: I) -> Result<Self, GeometryError>
    where
        I: IntoIterator<Item = Vector>,
    {
        let mut points = points.into_iter();
        let first = points.next().ok_or(GeometryError::EmptyPointSet)?;
        Ok(points.fold(Self::new(first, first), |acc, p| {
            Self::new(
                Vector::new(acc.min_bound.x.min(p.x), acc.min_bound.y.min(p.y)),
                Vector::new(acc.max_bound.x.max(p.x), acc.max_bound.y.max(p.y)),
            )
        }))
    }

    pub fn center(&self) -> Vector {
        (self.max_bound + self.min_bound) * 0.5
    }

    pub fn extent(&self) -> Vector {
        self.max_bound - self.min_bound
    }

    /// Corners in order: (min, min), (min, max), (max, max), (max, min).
    pub fn corners(&self) -> [Vector; 4] {
        let (lo, hi) = (self.min_bound, self.max_bound);
        [
            Vector::new(lo.x, lo.y),
            Vector::new(lo.x, hi.y),
            Vector::new(hi.x, hi.y),
            Vector::new(hi.x, lo.y),
        ]
    }

    pub fn merged_with(&self, other: &Aabb) -> Aabb {
        Aabb::new(
            Vector::new(
                self.min_bound.x.min(other.min_bound.x),
                self.min_bound.y.min(other.min_bound.y),
            ),
            Vector::new(
                self.max_bound.x.max(other.max_bound.x),
                self.max_bound.y.max(other.max_bound.y),
            ),
        )
    }

    /// True iff the projections overlap on both axes.
    pub fn intersects(&self, other: &Aabb) -> bool {
        if self.max_bound.x < other.min_bound.x || self.min_bound.x > other.max_bound.x {
            return false;
        }
        if self.max_bound.y < other.min_bound.y || self.min_bound.y > other.max_bound.y {
            return false;
        }
        true
    }

    /// True iff the point lies inside or on the boundary.
    pub fn contains_point(&self, point: Vector) -> bool {
        (self.min_bound.x..=self.max_bound.x).contains(&point.x)
            && (self.min_bound.y..=self.max_bound.y).contains(&point.y)
    }

    /// Point in the box nearest to `point` (the point itself when inside).
    pub fn closest_point(&self, point: Vector) -> Vector {
        Vector::new(
            point.x.min(self.max_bound.x).max(self.min_bound.x),
            point.y.min(self.max_bound.y).max(self.min_bound.y),
        )
    }

    pub fn closest_distance(&self, point: Vector) -> f64 {
        self.closest_point(point).distance_to(point)
    }

    /// Corner farthest from `point`. Ties go to the earliest corner.
    pub fn farthest_point(&self, point: Vector) -> Vector {
        let corners = self.corners();
        let mut best = corners[0];
        let mut best_distance = best.distance_to(point);
        for corner in &corners[1..] {
            let distance = corner.distance_to(point);
            if distance > best_distance {
                best = *corner;
                best_distance = distance;
            }
        }
        best
    }

    pub fn farthest_distance(&self, point: Vector) -> f64 {
        self.farthest_point(point).distance_to(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Aabb {
        Aabb::new(Vector::new(x0, y0), Vector::new(x1, y1))
    }

    #[test]
    fn test_center_extent_corners() {
        let b = square(0.0, 0.0, 4.0, 2.0);
        assert_eq!(b.center(), Vector::new(2.0, 1.0));
        assert_eq!(b.extent(), Vector::new(4.0, 2.0));
        assert_eq!(
            b.corners(),
            [
                Vector::new(0.0, 0.0),
                Vector::new(0.0, 2.0),
                Vector::new(4.0, 2.0),
                Vector::new(4.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_try_new_rejects_inverted_bounds() {
        assert!(Aabb::try_new(Vector::ORIGIN, Vector::new(1.0, 1.0)).is_ok());
        assert!(Aabb::try_new(Vector::ORIGIN, Vector::ORIGIN).is_ok());
        assert_eq!(
            Aabb::try_new(Vector::new(2.0, 0.0), Vector::new(1.0, 1.0)),
            Err(GeometryError::InvertedBounds)
        );
    }

    #[test]
    fn test_merged_contains_all_corners() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        let b = square(-3.0, 0.5, -2.0, 4.0);
        let merged = a.merged_with(&b);
        assert_eq!(merged, square(-3.0, 0.0, 1.0, 4.0));
        for corner in a.corners().iter().chain(b.corners().iter()) {
            assert!(merged.contains_point(*corner), "{} outside merged box", corner);
        }
    }

    #[test]
    fn test_intersects_is_symmetric() {
        let boxes = [
            square(0.0, 0.0, 1.0, 1.0),
            square(0.5, 0.5, 2.0, 2.0),
            square(1.0, 0.0, 2.0, 1.0),
            square(5.0, 5.0, 6.0, 6.0),
            square(-1.0, -1.0, 3.0, 3.0),
        ];
        for a in &boxes {
            for b in &boxes {
                assert_eq!(a.intersects(b), b.intersects(a));
            }
        }
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        assert!(a.intersects(&square(1.0, 0.0, 2.0, 1.0)));
        assert!(a.intersects(&square(1.0, 1.0, 2.0, 2.0)));
        assert!(!a.intersects(&square(1.0001, 0.0, 2.0, 1.0)));
        assert!(!a.intersects(&square(0.0, -2.0, 1.0, -0.5)));
    }

    #[test]
    fn test_contains_point_boundary() {
        let a = square(0.0, 0.0, 1.0, 1.0);
        assert!(a.contains_point(Vector::new(0.0, 1.0)));
        assert!(a.contains_point(Vector::new(0.5, 0.5)));
        assert!(!a.contains_point(Vector::new(1.5, 0.5)));
    }

    #[test]
    fn test_closest_point_and_distance() {
        let a = square(0.0, 0.0, 2.0, 2.0);
        assert_eq!(a.closest_point(Vector::new(1.0, 1.0)), Vector::new(1.0, 1.0));
        assert_eq!(a.closest_point(Vector::new(5.0, 1.0)), Vector::new(2.0, 1.0));
        assert_eq!(a.closest_point(Vector::new(-3.0, -4.0)), Vector::ORIGIN);
        assert_eq!(a.closest_distance(Vector::new(-3.0, -4.0)), 5.0);
        assert_eq!(a.closest_distance(Vector::new(1.0, 1.5)), 0.0);
    }

    #[test]
    fn test_farthest_point_and_distance() {
        let a = square(0.0, 0.0, 3.0, 4.0);
        assert_eq!(a.farthest_point(Vector::ORIGIN), Vector::new(3.0, 4.0));
        assert_eq!(a.farthest_distance(Vector::ORIGIN), 5.0);
        assert_eq!(a.farthest_point(Vector::new(3.0, 0.0)), Vector::new(0.0, 4.0));
    }

    #[test]
    fn test_from_points() {
        let b = Aabb::from_points([
            Vector::new(1.0, -1.0),
            Vector::new(-2.0, 3.0),
            Vector::new(0.5, 0.5),
        ])
        .unwrap();
        assert_eq!(b, square(-2.0, -1.0, 1.0, 3.0));
        assert_eq!(
            Aabb::from_points(Vec::new()),
            Err(GeometryError::EmptyPointSet)
        );
    }
}
