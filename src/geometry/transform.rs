//! Homogeneous 2D transforms and their `(x, y, r)` wire form.

use std::fmt;
use std::ops::Mul;

use serde::{Deserialize, Serialize};

use super::{GeometryError, Vector};

/// Values smaller than this are printed as zero by `Display`.
const DISPLAY_SUPPRESS: f64 = 1e-6;

/// Position plus rotation (radians), the canonical wire form of a rigid
/// transform. Serializes as `{"X": x, "Y": y, "R": r}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Xyr {
    #[serde(rename = "X")]
    pub x: f64,
    #[serde(rename = "Y")]
    pub y: f64,
    #[serde(rename = "R")]
    pub r: f64,
}

impl Xyr {
    pub const fn new(x: f64, y: f64, r: f64) -> Self {
        Self { x, y, r }
    }

    pub const fn identity() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn position(&self) -> Vector {
        Vector::new(self.x, self.y)
    }
}

/// A 3x3 homogeneous affine transform stored row-major.
///
/// Composition is plain matrix multiplication: `a * b` is `a.matrix @ b.matrix`,
/// so `(a * b) * v` applies `b` first and then `a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: [[f64; 3]; 3],
}

impl Transform {
    pub const fn from_matrix(matrix: [[f64; 3]; 3]) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &[[f64; 3]; 3] {
        &self.matrix
    }

    pub const fn identity() -> Self {
        Self::from_matrix([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// Counter-clockwise rotation about the origin.
    pub fn rotate(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::from_matrix([[c, -s, 0.0], [s, c, 0.0], [0.0, 0.0, 1.0]])
    }

    pub fn translate(x: f64, y: f64) -> Self {
        Self::from_matrix([[1.0, 0.0, x], [0.0, 1.0, y], [0.0, 0.0, 1.0]])
    }

    pub fn translate_by(offset: Vector) -> Self {
        Self::translate(offset.x, offset.y)
    }

    pub fn from_xyr(xyr: Xyr) -> Self {
        let (s, c) = xyr.r.sin_cos();
        Self::from_matrix([[c, -s, xyr.x], [s, c, xyr.y], [0.0, 0.0, 1.0]])
    }

    /// Translation column plus the rotation angle read from the first column.
    /// Scale or shear in the matrix is discarded.
    pub fn to_xyr(&self) -> Xyr {
        let m = &self.matrix;
        Xyr::new(m[0][2], m[1][2], m[1][0].atan2(m[0][0]))
    }

    /// Apply to a point with implicit homogeneous weight 1.
    pub fn apply(&self, point: Vector) -> Vector {
        let m = &self.matrix;
        Vector::new(
            m[0][0] * point.x + m[0][1] * point.y + m[0][2],
            m[1][0] * point.x + m[1][1] * point.y + m[1][2],
        )
    }

    pub fn determinant(&self) -> f64 {
        let m = &self.matrix;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Matrix inverse via the adjugate.
    pub fn invert(&self) -> Result<Transform, GeometryError> {
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(GeometryError::SingularMatrix);
        }

        let m = &self.matrix;
        let cofactor = |r0: usize, r1: usize, c0: usize, c1: usize| {
            m[r0][c0] * m[r1][c1] - m[r0][c1] * m[r1][c0]
        };

        // Transposed cofactor matrix
        let adj = [
            [cofactor(1, 2, 1, 2), -cofactor(0, 2, 1, 2), cofactor(0, 1, 1, 2)],
            [-cofactor(1, 2, 0, 2), cofactor(0, 2, 0, 2), -cofactor(0, 1, 0, 2)],
            [cofactor(1, 2, 0, 1), -cofactor(0, 2, 0, 1), cofactor(0, 1, 0, 1)],
        ];

        let mut inv = [[0.0; 3]; 3];
        for (r, row) in adj.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                inv[r][c] = value / det;
            }
        }
        Ok(Transform::from_matrix(inv))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        let (a, b) = (&self.matrix, &rhs.matrix);
        let mut out = [[0.0; 3]; 3];
        for (r, row) in out.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| a[r][k] * b[k][c]).sum();
            }
        }
        Transform::from_matrix(out)
    }
}

impl Mul<Vector> for Transform {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        self.apply(rhs)
    }
}

impl From<Xyr> for Transform {
    fn from(xyr: Xyr) -> Self {
        Transform::from_xyr(xyr)
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.matrix.iter().enumerate() {
            f.write_str(if r == 0 { "[[" } else { " [" })?;
            for (c, value) in row.iter().enumerate() {
                let value = if value.abs() < DISPLAY_SUPPRESS { 0.0 } else { *value };
                if c > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:>10.6}", value)?;
            }
            f.write_str(if r == 2 { "]]" } else { "]\n" })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    const EPS: f64 = 1e-9;

    fn assert_transform_close(a: &Transform, b: &Transform) {
        for r in 0..3 {
            for c in 0..3 {
                assert!(
                    (a.matrix()[r][c] - b.matrix()[r][c]).abs() < EPS,
                    "matrices differ at ({}, {}):\n{}\nvs\n{}",
                    r,
                    c,
                    a,
                    b
                );
            }
        }
    }

    fn samples() -> Vec<Transform> {
        vec![
            Transform::identity(),
            Transform::rotate(0.3),
            Transform::translate(5.0, -2.0),
            Transform::from_xyr(Xyr::new(1.0, 2.0, -2.5)),
            Transform::translate(3.0, 4.0) * Transform::rotate(PI),
        ]
    }

    #[test]
    fn test_rotate_quarter_turn() {
        let v = Transform::rotate(FRAC_PI_2) * Vector::new(1.0, 0.0);
        assert!((v.x - 0.0).abs() < EPS);
        assert!((v.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_vector_times_transform_matches_transform_times_vector() {
        let t = Transform::from_xyr(Xyr::new(1.0, -1.0, 0.7));
        let v = Vector::new(2.0, 3.0);
        assert_eq!(v * t, t * v);
        assert_eq!(v.transformed(&t), t * v);
    }

    #[test]
    fn test_composition_applies_right_operand_first() {
        let rotate = Transform::rotate(FRAC_PI_2);
        let shift = Transform::translate(10.0, 0.0);

        // Shift then rotate: (1,0) -> (11,0) -> (0,11)
        let v = (rotate * shift) * Vector::AXIS_X;
        assert!((v.x - 0.0).abs() < EPS && (v.y - 11.0).abs() < EPS);

        // Rotate then shift: (1,0) -> (0,1) -> (10,1)
        let v = (shift * rotate) * Vector::AXIS_X;
        assert!((v.x - 10.0).abs() < EPS && (v.y - 1.0).abs() < EPS);
    }

    #[test]
    fn test_composition_is_associative() {
        let a = Transform::rotate(0.4);
        let b = Transform::translate(1.0, 2.0);
        let c = Transform::from_xyr(Xyr::new(-3.0, 0.5, 1.1));
        assert_transform_close(&((a * b) * c), &(a * (b * c)));
    }

    #[test]
    fn test_double_inversion_recovers_transform() {
        for t in samples() {
            let back = t.invert().unwrap().invert().unwrap();
            assert_transform_close(&back, &t);
        }
    }

    #[test]
    fn test_transform_times_inverse_is_identity() {
        for t in samples() {
            assert_transform_close(&(t * t.invert().unwrap()), &Transform::identity());
        }
    }

    #[test]
    fn test_invert_singular_matrix_fails() {
        let flat = Transform::from_matrix([[1.0, 2.0, 0.0], [2.0, 4.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(flat.invert(), Err(GeometryError::SingularMatrix));
    }

    #[test]
    fn test_xyr_round_trip() {
        for r in [-3.0, -FRAC_PI_2, 0.0, 0.25, FRAC_PI_2, PI] {
            let t = Transform::from_xyr(Xyr::new(4.0, -7.5, r));
            let back = Transform::from_xyr(t.to_xyr());
            assert_transform_close(&back, &t);

            let xyr = t.to_xyr();
            assert!((xyr.x - 4.0).abs() < EPS);
            assert!((xyr.y + 7.5).abs() < EPS);
            assert!((xyr.r - r).abs() < EPS);
        }
    }

    #[test]
    fn test_xyr_wire_format() {
        let xyr: Xyr = serde_json::from_str(r#"{"X": 5, "Y": 5, "R": 1.5}"#).unwrap();
        assert_eq!(xyr, Xyr::new(5.0, 5.0, 1.5));
        assert_eq!(Xyr::default(), Xyr::identity());
    }

    #[test]
    fn test_display_suppresses_tiny_values() {
        let text = Transform::rotate(FRAC_PI_2).to_string();
        assert!(!text.contains('e'), "unexpected exponent in {}", text);
        assert!(text.starts_with("[["));
        assert!(text.ends_with("]]"));
        assert_eq!(text.lines().count(), 3);
    }
}
