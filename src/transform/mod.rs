//! # Homogeneous Transform Composition
//!
//! [`Transform`] is a 4x4 homogeneous matrix used to rotate, scale and place
//! vertex data. Composition follows the column-vector convention: the matrix
//! on the right is applied first, so `b * a` means "apply `a`, then `b`"
//! (spelled `a.then(&b)`).
//!
//! ## Memory Layout
//!
//! A `Transform` is a mathematical matrix; rows and columns only acquire an
//! order when it is flattened to, or parsed from, 16 numbers. That choice is
//! made explicitly at the boundary through [`MatrixLayout`]:
//!
//! - [`MatrixLayout::RowMajor`]: four consecutive rows (the engine's convention)
//! - [`MatrixLayout::ColumnMajor`]: four consecutive columns (glTF `node.matrix`,
//!   3D Tiles `transform`)
//!
//! ## Rotations
//!
//! Angles are given in degrees. Each elementary rotation is counter-clockwise
//! for a positive angle unless [`RotationWinding::Clockwise`] is requested.
//!
//! ```rust
//! use geoframe::transform::{RotationWinding, Transform};
//!
//! let yaw = Transform::rotation(90.0, 0.0, 0.0, RotationWinding::CounterClockwise);
//! let v = yaw.multiply_vector(&[1.0, 1.0, 1.0, 1.0]);
//! assert!((v[0] + 1.0).abs() < 1e-12 && (v[1] - 1.0).abs() < 1e-12);
//! ```

pub mod authoring;
pub mod errors;

use nalgebra::{Matrix4, Vector3, Vector4};

use crate::constants::DEG2RAD;
use crate::coordinates::Cartesian3;
pub use errors::{Result, TransformError};

/// Ordering of a flat 16-element matrix buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatrixLayout {
    /// Elements `0..4` are the first row
    #[default]
    RowMajor,
    /// Elements `0..4` are the first column
    ColumnMajor,
}

/// Direction of a positive rotation angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RotationWinding {
    #[default]
    CounterClockwise,
    /// Every angle is negated before the elementary matrix is built
    Clockwise,
}

impl RotationWinding {
    fn apply(self, radians: f64) -> f64 {
        match self {
            RotationWinding::CounterClockwise => radians,
            RotationWinding::Clockwise => -radians,
        }
    }
}

/// A 4x4 homogeneous transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Matrix4<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Transform {
            matrix: Matrix4::identity(),
        }
    }

    pub fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Transform { matrix }
    }

    /// Build from four rows
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        Transform {
            matrix: Matrix4::from_fn(|r, c| rows[r][c]),
        }
    }

    /// Interpret a flat 16-element buffer in the given layout
    pub fn from_array(values: &[f64; 16], layout: MatrixLayout) -> Self {
        let matrix = match layout {
            MatrixLayout::RowMajor => Matrix4::from_row_slice(values),
            MatrixLayout::ColumnMajor => Matrix4::from_column_slice(values),
        };
        Transform { matrix }
    }

    /// Like [`from_array`](Self::from_array) for buffers of unchecked length
    ///
    /// Scene JSON hands matrices over as plain number lists; anything but
    /// exactly 16 elements is rejected.
    pub fn from_slice(values: &[f64], layout: MatrixLayout) -> Result<Self> {
        let array: &[f64; 16] = values
            .try_into()
            .map_err(|_| TransformError::WrongLength(values.len()))?;
        Ok(Self::from_array(array, layout))
    }

    /// Flatten to 16 elements in the given layout
    pub fn to_array(&self, layout: MatrixLayout) -> [f64; 16] {
        // nalgebra storage is column-major
        let source = match layout {
            MatrixLayout::RowMajor => self.matrix.transpose(),
            MatrixLayout::ColumnMajor => self.matrix,
        };
        let mut out = [0.0; 16];
        out.copy_from_slice(source.as_slice());
        out
    }

    pub fn to_rows(&self) -> [[f64; 4]; 4] {
        let mut rows = [[0.0; 4]; 4];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, value) in row.iter_mut().enumerate() {
                *value = self.matrix[(r, c)];
            }
        }
        rows
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    pub fn get(&self, row: usize, column: usize) -> f64 {
        self.matrix[(row, column)]
    }

    /// The first three rows of a column, e.g. a basis axis or the translation
    pub fn column3(&self, column: usize) -> Cartesian3 {
        Cartesian3::new(
            self.matrix[(0, column)],
            self.matrix[(1, column)],
            self.matrix[(2, column)],
        )
    }

    /// Translation part (fourth column)
    pub fn translation_part(&self) -> Cartesian3 {
        self.column3(3)
    }

    /// Diagonal scale with homogeneous element 1
    pub fn scale(x: f64, y: f64, z: f64) -> Self {
        Transform {
            matrix: Matrix4::new_nonuniform_scaling(&Vector3::new(x, y, z)),
        }
    }

    /// Identity with the translation column populated
    pub fn translation(x: f64, y: f64, z: f64) -> Self {
        Transform {
            matrix: Matrix4::new_translation(&Vector3::new(x, y, z)),
        }
    }

    /// Rotation about the X axis (pitch)
    pub fn rotation_x(degrees: f64, winding: RotationWinding) -> Self {
        let (s, c) = winding.apply(degrees * DEG2RAD).sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0,   c,  -s, 0.0,
            0.0,   s,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Transform { matrix }
    }

    /// Rotation about the Y axis (roll)
    ///
    /// The sine terms sit at `(0, 2) = -s` and `(2, 0) = s`.
    pub fn rotation_y(degrees: f64, winding: RotationWinding) -> Self {
        let (s, c) = winding.apply(degrees * DEG2RAD).sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix4::new(
              c, 0.0,  -s, 0.0,
            0.0, 1.0, 0.0, 0.0,
              s, 0.0,   c, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Transform { matrix }
    }

    /// Rotation about the Z axis (yaw)
    pub fn rotation_z(degrees: f64, winding: RotationWinding) -> Self {
        let (s, c) = winding.apply(degrees * DEG2RAD).sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix4::new(
              c,  -s, 0.0, 0.0,
              s,   c, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Transform { matrix }
    }

    /// Compose yaw (Z), pitch (X) and roll (Y) rotations, angles in degrees
    ///
    /// Yaw is applied first, then pitch, then roll: `roll * pitch * yaw`.
    pub fn rotation(yaw: f64, pitch: f64, roll: f64, winding: RotationWinding) -> Self {
        Self::rotation_z(yaw, winding)
            .then(&Self::rotation_x(pitch, winding))
            .then(&Self::rotation_y(roll, winding))
    }

    /// Rotation in Unity's left-handed, clockwise convention
    ///
    /// The yaw and roll slots trade places and every angle turns clockwise.
    pub fn unity_rotation(yaw: f64, pitch: f64, roll: f64) -> Self {
        Self::rotation(roll, pitch, yaw, RotationWinding::Clockwise)
    }

    /// Apply `self` first, then `next`
    pub fn then(&self, next: &Transform) -> Transform {
        Transform {
            matrix: next.matrix * self.matrix,
        }
    }

    /// Homogeneous matrix-vector product
    ///
    /// `w` is carried through; there is no projective divide.
    pub fn multiply_vector(&self, vector: &[f64; 4]) -> [f64; 4] {
        let v = self.matrix * Vector4::new(vector[0], vector[1], vector[2], vector[3]);
        [v.x, v.y, v.z, v.w]
    }

    /// Transform a position (`w = 1`, translation applies)
    pub fn transform_point(&self, point: &Cartesian3) -> Cartesian3 {
        let [x, y, z, _] = self.multiply_vector(&[point.x, point.y, point.z, 1.0]);
        Cartesian3::new(x, y, z)
    }

    /// Transform a direction (`w = 0`, translation ignored)
    pub fn transform_direction(&self, direction: &Cartesian3) -> Cartesian3 {
        let [x, y, z, _] = self.multiply_vector(&[direction.x, direction.y, direction.z, 0.0]);
        Cartesian3::new(x, y, z)
    }

    pub fn transpose(&self) -> Transform {
        Transform {
            matrix: self.matrix.transpose(),
        }
    }

    /// General numeric inverse
    ///
    /// Needed for scaled or composed matrices whose rotation block is not
    /// orthonormal.
    pub fn try_inverse(&self) -> Result<Transform> {
        self.matrix
            .try_inverse()
            .map(Transform::from_matrix)
            .ok_or(TransformError::Singular)
    }

    /// Inverse of a rigid transform (orthonormal rotation plus translation)
    ///
    /// Uses the transposed rotation block and `-Rᵀ t`; the result is only
    /// meaningful when the upper-left 3x3 block is orthonormal.
    pub fn rigid_inverse(&self) -> Transform {
        let mut rotation_t = self.without_translation().transpose();
        let t = rotation_t.transform_direction(&self.translation_part());
        rotation_t.matrix[(0, 3)] = -t.x;
        rotation_t.matrix[(1, 3)] = -t.y;
        rotation_t.matrix[(2, 3)] = -t.z;
        rotation_t
    }

    /// Copy with the translation column reset to zero
    pub fn without_translation(&self) -> Transform {
        let mut matrix = self.matrix;
        matrix[(0, 3)] = 0.0;
        matrix[(1, 3)] = 0.0;
        matrix[(2, 3)] = 0.0;
        Transform { matrix }
    }

    /// Elementwise comparison with an absolute tolerance
    pub fn approx_eq(&self, other: &Transform, epsilon: f64) -> bool {
        self.matrix
            .iter()
            .zip(other.matrix.iter())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            matrix: self.matrix * rhs.matrix,
        }
    }
}

impl std::fmt::Display for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.to_rows() {
            writeln!(
                f,
                "[{:>18.9} {:>18.9} {:>18.9} {:>18.9}]",
                row[0], row[1], row[2], row[3]
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    const ONES: [f64; 4] = [1.0, 1.0, 1.0, 1.0];

    fn assert_vec4_eq(actual: [f64; 4], expected: [f64; 4], epsilon: f64) {
        for i in 0..4 {
            assert_abs_diff_eq!(actual[i], expected[i], epsilon = epsilon);
        }
    }

    #[test]
    fn test_layouts_differ_by_transpose() {
        let values: [f64; 16] = std::array::from_fn(|i| i as f64);
        let row = Transform::from_array(&values, MatrixLayout::RowMajor);
        let column = Transform::from_array(&values, MatrixLayout::ColumnMajor);

        assert_eq!(row.get(0, 1), 1.0);
        assert_eq!(row.get(1, 0), 4.0);
        assert_eq!(column.get(0, 1), 4.0);
        assert_eq!(row.transpose(), column);

        assert_eq!(row.to_array(MatrixLayout::RowMajor), values);
        assert_eq!(column.to_array(MatrixLayout::ColumnMajor), values);
        assert_eq!(
            row.to_array(MatrixLayout::ColumnMajor),
            column.to_array(MatrixLayout::RowMajor)
        );
    }

    #[test]
    fn test_from_slice_checks_length() {
        assert_eq!(
            Transform::from_slice(&[0.0; 15], MatrixLayout::RowMajor),
            Err(TransformError::WrongLength(15))
        );
        let identity = [
            1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
        ];
        assert_eq!(
            Transform::from_slice(&identity, MatrixLayout::ColumnMajor),
            Ok(Transform::identity())
        );
    }

    #[test]
    fn test_scale_matrix() {
        let m = Transform::scale(1.0, 2.0, 3.0);
        assert_eq!(m.multiply_vector(&ONES), [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(m.get(3, 3), 1.0);
    }

    #[test]
    fn test_translation_matrix() {
        let m = Transform::translation(10.0, -5.0, 2.5);
        assert_eq!(m.multiply_vector(&ONES), [11.0, -4.0, 3.5, 1.0]);
        // Directions are unaffected
        let direction = [1.0, 1.0, 1.0, 0.0];
        assert_eq!(m.multiply_vector(&direction), direction);
        assert_eq!(m.translation_part(), Cartesian3::new(10.0, -5.0, 2.5));
    }

    #[test]
    fn test_no_projective_divide() {
        let m = Transform::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 2.0],
        ]);
        assert_eq!(m.multiply_vector(&ONES), [1.0, 1.0, 1.0, 2.0]);
    }

    #[rstest]
    #[case::yaw(90.0, 0.0, 0.0, [-1.0, 1.0, 1.0, 1.0])]
    #[case::pitch(0.0, 90.0, 0.0, [1.0, -1.0, 1.0, 1.0])]
    #[case::roll(0.0, 0.0, 90.0, [-1.0, 1.0, 1.0, 1.0])]
    #[case::yaw_then_pitch(90.0, 90.0, 0.0, [-1.0, -1.0, 1.0, 1.0])]
    fn test_single_axis_rotations(
        #[case] yaw: f64,
        #[case] pitch: f64,
        #[case] roll: f64,
        #[case] expected: [f64; 4],
    ) {
        let m = Transform::rotation(yaw, pitch, roll, RotationWinding::CounterClockwise);
        assert_vec4_eq(m.multiply_vector(&ONES), expected, 1e-12);
    }

    #[test]
    fn test_clockwise_negates_angles() {
        let ccw = Transform::rotation(30.0, -45.0, 60.0, RotationWinding::CounterClockwise);
        let cw = Transform::rotation(-30.0, 45.0, -60.0, RotationWinding::Clockwise);
        assert!(ccw.approx_eq(&cw, 1e-15));
    }

    #[test]
    fn test_rotation_order_is_roll_pitch_yaw() {
        let composed = Transform::rotation(20.0, 30.0, 40.0, RotationWinding::CounterClockwise);
        let manual = Transform::rotation_y(40.0, RotationWinding::CounterClockwise)
            * Transform::rotation_x(30.0, RotationWinding::CounterClockwise)
            * Transform::rotation_z(20.0, RotationWinding::CounterClockwise);
        assert!(composed.approx_eq(&manual, 1e-14));
    }

    #[test]
    fn test_unity_rotation_swaps_yaw_and_roll() {
        let unity = Transform::unity_rotation(10.0, 20.0, 30.0);
        let general = Transform::rotation(30.0, 20.0, 10.0, RotationWinding::Clockwise);
        assert_eq!(unity, general);
    }

    #[test]
    fn test_unity_rotation_half_turn_reference() {
        #[rustfmt::skip]
        let expected = [
            1.0,  0.0,  0.0, 0.0,
            0.0, -1.0,  0.0, 0.0,
            0.0,  0.0, -1.0, 0.0,
            0.0,  0.0,  0.0, 1.0,
        ];
        let m = Transform::unity_rotation(180.0, 0.0, 180.0);
        let actual = m.to_array(MatrixLayout::ColumnMajor);
        for i in 0..16 {
            assert_abs_diff_eq!(actual[i], expected[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn test_then_matches_left_multiplication() {
        let a = Transform::scale(2.0, 2.0, 2.0);
        let b = Transform::translation(1.0, 0.0, 0.0);
        // Scale first, then translate
        let m = a.then(&b);
        assert_eq!(m, b * a);
        assert_eq!(m.multiply_vector(&ONES), [3.0, 2.0, 2.0, 1.0]);
    }

    #[test]
    fn test_rotation_transpose_is_inverse() {
        let r = Transform::rotation(33.0, -12.0, 71.0, RotationWinding::CounterClockwise);
        assert!((r * r.transpose()).approx_eq(&Transform::identity(), 1e-14));
        assert!(r.try_inverse().unwrap().approx_eq(&r.transpose(), 1e-14));
    }

    #[test]
    fn test_rigid_inverse() {
        let m = Transform::rotation(45.0, 10.0, -30.0, RotationWinding::CounterClockwise)
            .then(&Transform::translation(100.0, -20.0, 5.0));
        let inverse = m.rigid_inverse();
        assert!((inverse * m).approx_eq(&Transform::identity(), 1e-12));
        assert!(inverse.approx_eq(&m.try_inverse().unwrap(), 1e-12));
    }

    #[test]
    fn test_singular_matrix() {
        let m = Transform::scale(1.0, 0.0, 1.0);
        assert_eq!(m.try_inverse(), Err(TransformError::Singular));
    }

    #[test]
    fn test_scaled_inverse() {
        let m = Transform::scale(2.0, 4.0, 0.5).then(&Transform::rotation(
            15.0,
            0.0,
            0.0,
            RotationWinding::CounterClockwise,
        ));
        let inverse = m.try_inverse().unwrap();
        let p = Cartesian3::new(3.0, -7.0, 11.0);
        let back = inverse.transform_point(&m.transform_point(&p));
        assert!(back.equals_epsilon(&p, 1e-12));
    }

    #[test]
    fn test_display_has_four_rows() {
        let text = Transform::identity().to_string();
        assert_eq!(text.lines().count(), 4);
    }
}
