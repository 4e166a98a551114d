//! Basis adjustments between the authoring tool and the Unity-style consumer
//!
//! Models arrive in the authoring tool's natural basis while placement
//! parameters (yaw, pitch, roll, scale) are expressed in the consumer's
//! left-handed, clockwise convention. The two fixed matrices below encode the
//! offset between those conventions.

use super::{MatrixLayout, Result, Transform};

/// Pitch of -90° about X, row-major
///
/// Equal to `Transform::rotation(0.0, -90.0, 0.0, CounterClockwise)` with the
/// trigonometric round-off removed.
#[rustfmt::skip]
pub const AUTHORING_TOOL_BASIS_ADJUSTMENT: [f64; 16] = [
    1.0,  0.0, 0.0, 0.0,
    0.0,  0.0, 1.0, 0.0,
    0.0, -1.0, 0.0, 0.0,
    0.0,  0.0, 0.0, 1.0,
];

/// Half turns of yaw and roll in the Unity convention, row-major
///
/// Equal to `Transform::unity_rotation(180.0, 0.0, 180.0)`: Y and Z flip sign.
#[rustfmt::skip]
pub const UNITY_AXIS_FLIP: [f64; 16] = [
    1.0,  0.0,  0.0, 0.0,
    0.0, -1.0,  0.0, 0.0,
    0.0,  0.0, -1.0, 0.0,
    0.0,  0.0,  0.0, 1.0,
];

pub fn authoring_tool_basis_adjustment() -> Transform {
    Transform::from_array(&AUTHORING_TOOL_BASIS_ADJUSTMENT, MatrixLayout::RowMajor)
}

pub fn unity_axis_flip() -> Transform {
    Transform::from_array(&UNITY_AXIS_FLIP, MatrixLayout::RowMajor)
}

/// Target world rotation and scale in the Unity convention
pub fn unity_world_transform(
    yaw: f64,
    pitch: f64,
    roll: f64,
    scale_x: f64,
    scale_y: f64,
    scale_z: f64,
) -> Transform {
    Transform::unity_rotation(yaw, pitch, roll) * Transform::scale(scale_x, scale_y, scale_z)
}

/// Local transform that reproduces a Unity-observed world placement
///
/// Computes `(R · S) · (A · B)⁻¹` where `R · S` is the target rotation and
/// scale, `A` is [`AUTHORING_TOOL_BASIS_ADJUSTMENT`] and `B` is the source
/// basis. Re-composing the result with `A · B` yields `R · S` again.
///
/// # Errors
///
/// [`TransformError::Singular`](super::TransformError::Singular) when
/// `A · B` cannot be inverted (a degenerate source basis).
pub fn unity_local_rotation(
    source_basis: &Transform,
    yaw: f64,
    pitch: f64,
    roll: f64,
    scale_x: f64,
    scale_y: f64,
    scale_z: f64,
) -> Result<Transform> {
    let target = unity_world_transform(yaw, pitch, roll, scale_x, scale_y, scale_z);
    let basis = authoring_tool_basis_adjustment() * *source_basis;
    Ok(target * basis.try_inverse()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{RotationWinding, TransformError};

    fn neutral_target(basis: &Transform) -> Result<Transform> {
        unity_local_rotation(basis, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn test_named_constants_match_rotations() {
        let pitch = Transform::rotation(0.0, -90.0, 0.0, RotationWinding::CounterClockwise);
        assert!(pitch.approx_eq(&authoring_tool_basis_adjustment(), 1e-15));

        let flip = Transform::unity_rotation(180.0, 0.0, 180.0);
        assert!(flip.approx_eq(&unity_axis_flip(), 1e-15));
    }

    #[test]
    fn test_identity_basis_neutral_target() {
        let local = neutral_target(&Transform::identity()).unwrap();
        // Only the inverse adjustment (a +90° pitch) remains
        let expected = Transform::rotation(0.0, 90.0, 0.0, RotationWinding::CounterClockwise);
        assert!(local.approx_eq(&expected, 1e-15));
    }

    #[test]
    fn test_recomposition_reproduces_world_transform() {
        let source = Transform::rotation(12.0, 80.0, -35.0, RotationWinding::CounterClockwise)
            * Transform::scale(0.01, 0.01, 0.01);
        let local = unity_local_rotation(&source, 45.0, 10.0, 180.0, 2.0, 2.0, 3.0).unwrap();

        let recomposed = local * authoring_tool_basis_adjustment() * source;
        let world = unity_world_transform(45.0, 10.0, 180.0, 2.0, 2.0, 3.0);
        assert!(recomposed.approx_eq(&world, 1e-9));
    }

    #[test]
    fn test_degenerate_source_basis() {
        let flat = Transform::scale(1.0, 1.0, 0.0);
        assert_eq!(neutral_target(&flat), Err(TransformError::Singular));
    }
}
