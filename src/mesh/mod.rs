//! Vertex position buffers
//!
//! glTF stores `POSITION` accessors as packed little-endian `f32` triples,
//! optionally interleaved with other attributes. The functions here rewrite
//! those positions in place through a [`Transform`] and measure their extent.

use byteorder::{ByteOrder, LittleEndian};
use log::debug;
use thiserror::Error;

use crate::coordinates::Cartesian3;
use crate::transform::Transform;

/// Size in bytes of one `VEC3` of `f32`
pub const POSITION_SIZE: usize = 12;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    #[error("Position array length {0} is not a multiple of 3")]
    NotVec3(usize),

    #[error("Byte stride {0} is smaller than a VEC3 of f32")]
    StrideTooSmall(usize),

    #[error("Buffer holds {available} bytes but {needed} are required")]
    BufferTooSmall { needed: usize, available: usize },

    #[error("Range of {count} positions at {byte_offset}, stride {stride}, overflows usize")]
    ByteRangeOverflow {
        byte_offset: usize,
        stride: usize,
        count: usize,
    },
}

pub type Result<T> = std::result::Result<T, MeshError>;

/// Transform packed `[x, y, z, x, y, z, ...]` positions in place
///
/// Each vertex is treated as a point (`w = 1`). Returns the vertex count.
pub fn rotate_positions(positions: &mut [f32], transform: &Transform) -> Result<usize> {
    if positions.len() % 3 != 0 {
        return Err(MeshError::NotVec3(positions.len()));
    }
    for vertex in positions.chunks_exact_mut(3) {
        let [x, y, z, _] = transform.multiply_vector(&[
            f64::from(vertex[0]),
            f64::from(vertex[1]),
            f64::from(vertex[2]),
            1.0,
        ]);
        vertex[0] = x as f32;
        vertex[1] = y as f32;
        vertex[2] = z as f32;
    }
    Ok(positions.len() / 3)
}

/// Transform `count` positions of a little-endian buffer view in place
///
/// `byte_stride` of `None` means tightly packed, as in glTF.
pub fn rotate_position_bytes(
    bytes: &mut [u8],
    byte_offset: usize,
    byte_stride: Option<usize>,
    count: usize,
    transform: &Transform,
) -> Result<usize> {
    let stride = byte_stride.unwrap_or(POSITION_SIZE);
    if stride < POSITION_SIZE {
        return Err(MeshError::StrideTooSmall(stride));
    }
    if count == 0 {
        return Ok(0);
    }
    let needed = stride
        .checked_mul(count - 1)
        .and_then(|span| span.checked_add(byte_offset))
        .and_then(|end| end.checked_add(POSITION_SIZE))
        .ok_or(MeshError::ByteRangeOverflow {
            byte_offset,
            stride,
            count,
        })?;
    if needed > bytes.len() {
        return Err(MeshError::BufferTooSmall {
            needed,
            available: bytes.len(),
        });
    }

    for i in 0..count {
        let start = byte_offset + i * stride;
        let vertex = &mut bytes[start..start + POSITION_SIZE];
        let [x, y, z, _] = transform.multiply_vector(&[
            f64::from(LittleEndian::read_f32(&vertex[0..4])),
            f64::from(LittleEndian::read_f32(&vertex[4..8])),
            f64::from(LittleEndian::read_f32(&vertex[8..12])),
            1.0,
        ]);
        LittleEndian::write_f32(&mut vertex[0..4], x as f32);
        LittleEndian::write_f32(&mut vertex[4..8], y as f32);
        LittleEndian::write_f32(&mut vertex[8..12], z as f32);
    }

    debug!(
        "Transformed {} positions at byte offset {}",
        count, byte_offset
    );
    Ok(count)
}

fn vertex_at(v: &[f32]) -> Cartesian3 {
    Cartesian3::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2]))
}

/// Axis-aligned extent of a set of positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionBounds {
    pub min: Cartesian3,
    pub max: Cartesian3,
}

impl PositionBounds {
    /// Bounds of a single point
    pub fn from_point(point: Cartesian3) -> Self {
        PositionBounds {
            min: point,
            max: point,
        }
    }

    /// Bounds of packed `f32` triples, `None` when there are no vertices
    pub fn from_positions(positions: &[f32]) -> Option<Self> {
        let mut vertices = positions.chunks_exact(3).map(vertex_at);
        let mut bounds = Self::from_point(vertices.next()?);
        for vertex in vertices {
            bounds.include(&vertex);
        }
        Some(bounds)
    }

    pub fn include(&mut self, point: &Cartesian3) {
        self.min = Cartesian3::new(
            self.min.x.min(point.x),
            self.min.y.min(point.y),
            self.min.z.min(point.z),
        );
        self.max = Cartesian3::new(
            self.max.x.max(point.x),
            self.max.y.max(point.y),
            self.max.z.max(point.z),
        );
    }

    pub fn center(&self) -> Cartesian3 {
        (self.min + self.max) * 0.5
    }

    /// Shift both extrema, e.g. from RTC-relative to geocentric coordinates
    pub fn translated(&self, offset: &Cartesian3) -> Self {
        PositionBounds {
            min: self.min + *offset,
            max: self.max + *offset,
        }
    }

    /// The eight box corners, bit 0 selecting x, bit 1 y and bit 2 z
    pub fn corners(&self) -> [Cartesian3; 8] {
        std::array::from_fn(|i| {
            Cartesian3::new(
                if i & 1 == 0 { self.min.x } else { self.max.x },
                if i & 2 == 0 { self.min.y } else { self.max.y },
                if i & 4 == 0 { self.min.z } else { self.max.z },
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::RotationWinding;

    fn pack(positions: &[f32]) -> Vec<u8> {
        let mut bytes = vec![0u8; positions.len() * 4];
        LittleEndian::write_f32_into(positions, &mut bytes);
        bytes
    }

    fn unpack(bytes: &[u8]) -> Vec<f32> {
        let mut out = vec![0.0f32; bytes.len() / 4];
        LittleEndian::read_f32_into(bytes, &mut out);
        out
    }

    #[test]
    fn test_rotate_positions_in_place() {
        let mut positions = vec![1.0f32, 0.0, 0.0, 0.0, 2.0, 0.0];
        let yaw = Transform::rotation(90.0, 0.0, 0.0, RotationWinding::CounterClockwise);
        assert_eq!(rotate_positions(&mut positions, &yaw), Ok(2));

        let expected = [0.0f32, 1.0, 0.0, -2.0, 0.0, 0.0];
        for (a, e) in positions.iter().zip(expected.iter()) {
            assert!((a - e).abs() < 1e-6, "{} != {}", a, e);
        }
    }

    #[test]
    fn test_rotate_positions_rejects_partial_vertex() {
        let mut positions = vec![1.0f32, 2.0];
        assert_eq!(
            rotate_positions(&mut positions, &Transform::identity()),
            Err(MeshError::NotVec3(2))
        );
    }

    #[test]
    fn test_rotate_packed_bytes() {
        let mut bytes = pack(&[1.0, 2.0, 3.0, -1.0, -2.0, -3.0]);
        let scale = Transform::scale(2.0, 2.0, 2.0);
        assert_eq!(rotate_position_bytes(&mut bytes, 0, None, 2, &scale), Ok(2));
        assert_eq!(unpack(&bytes), vec![2.0, 4.0, 6.0, -2.0, -4.0, -6.0]);
    }

    #[test]
    fn test_rotate_interleaved_bytes_leaves_other_attributes() {
        // position (12 bytes) + normal (12 bytes) per vertex, after a 4 byte header
        let mut data = vec![9.0f32];
        data.extend_from_slice(&[1.0, 1.0, 1.0, 0.5, 0.5, 0.5]);
        data.extend_from_slice(&[2.0, 2.0, 2.0, 0.5, 0.5, 0.5]);
        let mut bytes = pack(&data);

        let shift = Transform::translation(10.0, 0.0, 0.0);
        assert_eq!(
            rotate_position_bytes(&mut bytes, 4, Some(24), 2, &shift),
            Ok(2)
        );

        let out = unpack(&bytes);
        assert_eq!(out[0], 9.0);
        assert_eq!(&out[1..7], &[11.0, 1.0, 1.0, 0.5, 0.5, 0.5]);
        assert_eq!(&out[7..13], &[12.0, 2.0, 2.0, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_rotate_bytes_bounds_checks() {
        let mut bytes = vec![0u8; 20];
        assert_eq!(
            rotate_position_bytes(&mut bytes, 0, Some(8), 1, &Transform::identity()),
            Err(MeshError::StrideTooSmall(8))
        );
        assert_eq!(
            rotate_position_bytes(&mut bytes, 0, None, 2, &Transform::identity()),
            Err(MeshError::BufferTooSmall {
                needed: 24,
                available: 20
            })
        );
        assert_eq!(
            rotate_position_bytes(&mut bytes, 0, None, 0, &Transform::identity()),
            Ok(0)
        );
    }

    #[test]
    fn test_rotate_bytes_rejects_overflowing_range() {
        let mut bytes = vec![0u8; 24];
        let stride = usize::MAX / 4;
        assert_eq!(
            rotate_position_bytes(&mut bytes, 0, Some(stride), 8, &Transform::identity()),
            Err(MeshError::ByteRangeOverflow {
                byte_offset: 0,
                stride,
                count: 8
            })
        );
        assert!(matches!(
            rotate_position_bytes(&mut bytes, usize::MAX, None, 1, &Transform::identity()),
            Err(MeshError::ByteRangeOverflow { .. })
        ));
        assert_eq!(bytes, vec![0u8; 24]);
    }

    #[test]
    fn test_bounds_and_corners() {
        let positions = [1.0, -2.0, 3.0, -1.0, 4.0, 0.0, 0.5, 0.5, 0.5];
        let bounds = PositionBounds::from_positions(&positions).unwrap();
        assert_eq!(bounds.min, Cartesian3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Cartesian3::new(1.0, 4.0, 3.0));
        assert_eq!(bounds.center(), Cartesian3::new(0.0, 1.0, 1.5));

        let corners = bounds.corners();
        assert_eq!(corners[0], bounds.min);
        assert_eq!(corners[7], bounds.max);
        assert_eq!(corners[1], Cartesian3::new(1.0, -2.0, 0.0));
        assert_eq!(corners[6], Cartesian3::new(-1.0, 4.0, 3.0));

        let shifted = bounds.translated(&Cartesian3::new(10.0, 0.0, 0.0));
        assert_eq!(shifted.min.x, 9.0);
        assert_eq!(shifted.max.x, 11.0);

        assert!(PositionBounds::from_positions(&[]).is_none());
    }
}
