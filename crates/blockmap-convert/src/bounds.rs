//! Bounding-box normalization of raw cube positions.
//!
//! Every position is shifted so the minimum corner lands on the origin, then
//! lifted by a caller-supplied vertical offset (1 when building maps, which
//! reserves row 0 for bedrock). The vertical size is not derived from data:
//! it is always [`MAX_HEIGHT`].

use blockmap_voxel::{MAX_HEIGHT, MapSize};
use glam::IVec3;

use crate::error::NormalizeError;

/// Original X/Z footprint of the authored cubes, in raw coordinates.
///
/// Captured once before any copy rule runs and never updated, so every rule
/// transforms relative to the un-extended footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FootprintBounds {
    pub min_x: i32,
    pub max_x: i32,
    pub min_z: i32,
    pub max_z: i32,
}

impl FootprintBounds {
    /// `max_x - min_x`.
    pub fn extent_x(&self) -> i32 {
        self.max_x - self.min_x
    }

    /// `max_z - min_z`.
    pub fn extent_z(&self) -> i32 {
        self.max_z - self.min_z
    }
}

/// Output of [`normalize`]. `positions[i]` corresponds to input `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalized {
    pub positions: Vec<[i16; 3]>,
    pub size: MapSize,
    pub bounds: FootprintBounds,
}

/// Shifts `positions` to a zero-based box and lifts them by `y_offset`.
///
/// # Errors
///
/// [`NormalizeError::EmptyInput`] for an empty slice, and
/// [`NormalizeError::CoordinateOverflow`] if a shifted coordinate leaves the
/// `i16` range.
pub fn normalize(positions: &[IVec3], y_offset: i32) -> Result<Normalized, NormalizeError> {
    let first = *positions.first().ok_or(NormalizeError::EmptyInput)?;
    let (min, max) = positions
        .iter()
        .fold((first, first), |(min, max), &p| (min.min(p), max.max(p)));

    let shifted = positions
        .iter()
        .map(|&p| {
            Ok([
                narrow('x', i64::from(p.x) - i64::from(min.x))?,
                narrow('y', i64::from(p.y) - i64::from(min.y) + i64::from(y_offset))?,
                narrow('z', i64::from(p.z) - i64::from(min.z))?,
            ])
        })
        .collect::<Result<Vec<_>, NormalizeError>>()?;

    Ok(Normalized {
        positions: shifted,
        size: MapSize::new(max.x - min.x + 1, MAX_HEIGHT, max.z - min.z + 1),
        bounds: FootprintBounds {
            min_x: min.x,
            max_x: max.x,
            min_z: min.z,
            max_z: max.z,
        },
    })
}

fn narrow(axis: char, value: i64) -> Result<i16, NormalizeError> {
    i16::try_from(value).map_err(|_| NormalizeError::CoordinateOverflow { axis, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_maps_to_origin() {
        let input = [
            IVec3::new(-5, 10, 7),
            IVec3::new(-3, 12, 9),
            IVec3::new(-4, 11, 8),
        ];
        let out = normalize(&input, 0).unwrap();
        let min = out.positions.iter().fold([i16::MAX; 3], |m, p| {
            [m[0].min(p[0]), m[1].min(p[1]), m[2].min(p[2])]
        });
        assert_eq!(min, [0, 0, 0]);
        assert_eq!(out.positions[1], [2, 2, 2]);
    }

    #[test]
    fn test_y_offset_lifts_every_block() {
        let input = [IVec3::new(3, 4, 5), IVec3::new(4, 6, 5)];
        let out = normalize(&input, 1).unwrap();
        assert_eq!(out.positions, vec![[0, 1, 0], [1, 3, 0]]);
    }

    #[test]
    fn test_size_uses_fixed_height() {
        let input = [IVec3::new(0, 0, 0), IVec3::new(1, 30, 0), IVec3::new(0, 0, 1)];
        let out = normalize(&input, 1).unwrap();
        assert_eq!(out.size, MapSize::new(2, MAX_HEIGHT, 2));
    }

    #[test]
    fn test_bounds_are_raw_coordinates() {
        let input = [IVec3::new(10, 0, -2), IVec3::new(14, 0, 3)];
        let out = normalize(&input, 1).unwrap();
        assert_eq!(
            out.bounds,
            FootprintBounds {
                min_x: 10,
                max_x: 14,
                min_z: -2,
                max_z: 3
            }
        );
        assert_eq!(out.bounds.extent_x(), 4);
        assert_eq!(out.bounds.extent_z(), 5);
    }

    #[test]
    fn test_empty_input_fails() {
        assert_eq!(normalize(&[], 1), Err(NormalizeError::EmptyInput));
    }

    #[test]
    fn test_overflow_detected() {
        let input = [IVec3::new(0, 0, 0), IVec3::new(40_000, 0, 0)];
        assert_eq!(
            normalize(&input, 1),
            Err(NormalizeError::CoordinateOverflow {
                axis: 'x',
                value: 40_000
            })
        );
    }

    #[test]
    fn test_full_i32_span_reports_overflow() {
        let input = [IVec3::splat(i32::MIN), IVec3::splat(i32::MAX)];
        assert!(matches!(
            normalize(&input, 1),
            Err(NormalizeError::CoordinateOverflow { axis: 'x', .. })
        ));
    }
}
