//! Copy rules: duplicate a box of blocks under a 180° rotation or an axis
//! mirror and append the result past the map's original Z extent.
//!
//! All transforms use the [`FootprintBounds`] captured before the first rule,
//! not the size grown by earlier rules. The source box, on the other hand, is
//! read from the current block list and may include earlier copies.

use blockmap_voxel::{Axis, BlockEncoding, CopyKind, CopyRule, Palette, SparseVoxelMap};

use crate::bounds::FootprintBounds;
use crate::error::CopyRuleError;
use crate::remap::apply_remappings;

/// Transforms a normalized `(x, z)` pair. `y` never changes.
///
/// With `ex = max_x - min_x` and `ez = max_z - min_z`:
///
/// | kind | x' | z' |
/// |------|----|----|
/// | `Rotate180` | `ex - x` | `(ez - 1) + (to.z - from.z) - z` |
/// | `MirrorX` | `ex - x` | `z + (ez - 1)` |
/// | `MirrorZ` | `x` | `z + (ez - 1)` |
pub fn transform_xz(
    kind: CopyKind,
    x: i32,
    z: i32,
    rule_depth: i32,
    bounds: FootprintBounds,
) -> (i32, i32) {
    let ex = bounds.extent_x();
    let ez = bounds.extent_z();
    match kind {
        CopyKind::Rotate180 => (ex - x, (ez - 1).saturating_add(rule_depth).saturating_sub(z)),
        CopyKind::MirrorX => (ex - x, z + (ez - 1)),
        CopyKind::MirrorZ => (x, z + (ez - 1)),
    }
}

/// Applies `rule` to `map` and returns the number of blocks appended.
///
/// After appending, `map.size.z` grows by `to.z - from.z - 1`.
///
/// # Errors
///
/// Fails before touching the map if the rule's axis is `X`, if `from` is not
/// at or below `to` on every axis, if `size.z` would overflow, or if any copy
/// would leave the `i16` coordinate range. A failing remapping lookup also
/// leaves the map untouched, since remapping only sees the pending copies.
pub fn apply_copy_rule<P: Palette + ?Sized>(
    map: &mut SparseVoxelMap,
    rule: &CopyRule,
    bounds: FootprintBounds,
    palette: &P,
) -> Result<usize, CopyRuleError> {
    if rule.axis == Axis::X {
        return Err(CopyRuleError::UnsupportedAxis(rule.axis));
    }

    if rule.from.cmpgt(rule.to).any() {
        return Err(CopyRuleError::InvertedBox {
            from: rule.from,
            to: rule.to,
        });
    }

    let depth = i64::from(rule.to.z) - i64::from(rule.from.z);
    let growth = depth - 1;
    let grown_z = i32::try_from(i64::from(map.size.z) + growth).map_err(|_| {
        CopyRuleError::SizeOverflow {
            size_z: map.size.z,
            growth,
        }
    })?;
    let depth = i32::try_from(depth).map_err(|_| CopyRuleError::SizeOverflow {
        size_z: map.size.z,
        growth,
    })?;

    let mut copies = map
        .blocks
        .iter()
        .filter(|b| rule.selects(b.x as i32, b.y as i32, b.z as i32))
        .map(|b| {
            let (x, z) = transform_xz(rule.kind, b.x as i32, b.z as i32, depth, bounds);
            match (i16::try_from(x), i16::try_from(z)) {
                (Ok(nx), Ok(nz)) => Ok(BlockEncoding::new(nx, b.y, nz, b.block)),
                _ => Err(CopyRuleError::CoordinateOverflow { x, z }),
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    apply_remappings(&mut copies, &rule.remappings, palette).map_err(CopyRuleError::Remap)?;

    let appended = copies.len();
    map.blocks.extend(copies);
    map.size.z = grown_z;

    tracing::debug!(
        kind = %rule.kind,
        from = ?rule.from,
        to = ?rule.to,
        appended,
        size_z = map.size.z,
        "applied copy rule"
    );
    Ok(appended)
}
