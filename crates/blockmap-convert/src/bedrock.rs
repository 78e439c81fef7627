//! Indestructible base layer.

use blockmap_voxel::{BlockEncoding, BlockTypeId, MapSize};

/// Appends one `bedrock` block at `y = 0` for every `(x, z)` of the footprint
/// and returns how many were added.
///
/// Runs before copy rules, so only the authored footprint gets a base layer.
/// Coordinates stop at `i16::MAX`, so a size component covers at most 32768
/// cells.
pub fn synthesize_bedrock(
    blocks: &mut Vec<BlockEncoding>,
    size: MapSize,
    bedrock: BlockTypeId,
) -> usize {
    let sx = size.x.max(0) as usize;
    let sz = size.z.max(0) as usize;

    let before = blocks.len();
    blocks.reserve(sx.saturating_mul(sz));
    for x in (0..=i16::MAX).take(sx) {
        for z in (0..=i16::MAX).take(sz) {
            blocks.push(BlockEncoding::new(x, 0, z, bedrock));
        }
    }
    blocks.len() - before
}
