//! Sparse voxel map: only non-air blocks are stored, as `(position, type)`
//! records, together with the declared bounding size.

use serde::{Deserialize, Serialize};

use crate::registry::BlockTypeId;

/// Vertical extent of every map. Shared with the runtime that loads maps.
pub const MAX_HEIGHT: i32 = 64;

/// One occupied voxel. Absence of a record at a coordinate means air.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockEncoding {
    pub x: i16,
    pub y: i16,
    pub z: i16,
    #[serde(rename = "type")]
    pub block: BlockTypeId,
}

impl BlockEncoding {
    pub const fn new(x: i16, y: i16, z: i16, block: BlockTypeId) -> Self {
        Self { x, y, z, block }
    }
}

/// Declared bounding size of a map.
///
/// Signed so that the copy-rule growth arithmetic (which may subtract one)
/// stays exact.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MapSize {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl MapSize {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns `true` if `block` lies in `[0,x) × [0,y) × [0,z)`.
    pub fn contains(&self, block: &BlockEncoding) -> bool {
        let (x, y, z) = (block.x as i32, block.y as i32, block.z as i32);
        (0..self.x).contains(&x) && (0..self.y).contains(&y) && (0..self.z).contains(&z)
    }

    /// Number of cells in the X×Z footprint (zero for degenerate sizes).
    pub fn footprint_area(&self) -> usize {
        self.x.max(0) as usize * self.z.max(0) as usize
    }
}

/// Named, sized, ordered collection of [`BlockEncoding`]s.
///
/// The block list is append-only while a conversion runs. Insertion order is
/// preserved through serialization and decides which record wins when two
/// share a coordinate in the dense view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparseVoxelMap {
    pub name: String,
    pub blocks: Vec<BlockEncoding>,
    pub size: MapSize,
}

impl SparseVoxelMap {
    pub fn new(name: impl Into<String>, blocks: Vec<BlockEncoding>, size: MapSize) -> Self {
        Self {
            name: name.into(),
            blocks,
            size,
        }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks whose coordinates fall outside the declared size.
    pub fn out_of_bounds(&self) -> impl Iterator<Item = &BlockEncoding> {
        self.blocks.iter().filter(|b| !self.size.contains(b))
    }

    /// Number of records that share a coordinate with an earlier record.
    pub fn duplicate_count(&self) -> usize {
        let mut seen = rustc_hash::FxHashSet::default();
        self.blocks
            .iter()
            .filter(|b| !seen.insert((b.x, b.y, b.z)))
            .count()
    }
}
