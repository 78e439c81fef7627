//! Cube source seam: whatever enumerates the authored cubes hands the
//! converter a flat list of positions with already-resolved block types.

use blockmap_voxel::BlockTypeId;
use glam::IVec3;

/// One authored cube in raw (un-normalized) world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawCube {
    pub position: IVec3,
    pub block: BlockTypeId,
}

impl RawCube {
    pub const fn new(position: IVec3, block: BlockTypeId) -> Self {
        Self { position, block }
    }
}

/// Supplies the cubes of one map.
pub trait CubeSource {
    fn cubes(&self) -> Vec<RawCube>;
}

impl CubeSource for [RawCube] {
    fn cubes(&self) -> Vec<RawCube> {
        self.to_vec()
    }
}

impl CubeSource for Vec<RawCube> {
    fn cubes(&self) -> Vec<RawCube> {
        self.clone()
    }
}
