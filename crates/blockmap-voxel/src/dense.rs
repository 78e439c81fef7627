//! Dense reconstruction of a [`SparseVoxelMap`].
//!
//! Scene materializers read the grid produced here rather than the sparse
//! record list. Cells are stored `[y][x][z]`, matching the order the runtime
//! walks a map layer by layer.

use crate::map::{MapSize, SparseVoxelMap};
use crate::registry::BlockTypeId;

/// Largest grid [`DenseGrid`] will allocate, in cells.
pub const MAX_DENSE_CELLS: usize = 1 << 28;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DenseError {
    /// The declared size needs more than [`MAX_DENSE_CELLS`] cells.
    #[error("map size {}x{}x{} exceeds {} dense cells", .size.x, .size.y, .size.z, MAX_DENSE_CELLS)]
    TooLarge { size: MapSize },
}

/// Fully expanded block grid sized by a map's declared size.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DenseGrid {
    size: MapSize,
    cells: Vec<BlockTypeId>,
    /// Records that fell outside the declared size and were dropped.
    dropped: usize,
}

impl DenseGrid {
    /// Creates an all-air grid. Negative size components count as zero.
    ///
    /// # Errors
    ///
    /// [`DenseError::TooLarge`] if the volume overflows or exceeds
    /// [`MAX_DENSE_CELLS`]. Sizes read from disk are not trusted.
    pub fn new(size: MapSize) -> Result<Self, DenseError> {
        let volume = (size.x.max(0) as usize)
            .checked_mul(size.y.max(0) as usize)
            .and_then(|v| v.checked_mul(size.z.max(0) as usize))
            .filter(|&v| v <= MAX_DENSE_CELLS)
            .ok_or(DenseError::TooLarge { size })?;
        Ok(Self {
            size,
            cells: vec![BlockTypeId(0); volume],
            dropped: 0,
        })
    }

    /// Expands a sparse map. Later records overwrite earlier ones at the same
    /// coordinate. Records outside `map.size` are skipped and counted.
    pub fn from_sparse(map: &SparseVoxelMap) -> Result<Self, DenseError> {
        let mut grid = Self::new(map.size)?;
        for block in &map.blocks {
            if !map.size.contains(block) {
                grid.dropped += 1;
                continue;
            }
            let index = grid.linear_index(block.x as usize, block.y as usize, block.z as usize);
            grid.cells[index] = block.block;
        }
        if grid.dropped > 0 {
            tracing::warn!(
                map = %map.name,
                dropped = grid.dropped,
                "blocks outside the declared size were dropped from the dense grid"
            );
        }
        Ok(grid)
    }

    pub fn size(&self) -> MapSize {
        self.size
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Returns the block at `(x, y, z)`, or `None` outside the grid.
    pub fn get(&self, x: i32, y: i32, z: i32) -> Option<BlockTypeId> {
        if !(0..self.size.x).contains(&x)
            || !(0..self.size.y).contains(&y)
            || !(0..self.size.z).contains(&z)
        {
            return None;
        }
        Some(self.cells[self.linear_index(x as usize, y as usize, z as usize)])
    }

    /// Number of non-air cells.
    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.0 != 0).count()
    }

    /// Every non-air cell above the base layer as `(x, y, z, type)`.
    ///
    /// The base layer (y = 0) is synthesized bedrock and is never turned back
    /// into authored cubes.
    pub fn occupied_above_base(&self) -> impl Iterator<Item = (i32, i32, i32, BlockTypeId)> + '_ {
        let (sx, sy, sz) = (self.size.x, self.size.y, self.size.z);
        (1..sy).flat_map(move |y| {
            (0..sx).flat_map(move |x| {
                (0..sz).filter_map(move |z| {
                    let block = self.cells[self.linear_index(x as usize, y as usize, z as usize)];
                    (block.0 != 0).then_some((x, y, z, block))
                })
            })
        })
    }

    fn linear_index(&self, x: usize, y: usize, z: usize) -> usize {
        let sx = self.size.x as usize;
        let sz = self.size.z as usize;
        (y * sx + x) * sz + z
    }
}
