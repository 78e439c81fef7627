//! Conversion pipeline: normalize, remap, lay bedrock, apply copy rules, then
//! hand the finished map to a serializer.
//!
//! The whole pipeline runs in memory. The serializer is only called after
//! every stage succeeded, so a failed run never leaves a partial map on disk.

use std::path::{Path, PathBuf};

use blockmap_voxel::{
    BlockEncoding, CopyRule, MapSerializer, Palette, RemappingRule, SparseVoxelMap,
};
use glam::IVec3;

use crate::bedrock::synthesize_bedrock;
use crate::bounds::normalize;
use crate::copy_rule::apply_copy_rule;
use crate::error::ConvertError;
use crate::remap::apply_remappings;
use crate::source::CubeSource;

/// Directory maps are written to unless configured otherwise.
pub const DEFAULT_OUTPUT_DIR: &str = "maps";

/// Palette name of the base-layer block unless configured otherwise.
pub const DEFAULT_BEDROCK: &str = "bedrock";

/// Vertical offset applied during normalization; row 0 belongs to bedrock.
pub const BASE_LAYER_OFFSET: i32 = 1;

/// Builds one map per call. Holds no state between runs.
pub struct MapConverter<'p> {
    palette: &'p dyn Palette,
    name: String,
    remappings: Vec<RemappingRule>,
    copy_rules: Vec<CopyRule>,
    bedrock: String,
    output_dir: PathBuf,
}

impl<'p> MapConverter<'p> {
    pub fn new(palette: &'p dyn Palette, name: impl Into<String>) -> Self {
        Self {
            palette,
            name: name.into(),
            remappings: Vec::new(),
            copy_rules: Vec::new(),
            bedrock: DEFAULT_BEDROCK.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    /// Global remapping rules, applied to the authored blocks before bedrock.
    pub fn with_remappings(mut self, rules: Vec<RemappingRule>) -> Self {
        self.remappings = rules;
        self
    }

    /// Copy rules, applied in order.
    pub fn with_copy_rules(mut self, rules: Vec<CopyRule>) -> Self {
        self.copy_rules = rules;
        self
    }

    /// Palette name used for the base layer.
    pub fn with_bedrock(mut self, name: impl Into<String>) -> Self {
        self.bedrock = name.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Runs every in-memory stage and returns the finished map.
    pub fn build<S: CubeSource + ?Sized>(&self, source: &S) -> Result<SparseVoxelMap, ConvertError> {
        let cubes = source.cubes();
        let raw: Vec<IVec3> = cubes.iter().map(|c| c.position).collect();

        let normalized = normalize(&raw, BASE_LAYER_OFFSET)?;
        let bounds = normalized.bounds;
        let mut blocks: Vec<BlockEncoding> = normalized
            .positions
            .iter()
            .zip(&cubes)
            .map(|(&[x, y, z], cube)| BlockEncoding::new(x, y, z, cube.block))
            .collect();
        tracing::info!(
            map = %self.name,
            cubes = blocks.len(),
            size = ?normalized.size,
            "normalized cubes"
        );

        let rewritten = apply_remappings(&mut blocks, &self.remappings, self.palette)
            .map_err(ConvertError::Remap)?;
        tracing::info!(rules = self.remappings.len(), rewritten, "applied global remappings");

        let bedrock = self
            .palette
            .index_of(&self.bedrock)
            .map_err(ConvertError::Bedrock)?;
        let layer = synthesize_bedrock(&mut blocks, normalized.size, bedrock);
        tracing::info!(blocks = layer, "laid bedrock");

        let mut map = SparseVoxelMap::new(self.name.clone(), blocks, normalized.size);
        for (index, rule) in self.copy_rules.iter().enumerate() {
            apply_copy_rule(&mut map, rule, bounds, self.palette)
                .map_err(|source| ConvertError::CopyRule { index, source })?;
        }
        tracing::info!(
            rules = self.copy_rules.len(),
            blocks = map.len(),
            size = ?map.size,
            "applied copy rules"
        );

        let escaped = map.out_of_bounds().count();
        if escaped > 0 {
            tracing::warn!(
                map = %map.name,
                escaped,
                "blocks lie outside the declared size and will be dropped on load"
            );
        }
        let duplicates = map.duplicate_count();
        if duplicates > 0 {
            tracing::warn!(
                map = %map.name,
                duplicates,
                "blocks share a coordinate; the later record wins on load"
            );
        }

        Ok(map)
    }

    /// Builds the map and persists it through `serializer` as
    /// `<output_dir>/<name>.<ext>`. Returns the written path.
    pub fn convert<S: CubeSource + ?Sized>(
        &self,
        source: &S,
        serializer: &dyn MapSerializer,
    ) -> Result<PathBuf, ConvertError> {
        let map = self.build(source)?;
        let name = map.name.clone();
        let path = serializer
            .serialize(map, &self.output_dir, &name)
            .map_err(ConvertError::Serialize)?;
        tracing::info!(map = %name, path = %path.display(), "map saved");
        Ok(path)
    }
}
