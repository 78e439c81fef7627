//! Human-readable JSON encoding of a [`SparseVoxelMap`].
//!
//! Layout: `{"name": .., "blocks": [{"x","y","z","type"}, ..], "size": {"x","y","z"}}`.

use std::path::{Path, PathBuf};

use crate::map::SparseVoxelMap;
use crate::serial::{MapSerializer, SerializeError, prepare_target};

/// Writes maps as compact JSON (`<name>.json`).
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonSerializer;

impl MapSerializer for JsonSerializer {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn serialize(
        &self,
        map: SparseVoxelMap,
        directory: &Path,
        name: &str,
    ) -> Result<PathBuf, SerializeError> {
        let path = prepare_target(directory, name, self.extension())?;
        let encoded = serde_json::to_string(&map)?;
        std::fs::write(&path, encoded).map_err(|e| SerializeError::io(&path, e))?;
        tracing::info!(path = %path.display(), blocks = map.blocks.len(), "wrote JSON map");
        Ok(path)
    }

    fn load(&self, path: &Path) -> Result<SparseVoxelMap, SerializeError> {
        let contents = std::fs::read_to_string(path).map_err(|e| SerializeError::io(path, e))?;
        Ok(serde_json::from_str(&contents)?)
    }
}
