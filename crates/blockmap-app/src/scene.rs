//! RON scene files: the authored cubes of a map, by block name.
//!
//! ```ron
//! (
//!     cubes: [
//!         (position: (0, 0, 0), block: "stone"),
//!         (position: (1, 0, 0), block: "dirt"),
//!     ],
//! )
//! ```

use std::path::{Path, PathBuf};

use blockmap_convert::RawCube;
use blockmap_voxel::{Palette, PaletteError};
use glam::IVec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("failed to read scene {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse scene: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("scene cube {index}: {source}")]
    UnknownBlock {
        index: usize,
        #[source]
        source: PaletteError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneCube {
    pub position: IVec3,
    pub block: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneFile {
    #[serde(default)]
    pub cubes: Vec<SceneCube>,
}

impl SceneFile {
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SceneError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, SceneError> {
        Ok(ron::from_str(contents)?)
    }

    /// Resolves block names into palette indices.
    pub fn resolve<P: Palette + ?Sized>(&self, palette: &P) -> Result<Vec<RawCube>, SceneError> {
        self.cubes
            .iter()
            .enumerate()
            .map(|(index, cube)| {
                let block = palette
                    .index_of(&cube.block)
                    .map_err(|source| SceneError::UnknownBlock { index, source })?;
                Ok(RawCube::new(cube.position, block))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmap_voxel::{BlockRegistry, BlockTypeId};

    const SCENE: &str = r#"(
        cubes: [
            (position: (4, -2, 7), block: "stone"),
            (position: (5, -2, 7), block: "dirt"),
        ],
    )"#;

    #[test]
    fn test_parse_and_resolve() {
        let palette = BlockRegistry::from_names(["bedrock", "stone", "dirt"]).unwrap();
        let scene = SceneFile::parse(SCENE).unwrap();
        let cubes = scene.resolve(&palette).unwrap();
        assert_eq!(
            cubes,
            vec![
                RawCube::new(IVec3::new(4, -2, 7), BlockTypeId(2)),
                RawCube::new(IVec3::new(5, -2, 7), BlockTypeId(3)),
            ]
        );
    }

    #[test]
    fn test_unknown_block_names_index() {
        let palette = BlockRegistry::from_names(["stone"]).unwrap();
        let scene = SceneFile::parse(SCENE).unwrap();
        let err = scene.resolve(&palette).unwrap_err();
        assert!(matches!(err, SceneError::UnknownBlock { index: 1, .. }));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SceneFile::load(&dir.path().join("none.ron")).unwrap_err();
        assert!(matches!(err, SceneError::Read { .. }));
    }

    #[test]
    fn test_empty_scene_parses() {
        assert_eq!(SceneFile::parse("()").unwrap(), SceneFile::default());
    }
}
