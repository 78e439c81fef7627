//! Subcommand implementations.

use std::fmt;
use std::path::{Path, PathBuf};

use blockmap_config::{Command, Config, ConfigError};
use blockmap_convert::{ConvertError, MapConverter};
use blockmap_voxel::{DenseError, DenseGrid, MapFormat, MapSize, SerializeError, SparseVoxelMap};

use crate::scene::{SceneError, SceneFile};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Serialize(#[from] SerializeError),
    #[error(transparent)]
    Dense(#[from] DenseError),
    #[error("cannot tell map format from {0} (expected .json or .bmap)")]
    UnknownFormat(PathBuf),
}

/// Dispatches a parsed subcommand.
pub fn run(config: &Config, command: &Command) -> Result<(), AppError> {
    match command {
        Command::Convert { scene, .. } => {
            let path = convert(config, scene)?;
            println!("Map [{}] saved to {}", config.map.name, path.display());
        }
        Command::Reserialize { input, .. } => {
            let path = reserialize(config, input)?;
            println!("Re-encoded {} as {}", input.display(), path.display());
        }
        Command::Inspect { input } => {
            println!("{}", inspect(input)?);
        }
    }
    Ok(())
}

/// Builds the configured map from `scene` and writes it.
pub fn convert(config: &Config, scene: &Path) -> Result<PathBuf, AppError> {
    let palette = config.palette.registry()?;
    let cubes = SceneFile::load(scene)?.resolve(&palette)?;
    tracing::info!(scene = %scene.display(), cubes = cubes.len(), "loaded scene");

    let serializer = config.map.format.serializer();
    let path = MapConverter::new(&palette, config.map.name.clone())
        .with_remappings(config.map.remappings.clone())
        .with_copy_rules(config.map.copy_rules.clone())
        .with_bedrock(config.map.bedrock.clone())
        .with_output_dir(config.map.output_dir.clone())
        .convert(&cubes, serializer.as_ref())?;
    Ok(path)
}

/// Loads a stored map and writes it again in `config.map.format`.
pub fn reserialize(config: &Config, input: &Path) -> Result<PathBuf, AppError> {
    let map = load_map(input)?;
    let name = map.name.clone();
    let path = config
        .map
        .format
        .serializer()
        .serialize(map, &config.map.output_dir, &name)?;
    Ok(path)
}

/// Loads a map, choosing the decoder from the file extension.
pub fn load_map(path: &Path) -> Result<SparseVoxelMap, AppError> {
    let format =
        MapFormat::from_path(path).ok_or_else(|| AppError::UnknownFormat(path.to_path_buf()))?;
    Ok(format.serializer().load(path)?)
}

/// What a scene materializer would see when loading a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapSummary {
    pub name: String,
    pub size: MapSize,
    pub records: usize,
    pub occupied: usize,
    pub above_base: usize,
    pub dropped: usize,
    pub duplicates: usize,
}

impl fmt::Display for MapSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "map:        {}", self.name)?;
        writeln!(f, "size:       {} x {} x {}", self.size.x, self.size.y, self.size.z)?;
        writeln!(f, "records:    {}", self.records)?;
        writeln!(f, "occupied:   {}", self.occupied)?;
        writeln!(f, "above base: {}", self.above_base)?;
        writeln!(f, "dropped:    {}", self.dropped)?;
        write!(f, "duplicates: {}", self.duplicates)
    }
}

pub fn inspect(input: &Path) -> Result<MapSummary, AppError> {
    let map = load_map(input)?;
    Ok(summarize(&map)?)
}

pub fn summarize(map: &SparseVoxelMap) -> Result<MapSummary, DenseError> {
    let grid = DenseGrid::from_sparse(map)?;
    Ok(MapSummary {
        name: map.name.clone(),
        size: map.size,
        records: map.len(),
        occupied: grid.occupied(),
        above_base: grid.occupied_above_base().count(),
        dropped: grid.dropped(),
        duplicates: map.duplicate_count(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockmap_voxel::{Axis, CopyKind, CopyRule, MAX_HEIGHT};
    use glam::IVec3;

    const SCENE: &str = r#"(
        cubes: [
            (position: (10, 5, 10), block: "stone"),
            (position: (11, 5, 10), block: "stone"),
            (position: (10, 5, 11), block: "stone"),
            (position: (11, 5, 11), block: "stone"),
        ],
    )"#;

    fn setup(format: MapFormat) -> (tempfile::TempDir, Config, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let scene = dir.path().join("scene.ron");
        std::fs::write(&scene, SCENE).unwrap();

        let mut config = Config::default();
        config.map.name = "square".to_string();
        config.map.format = format;
        config.map.output_dir = dir.path().join("maps");
        config.map.copy_rules.push(CopyRule::new(
            IVec3::new(0, 1, 0),
            IVec3::new(2, 2, 2),
            CopyKind::MirrorZ,
            Axis::Z,
        ));
        (dir, config, scene)
    }

    #[test]
    fn test_convert_then_inspect() {
        let (dir, config, scene) = setup(MapFormat::Binary);
        let path = convert(&config, &scene).unwrap();
        assert_eq!(path, dir.path().join("maps").join("square.bmap"));

        let summary = inspect(&path).unwrap();
        assert_eq!(summary.name, "square");
        assert_eq!(summary.size, MapSize::new(2, MAX_HEIGHT, 3));
        assert_eq!(summary.records, 12);
        // Copies land on the originals, so the dense view has 4 + 4 cells.
        assert_eq!(summary.duplicates, 4);
        assert_eq!(summary.occupied, 8);
        assert_eq!(summary.above_base, 4);
        assert_eq!(summary.dropped, 0);
    }

    #[test]
    fn test_reserialize_json_to_binary() {
        let (_dir, mut config, scene) = setup(MapFormat::Json);
        let json = convert(&config, &scene).unwrap();

        config.map.format = MapFormat::Binary;
        let bin = reserialize(&config, &json).unwrap();
        assert_eq!(bin.extension().unwrap(), "bmap");
        assert_eq!(load_map(&bin).unwrap(), load_map(&json).unwrap());
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let err = load_map(Path::new("maps/square.txt")).unwrap_err();
        assert!(matches!(err, AppError::UnknownFormat(_)));
    }

    #[test]
    fn test_failed_conversion_leaves_no_file() {
        let (dir, mut config, scene) = setup(MapFormat::Json);
        config.map.copy_rules[0].axis = Axis::X;
        let err = convert(&config, &scene).unwrap_err();
        assert!(matches!(err, AppError::Convert(ConvertError::CopyRule { index: 0, .. })));
        assert!(!dir.path().join("maps").exists());
    }

    #[test]
    fn test_summary_display() {
        let map = SparseVoxelMap::new("empty", Vec::new(), MapSize::new(1, MAX_HEIGHT, 1));
        let text = summarize(&map).unwrap().to_string();
        assert!(text.contains("map:        empty"));
        assert!(text.contains("size:       1 x 64 x 1"));
    }

    #[test]
    fn test_inspect_rejects_oversized_header() {
        let dir = tempfile::tempdir().unwrap();
        let huge = SparseVoxelMap::new("huge", Vec::new(), MapSize::new(i32::MAX, i32::MAX, i32::MAX));
        let path = MapFormat::Binary
            .serializer()
            .serialize(huge, dir.path(), "huge")
            .unwrap();

        let err = inspect(&path).unwrap_err();
        assert!(matches!(err, AppError::Dense(DenseError::TooLarge { .. })));
    }
}
