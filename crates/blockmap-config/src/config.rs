//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use blockmap_voxel::{BlockRegistry, CopyRule, MapFormat, RemappingRule};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level converter configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// What to build and where to write it.
    pub map: MapConfig,
    /// Block names, in palette order.
    pub palette: PaletteConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Map build settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// Map name; also the output file stem.
    pub name: String,
    /// Directory maps are written to.
    pub output_dir: PathBuf,
    /// On-disk encoding.
    pub format: MapFormat,
    /// Palette name of the base-layer block.
    pub bedrock: String,
    /// Remappings applied to every authored block.
    pub remappings: Vec<RemappingRule>,
    /// Copy rules, applied in order.
    pub copy_rules: Vec<CopyRule>,
}

/// Palette definition. `air` is implicit and always index 0.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    /// Block names; the first gets index 1.
    pub blocks: Vec<String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            name: "untitled".to_string(),
            output_dir: PathBuf::from("maps"),
            format: MapFormat::Json,
            bedrock: "bedrock".to_string(),
            remappings: Vec::new(),
            copy_rules: Vec::new(),
        }
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        let blocks = [
            "bedrock",
            "stone",
            "dirt",
            "grass",
            "sand",
            "wood",
            "planks",
            "glass",
            "red_wool",
            "blue_wool",
        ];
        Self {
            blocks: blocks.iter().map(|b| b.to_string()).collect(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl PaletteConfig {
    /// Builds the block registry described by this palette.
    pub fn registry(&self) -> Result<BlockRegistry, ConfigError> {
        BlockRegistry::from_names(self.blocks.iter().cloned()).map_err(ConfigError::Palette)
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(false)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
