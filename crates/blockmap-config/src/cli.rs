//! Command-line argument parsing for the map converter.

use std::path::PathBuf;

use blockmap_voxel::MapFormat;
use clap::{Parser, Subcommand};

use crate::Config;

/// blockmap command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "blockmap", about = "Voxel map converter")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Build a map from a scene file and write it.
    Convert {
        /// RON scene file listing the authored cubes.
        #[arg(long)]
        scene: PathBuf,
        /// Map name (defaults to the configured name).
        #[arg(long)]
        name: Option<String>,
        /// Output encoding: json or binary.
        #[arg(long)]
        format: Option<MapFormat>,
        /// Output directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Re-encode a stored map in another format.
    Reserialize {
        /// Map file (.json or .bmap).
        #[arg(long)]
        input: PathBuf,
        /// Target encoding: json or binary.
        #[arg(long)]
        format: MapFormat,
        /// Output directory (defaults to the configured one).
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Decode a stored map and print a summary.
    Inspect {
        /// Map file (.json or .bmap).
        #[arg(long)]
        input: PathBuf,
    },
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        match &args.command {
            Command::Convert {
                name,
                format,
                output_dir,
                ..
            } => {
                if let Some(name) = name {
                    self.map.name = name.clone();
                }
                if let Some(format) = format {
                    self.map.format = *format;
                }
                if let Some(dir) = output_dir {
                    self.map.output_dir = dir.clone();
                }
            }
            Command::Reserialize {
                format, output_dir, ..
            } => {
                self.map.format = *format;
                if let Some(dir) = output_dir {
                    self.map.output_dir = dir.clone();
                }
            }
            Command::Inspect { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            command: Command::Convert {
                scene: PathBuf::from("scene.ron"),
                name: Some("dust".to_string()),
                format: Some(MapFormat::Binary),
                output_dir: None,
            },
            log_level: Some("debug".to_string()),
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.map.name, "dust");
        assert_eq!(config.map.format, MapFormat::Binary);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.map.output_dir, PathBuf::from("maps"));
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs {
            command: Command::Inspect {
                input: PathBuf::from("maps/a.json"),
            },
            log_level: None,
            config: None,
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_convert_args() {
        let args = CliArgs::try_parse_from([
            "blockmap",
            "convert",
            "--scene",
            "arena.ron",
            "--format",
            "binary",
            "--log-level",
            "trace",
        ])
        .unwrap();
        assert_eq!(args.log_level.as_deref(), Some("trace"));
        assert_eq!(
            args.command,
            Command::Convert {
                scene: PathBuf::from("arena.ron"),
                name: None,
                format: Some(MapFormat::Binary),
                output_dir: None,
            }
        );
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        let result = CliArgs::try_parse_from([
            "blockmap",
            "reserialize",
            "--input",
            "a.json",
            "--format",
            "xml",
        ]);
        assert!(result.is_err());
    }
}
