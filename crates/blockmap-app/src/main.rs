//! The `blockmap` command-line converter.

mod commands;
mod platform;
mod scene;

use std::process::ExitCode;

use blockmap_config::{CliArgs, Config};
use clap::Parser;

use crate::platform::PlatformDirs;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match args.config.clone() {
        Some(dir) => PlatformDirs::from_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                return ExitCode::FAILURE;
            }
        },
    };

    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create {}: {e}", dirs.config_dir.display());
        return ExitCode::FAILURE;
    }

    let mut config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", dirs.config_dir.display());
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args);

    blockmap_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    match commands::run(&config, &args.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "blockmap failed");
            ExitCode::FAILURE
        }
    }
}
