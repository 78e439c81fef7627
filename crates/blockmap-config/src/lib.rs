//! Configuration system for the blockmap converter.
//!
//! Provides the map build settings, palette, and debug options, persisted to
//! disk as RON. Supports CLI overrides via clap and
//! forward/backward compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, Command};
pub use config::{Config, DebugConfig, MapConfig, PaletteConfig};
pub use error::ConfigError;
