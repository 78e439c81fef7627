//! Map persistence: the [`MapSerializer`] seam and its two encodings.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::map::SparseVoxelMap;
use crate::map_binary::{BinarySerializer, MapDecodeError};
use crate::map_json::JsonSerializer;

/// Errors raised while writing or reading a persisted map.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// Filesystem failure (directory creation, write, read).
    #[error("map I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON encoding or decoding failed.
    #[error("map JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The binary payload is malformed.
    #[error("map binary error: {0}")]
    Binary(#[from] MapDecodeError),
    /// A field does not fit the binary layout.
    #[error("map {what} too large for binary format: {len}")]
    TooLarge { what: &'static str, len: usize },
}

impl SerializeError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Writes a finished map to `directory/name.<ext>`.
pub trait MapSerializer {
    /// File extension (without the dot) used by this encoding.
    fn extension(&self) -> &'static str;

    /// Persists `map` and returns the path written.
    fn serialize(
        &self,
        map: SparseVoxelMap,
        directory: &Path,
        name: &str,
    ) -> Result<PathBuf, SerializeError>;

    /// Reads a map previously written by this encoding.
    fn load(&self, path: &Path) -> Result<SparseVoxelMap, SerializeError>;
}

/// Available on-disk encodings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapFormat {
    /// Human-readable JSON.
    #[default]
    Json,
    /// Compact little-endian binary.
    Binary,
}

impl MapFormat {
    /// Returns the serializer implementing this format.
    pub fn serializer(self) -> Box<dyn MapSerializer> {
        match self {
            MapFormat::Json => Box::new(JsonSerializer),
            MapFormat::Binary => Box::new(BinarySerializer),
        }
    }

    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(MapFormat::Json),
            "bmap" => Some(MapFormat::Binary),
            _ => None,
        }
    }
}

impl FromStr for MapFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(MapFormat::Json),
            "binary" | "bin" | "bmap" => Ok(MapFormat::Binary),
            other => Err(format!("unknown map format: {other}")),
        }
    }
}

impl fmt::Display for MapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MapFormat::Json => "json",
            MapFormat::Binary => "binary",
        })
    }
}

/// Creates `directory` if needed and returns `directory/name.ext`.
pub(crate) fn prepare_target(
    directory: &Path,
    name: &str,
    extension: &str,
) -> Result<PathBuf, SerializeError> {
    std::fs::create_dir_all(directory).map_err(|e| SerializeError::io(directory, e))?;
    Ok(directory.join(format!("{name}.{extension}")))
}
