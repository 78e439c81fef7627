//! Binary serialization and deserialization for [`SparseVoxelMap`].
//!
//! The BMAP format is a compact, versioned little-endian layout used for
//! shipped maps. Each block record takes 8 bytes.
//!
//! ## Binary Layout
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 4 | Magic bytes `[0x42, 0x4D, 0x41, 0x50]` ("BMAP") |
//! | 4 | 1 | Format version (`u8`, currently 1) |
//! | 5 | 2 | Name length N (`u16`) |
//! | 7 | N | Name (UTF-8) |
//! | 7+N | 12 | Size x, y, z (`i32` each) |
//! | 19+N | 4 | Block count M (`u32`) |
//! | 23+N | M×8 | Blocks: x, y, z (`i16` each), type (`u16`) |

use std::path::{Path, PathBuf};

use crate::map::{BlockEncoding, MapSize, SparseVoxelMap};
use crate::registry::BlockTypeId;
use crate::serial::{MapSerializer, SerializeError, prepare_target};

/// Magic bytes identifying the BMAP format.
const MAGIC: [u8; 4] = [0x42, 0x4D, 0x41, 0x50];

/// Current format version.
const FORMAT_VERSION: u8 = 1;

/// Bytes per block record.
const BLOCK_RECORD_LEN: usize = 8;

/// Errors that can occur during map decoding.
#[derive(Debug, thiserror::Error)]
pub enum MapDecodeError {
    /// The data does not start with the expected magic bytes.
    #[error("invalid magic bytes")]
    InvalidMagic,
    /// The format version is not supported by this build.
    #[error("unsupported format version: {0}")]
    UnsupportedVersion(u8),
    /// The data is shorter than expected.
    #[error("data truncated: expected {expected} bytes, got {actual}")]
    Truncated {
        /// Minimum expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },
    /// The map name is not valid UTF-8.
    #[error("map name is not valid UTF-8")]
    InvalidName,
}

/// Encodes a map into the BMAP layout.
pub fn encode(map: &SparseVoxelMap) -> Result<Vec<u8>, SerializeError> {
    let name = map.name.as_bytes();
    let name_len = u16::try_from(name.len()).map_err(|_| SerializeError::TooLarge {
        what: "name",
        len: name.len(),
    })?;
    let block_count = u32::try_from(map.blocks.len()).map_err(|_| SerializeError::TooLarge {
        what: "block list",
        len: map.blocks.len(),
    })?;

    let total = 4 + 1 + 2 + name.len() + 12 + 4 + map.blocks.len() * BLOCK_RECORD_LEN;
    let mut buf = Vec::with_capacity(total);

    // Magic + version
    buf.extend_from_slice(&MAGIC);
    buf.push(FORMAT_VERSION);

    // Name
    buf.extend_from_slice(&name_len.to_le_bytes());
    buf.extend_from_slice(name);

    // Size
    for component in [map.size.x, map.size.y, map.size.z] {
        buf.extend_from_slice(&component.to_le_bytes());
    }

    // Blocks
    buf.extend_from_slice(&block_count.to_le_bytes());
    for block in &map.blocks {
        buf.extend_from_slice(&block.x.to_le_bytes());
        buf.extend_from_slice(&block.y.to_le_bytes());
        buf.extend_from_slice(&block.z.to_le_bytes());
        buf.extend_from_slice(&block.block.0.to_le_bytes());
    }

    debug_assert_eq!(buf.len(), total);
    Ok(buf)
}

/// Decodes a map from the BMAP layout.
///
/// Returns an error if the data is corrupted, has an unrecognized version,
/// or is truncated.
pub fn decode(data: &[u8]) -> Result<SparseVoxelMap, MapDecodeError> {
    if data.len() < 4 || data[0..4] != MAGIC {
        return Err(MapDecodeError::InvalidMagic);
    }

    // Need magic(4) + version(1) + name_len(2)
    ensure_len(data, 7)?;
    let version = data[4];
    if version != FORMAT_VERSION {
        return Err(MapDecodeError::UnsupportedVersion(version));
    }

    let name_len = u16::from_le_bytes([data[5], data[6]]) as usize;
    let name_end = 7 + name_len;
    let header_end = name_end + 12 + 4;
    ensure_len(data, header_end)?;

    let name = std::str::from_utf8(&data[7..name_end])
        .map_err(|_| MapDecodeError::InvalidName)?
        .to_string();

    let read_i32 = |offset: usize| {
        i32::from_le_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ])
    };
    let size = MapSize::new(
        read_i32(name_end),
        read_i32(name_end + 4),
        read_i32(name_end + 8),
    );

    let count_offset = name_end + 12;
    let block_count = u32::from_le_bytes([
        data[count_offset],
        data[count_offset + 1],
        data[count_offset + 2],
        data[count_offset + 3],
    ]) as usize;
    ensure_len(data, header_end + block_count * BLOCK_RECORD_LEN)?;

    let blocks = data[header_end..header_end + block_count * BLOCK_RECORD_LEN]
        .chunks_exact(BLOCK_RECORD_LEN)
        .map(|rec| {
            BlockEncoding::new(
                i16::from_le_bytes([rec[0], rec[1]]),
                i16::from_le_bytes([rec[2], rec[3]]),
                i16::from_le_bytes([rec[4], rec[5]]),
                BlockTypeId(u16::from_le_bytes([rec[6], rec[7]])),
            )
        })
        .collect();

    Ok(SparseVoxelMap { name, blocks, size })
}

fn ensure_len(data: &[u8], expected: usize) -> Result<(), MapDecodeError> {
    if data.len() < expected {
        return Err(MapDecodeError::Truncated {
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Writes maps in the BMAP layout (`<name>.bmap`).
#[derive(Clone, Copy, Debug, Default)]
pub struct BinarySerializer;

impl MapSerializer for BinarySerializer {
    fn extension(&self) -> &'static str {
        "bmap"
    }

    fn serialize(
        &self,
        map: SparseVoxelMap,
        directory: &Path,
        name: &str,
    ) -> Result<PathBuf, SerializeError> {
        let bytes = encode(&map)?;
        let path = prepare_target(directory, name, self.extension())?;
        std::fs::write(&path, &bytes).map_err(|e| SerializeError::io(&path, e))?;
        tracing::info!(
            path = %path.display(),
            blocks = map.blocks.len(),
            bytes = bytes.len(),
            "wrote binary map"
        );
        Ok(path)
    }

    fn load(&self, path: &Path) -> Result<SparseVoxelMap, SerializeError> {
        let bytes = std::fs::read(path).map_err(|e| SerializeError::io(path, e))?;
        Ok(decode(&bytes)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
