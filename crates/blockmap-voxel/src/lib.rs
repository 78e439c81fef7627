//! Block palette, sparse voxel maps, their dense reconstruction, copy/remap
//! rule data, and the JSON and binary map encodings.

pub mod dense;
pub mod map;
pub mod map_binary;
pub mod map_json;
pub mod registry;
pub mod rules;
pub mod serial;

pub use dense::{DenseError, DenseGrid, MAX_DENSE_CELLS};
pub use map::{BlockEncoding, MAX_HEIGHT, MapSize, SparseVoxelMap};
pub use map_binary::{BinarySerializer, MapDecodeError};
pub use map_json::JsonSerializer;
pub use registry::{AIR_NAME, BlockRegistry, BlockTypeId, Palette, PaletteError, RegistryError};
pub use rules::{Axis, CopyKind, CopyRule, RemappingRule, RuleParseError};
pub use serial::{MapFormat, MapSerializer, SerializeError};
