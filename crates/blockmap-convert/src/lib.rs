//! Turns authored cube arrangements into sparse voxel maps and extends them
//! with rotated or mirrored copies.

pub mod bedrock;
pub mod bounds;
pub mod converter;
pub mod copy_rule;
pub mod error;
pub mod remap;
pub mod source;

pub use bedrock::synthesize_bedrock;
pub use bounds::{FootprintBounds, Normalized, normalize};
pub use converter::{BASE_LAYER_OFFSET, DEFAULT_BEDROCK, DEFAULT_OUTPUT_DIR, MapConverter};
pub use copy_rule::{apply_copy_rule, transform_xz};
pub use error::{ConvertError, CopyRuleError, NormalizeError, Stage};
pub use remap::apply_remappings;
pub use source::{CubeSource, RawCube};
