//! Conversion error types, attributed to the pipeline stage that failed.

use std::fmt;

use blockmap_voxel::{Axis, PaletteError, SerializeError};
use glam::IVec3;

/// Errors raised while normalizing raw cube positions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    /// The cube source produced no cubes.
    #[error("no voxels to normalize")]
    EmptyInput,
    /// A shifted coordinate does not fit the 16-bit block encoding.
    #[error("normalized {axis} coordinate {value} does not fit in 16 bits")]
    CoordinateOverflow { axis: char, value: i64 },
}

/// Errors raised while applying a single copy rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CopyRuleError {
    /// Copies can only extend the map along Z.
    #[error("copy axis {0} is not supported")]
    UnsupportedAxis(Axis),
    /// The rule's own remapping pass referenced an unknown block.
    #[error("copy remapping failed: {0}")]
    Remap(#[source] PaletteError),
    /// A transformed coordinate does not fit the 16-bit block encoding.
    #[error("transformed coordinate ({x}, {z}) does not fit in 16 bits")]
    CoordinateOverflow { x: i32, z: i32 },
    /// The box corners are reversed on at least one axis.
    #[error("copy box is inverted: from {from} is not below to {to}")]
    InvertedBox { from: IVec3, to: IVec3 },
    /// Growing the map's Z size would overflow.
    #[error("map depth {size_z} cannot grow by {growth}")]
    SizeOverflow { size_z: i32, growth: i64 },
}

/// Pipeline stage, used to tell the author where a re-run has to look.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Normalize,
    Remap,
    Bedrock,
    CopyRule(usize),
    Serialize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Normalize => f.write_str("normalize"),
            Stage::Remap => f.write_str("remap"),
            Stage::Bedrock => f.write_str("bedrock"),
            Stage::CopyRule(index) => write!(f, "copy rule {index}"),
            Stage::Serialize => f.write_str("serialize"),
        }
    }
}

/// A failed conversion run. Nothing is written to disk when this is returned
/// from any stage before [`Stage::Serialize`].
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("normalize stage failed: {0}")]
    Normalize(#[from] NormalizeError),

    #[error("remap stage failed: {0}")]
    Remap(#[source] PaletteError),

    #[error("bedrock stage failed: {0}")]
    Bedrock(#[source] PaletteError),

    #[error("copy rule {index} failed: {source}")]
    CopyRule {
        index: usize,
        #[source]
        source: CopyRuleError,
    },

    #[error("serialize stage failed: {0}")]
    Serialize(#[source] SerializeError),
}

impl ConvertError {
    /// Stage that produced the failure.
    pub fn stage(&self) -> Stage {
        match self {
            ConvertError::Normalize(_) => Stage::Normalize,
            ConvertError::Remap(_) => Stage::Remap,
            ConvertError::Bedrock(_) => Stage::Bedrock,
            ConvertError::CopyRule { index, .. } => Stage::CopyRule(*index),
            ConvertError::Serialize(_) => Stage::Serialize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Normalize.to_string(), "normalize");
        assert_eq!(Stage::CopyRule(3).to_string(), "copy rule 3");
    }

    #[test]
    fn test_copy_rule_error_names_index() {
        let err = ConvertError::CopyRule {
            index: 2,
            source: CopyRuleError::UnsupportedAxis(Axis::X),
        };
        assert_eq!(err.stage(), Stage::CopyRule(2));
        assert_eq!(err.to_string(), "copy rule 2 failed: copy axis X is not supported");
    }

    #[test]
    fn test_bedrock_error_stage() {
        let err = ConvertError::Bedrock(PaletteError::UnknownBlockType("bedrock".into()));
        assert_eq!(err.stage(), Stage::Bedrock);
        assert!(err.to_string().contains("\"bedrock\""));
    }
}
