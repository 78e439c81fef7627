//! Declarative copy and remapping rules, as authored in map configuration.
//!
//! Rules carry block *names*; they are resolved through a
//! [`Palette`](crate::Palette) only when applied.

use std::fmt;
use std::str::FromStr;

use glam::IVec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing rule enums from their textual form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleParseError {
    #[error("unsupported copy type: {0:?}")]
    UnsupportedCopyType(String),
    #[error("unknown copy axis: {0:?}")]
    UnknownAxis(String),
}

/// Rewrites blocks of type `old_name` to `new_name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemappingRule {
    pub old_name: String,
    pub new_name: String,
}

impl RemappingRule {
    pub fn new(old_name: impl Into<String>, new_name: impl Into<String>) -> Self {
        Self {
            old_name: old_name.into(),
            new_name: new_name.into(),
        }
    }
}

/// Geometric transform applied to a copied region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CopyKind {
    Rotate180,
    MirrorX,
    MirrorZ,
}

impl CopyKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            CopyKind::Rotate180 => "Rotate180",
            CopyKind::MirrorX => "MirrorX",
            CopyKind::MirrorZ => "MirrorZ",
        }
    }
}

impl FromStr for CopyKind {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Rotate180" => Ok(CopyKind::Rotate180),
            "MirrorX" => Ok(CopyKind::MirrorX),
            "MirrorZ" => Ok(CopyKind::MirrorZ),
            other => Err(RuleParseError::UnsupportedCopyType(other.to_string())),
        }
    }
}

impl TryFrom<String> for CopyKind {
    type Error = RuleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CopyKind> for String {
    fn from(kind: CopyKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for CopyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction along which copies extend the map. Only `Z` is implemented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Axis {
    X,
    #[default]
    Z,
}

impl FromStr for Axis {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" | "x" => Ok(Axis::X),
            "Z" | "z" => Ok(Axis::Z),
            other => Err(RuleParseError::UnknownAxis(other.to_string())),
        }
    }
}

impl TryFrom<String> for Axis {
    type Error = RuleParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Axis> for String {
    fn from(axis: Axis) -> Self {
        axis.to_string()
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "X",
            Axis::Z => "Z",
        })
    }
}

/// Duplicates the half-open box `from..to` under `kind` and appends the copy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyRule {
    pub from: IVec3,
    pub to: IVec3,
    pub kind: CopyKind,
    #[serde(default)]
    pub axis: Axis,
    #[serde(default)]
    pub remappings: Vec<RemappingRule>,
}

impl CopyRule {
    pub fn new(from: IVec3, to: IVec3, kind: CopyKind, axis: Axis) -> Self {
        Self {
            from,
            to,
            kind,
            axis,
            remappings: Vec::new(),
        }
    }

    pub fn with_remappings(mut self, remappings: Vec<RemappingRule>) -> Self {
        self.remappings = remappings;
        self
    }

    /// Returns `true` if `(x, y, z)` lies in the half-open source box.
    pub fn selects(&self, x: i32, y: i32, z: i32) -> bool {
        (self.from.x..self.to.x).contains(&x)
            && (self.from.y..self.to.y).contains(&y)
            && (self.from.z..self.to.z).contains(&z)
    }
}
