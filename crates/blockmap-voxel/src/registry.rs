//! Block type registry: maps human-readable block names to compact
//! [`BlockTypeId`] palette indices.
//!
//! The registry is built once per conversion run. Air is always ID 0 so that a
//! zero-initialized dense grid represents empty space.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Compact palette index stored in every block record (2 bytes).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockTypeId(pub u16);

/// Name of the always-present empty block type.
pub const AIR_NAME: &str = "air";

/// Errors raised when resolving a block name through a [`Palette`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// The name is not registered in the palette.
    #[error("unknown block type: {0:?}")]
    UnknownBlockType(String),
}

/// Errors that can occur during block type registration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A type with the same name has already been registered.
    #[error("duplicate block type name: {0}")]
    DuplicateName(String),
    /// All 65 535 user-defined slots have been consumed.
    #[error("block type registry is full (max 65536 types)")]
    RegistryFull,
}

/// Name → index resolution used by remapping and bedrock synthesis.
///
/// Lookups happen at the point of use, so a palette that lacks a name fails
/// the stage that needed it rather than the rule parser.
pub trait Palette {
    /// Returns the index registered for `name`.
    fn index_of(&self, name: &str) -> Result<BlockTypeId, PaletteError>;

    /// Number of registered types, air included.
    fn type_count(&self) -> usize;
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Dense list of block names with O(1) reverse lookup by name.
#[derive(Debug, Clone)]
pub struct BlockRegistry {
    /// `names[id.0]` is the name of `id`.
    names: Vec<String>,
    name_to_id: HashMap<String, BlockTypeId>,
}

impl BlockRegistry {
    /// Creates a registry with only air registered (ID 0).
    pub fn new() -> Self {
        let mut name_to_id = HashMap::new();
        name_to_id.insert(AIR_NAME.to_string(), BlockTypeId(0));

        Self {
            names: vec![AIR_NAME.to_string()],
            name_to_id,
        }
    }

    /// Builds a registry from an ordered list of names. The first name gets
    /// ID 1, the second ID 2, and so on.
    ///
    /// # Errors
    ///
    /// Fails on the first duplicate name (including an explicit `"air"`).
    pub fn from_names<I, S>(names: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self::new();
        for name in names {
            registry.register(name)?;
        }
        Ok(registry)
    }

    /// Registers a new block type and returns its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateName`] if the name already exists, or
    /// [`RegistryError::RegistryFull`] if all 65 536 slots are consumed.
    pub fn register(&mut self, name: impl Into<String>) -> Result<BlockTypeId, RegistryError> {
        let name = name.into();
        if self.name_to_id.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        if self.names.len() > u16::MAX as usize {
            return Err(RegistryError::RegistryFull);
        }

        let id = BlockTypeId(self.names.len() as u16);
        self.name_to_id.insert(name.clone(), id);
        self.names.push(name);
        Ok(id)
    }

    /// Returns the name for `id`, or `None` if it was never registered.
    pub fn name(&self, id: BlockTypeId) -> Option<&str> {
        self.names.get(id.0 as usize).map(String::as_str)
    }

    /// Returns the ID for a named block type, or `None` if not found.
    pub fn lookup_by_name(&self, name: &str) -> Option<BlockTypeId> {
        self.name_to_id.get(name).copied()
    }

    /// Returns the total number of registered types (including air).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if only air is registered.
    pub fn is_empty(&self) -> bool {
        self.names.len() <= 1
    }

    /// Returns `true` if the given block type is air (ID 0).
    pub fn is_air(&self, id: BlockTypeId) -> bool {
        id.0 == 0
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette for BlockRegistry {
    fn index_of(&self, name: &str) -> Result<BlockTypeId, PaletteError> {
        self.lookup_by_name(name)
            .ok_or_else(|| PaletteError::UnknownBlockType(name.to_string()))
    }

    fn type_count(&self) -> usize {
        self.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
