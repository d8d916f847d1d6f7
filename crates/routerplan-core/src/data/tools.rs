//! Tool type definitions
//!
//! This module provides:
//! - Tool type definitions (name, supported flag, published properties)
//! - Named tools referring to a tool type
//! - A read-only lookup table loaded from JSON

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{DataError, Error, Result};

/// A kind of cutting tool the planner knows about
///
/// Field order matches the external definition files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolTypeDefinition {
    /// Unique type name (e.g. "end_mill")
    pub type_name: String,
    /// Whether operations may use this tool type
    pub supported: bool,
    /// Property names the tool type publishes, in display order
    #[serde(default)]
    pub property_names: Vec<String>,
}

impl ToolTypeDefinition {
    pub fn new(type_name: impl Into<String>, supported: bool) -> Self {
        Self {
            type_name: type_name.into(),
            supported,
            property_names: Vec::new(),
        }
    }

    /// Add a published property name
    pub fn with_property(mut self, name: impl Into<String>) -> Self {
        self.property_names.push(name.into());
        self
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.property_names.iter().any(|p| p == name)
    }
}

/// A user-facing tool name bound to a tool type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolName {
    pub name: String,
    pub tool_type: String,
}

/// Read-only lookup of tool types by name
///
/// Preserves definition order for listing.
#[derive(Debug, Clone, Default)]
pub struct ToolTypeTable {
    definitions: Vec<ToolTypeDefinition>,
    index: HashMap<String, usize>,
}

impl ToolTypeTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, rejecting duplicate type names
    pub fn from_definitions(definitions: Vec<ToolTypeDefinition>) -> Result<Self> {
        let mut table = Self::new();
        for definition in definitions {
            table.add(definition)?;
        }
        Ok(table)
    }

    /// Parse a JSON array of definitions
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<ToolTypeDefinition> = serde_json::from_str(json)?;
        let table = Self::from_definitions(definitions)?;
        debug!("Loaded {} tool type definitions", table.len());
        Ok(table)
    }

    fn add(&mut self, definition: ToolTypeDefinition) -> Result<()> {
        if self.index.contains_key(&definition.type_name) {
            return Err(DataError::DuplicateEntry {
                name: definition.type_name,
            }
            .into());
        }
        self.index
            .insert(definition.type_name.clone(), self.definitions.len());
        self.definitions.push(definition);
        Ok(())
    }

    /// Get a tool type by name
    pub fn get(&self, type_name: &str) -> Option<&ToolTypeDefinition> {
        self.index.get(type_name).map(|&i| &self.definitions[i])
    }

    /// Look up a tool type and require it to be supported
    pub fn require_supported(&self, type_name: &str) -> Result<&ToolTypeDefinition> {
        let definition = self.get(type_name).ok_or_else(|| {
            Error::from(DataError::UnknownEntry {
                kind: "tool type",
                name: type_name.to_string(),
            })
        })?;
        if !definition.supported {
            return Err(DataError::UnsupportedToolType {
                name: type_name.to_string(),
            }
            .into());
        }
        Ok(definition)
    }

    /// Resolve a named tool to its (supported) type
    pub fn resolve_tool(&self, tool: &ToolName) -> Result<&ToolTypeDefinition> {
        self.require_supported(&tool.tool_type)
    }

    /// All supported tool types in definition order
    pub fn supported(&self) -> impl Iterator<Item = &ToolTypeDefinition> {
        self.definitions.iter().filter(|d| d.supported)
    }

    /// All tool types in definition order
    pub fn iter(&self) -> impl Iterator<Item = &ToolTypeDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
