//! Material type definitions
//!
//! This module provides:
//! - Material definitions with formal and user-entered feed rates
//! - Optional feed rate limits per material
//! - A read-only material lookup table

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::ranges::FloatRange;
use crate::error::{DataError, Result};

/// A material the planner can cut
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialTypeDefinition {
    /// Unique material name
    pub name: String,
    /// Published feed rate in mm/min
    pub formal_feed_rate: f64,
    /// Feed rate the user typed in, if any (mm/min)
    #[serde(default)]
    pub user_feed_rate: Option<f64>,
    /// Allowed user feed rates
    #[serde(default)]
    pub feed_rate_limits: Option<FloatRange>,
}

impl MaterialTypeDefinition {
    /// Create a new material definition
    pub fn new(name: impl Into<String>, formal_feed_rate: f64) -> Self {
        Self {
            name: name.into(),
            formal_feed_rate,
            user_feed_rate: None,
            feed_rate_limits: None,
        }
    }

    /// Feed rate to cut with: the user's if entered, otherwise the formal one.
    ///
    /// A user feed rate outside the material's limits is an error.
    pub fn effective_feed_rate(&self) -> Result<f64> {
        let Some(user) = self.user_feed_rate else {
            return Ok(self.formal_feed_rate);
        };
        if let Some(limits) = self.feed_rate_limits {
            if !limits.contains(user) {
                return Err(DataError::FeedRateOutOfRange {
                    material: self.name.clone(),
                    feed_rate: user,
                    minimum: limits.minimum(),
                    maximum: limits.maximum(),
                }
                .into());
            }
        }
        Ok(user)
    }
}

/// Read-only material lookup keyed by name
#[derive(Debug, Clone, Default)]
pub struct MaterialTable {
    materials: HashMap<String, MaterialTypeDefinition>,
}

impl MaterialTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, rejecting duplicate names
    pub fn from_definitions(definitions: Vec<MaterialTypeDefinition>) -> Result<Self> {
        let mut materials = HashMap::with_capacity(definitions.len());
        for definition in definitions {
            if materials.contains_key(&definition.name) {
                return Err(DataError::DuplicateEntry {
                    name: definition.name,
                }
                .into());
            }
            materials.insert(definition.name.clone(), definition);
        }
        Ok(Self { materials })
    }

    /// Parse a JSON array of definitions
    pub fn from_json(json: &str) -> Result<Self> {
        let definitions: Vec<MaterialTypeDefinition> = serde_json::from_str(json)?;
        let table = Self::from_definitions(definitions)?;
        debug!("Loaded {} material definitions", table.len());
        Ok(table)
    }

    /// Get a material by name
    pub fn get(&self, name: &str) -> Option<&MaterialTypeDefinition> {
        self.materials.get(name)
    }

    /// Get a material by name or fail
    pub fn require(&self, name: &str) -> Result<&MaterialTypeDefinition> {
        self.get(name).ok_or_else(|| {
            DataError::UnknownEntry {
                kind: "material",
                name: name.to_string(),
            }
            .into()
        })
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
