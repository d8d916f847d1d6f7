//! Configuration and settings management for RouterPlan
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats, stored by default in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Units (canonical unit)
//! - Default placement for new operations
//! - Parameter limits
//! - Data files (tool type and material tables)

pub use routerplan_core::units::LinearUnit;
use routerplan_core::{IntRange, MaterialTable, ToolTypeTable, UnitTable};
use routerplan_designer::placement::{check_compatible, Placement};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{ConfigError, SettingsError, SettingsResult};

const APP_DIR: &str = "routerplan";
const CONFIG_FILE: &str = "config.toml";
const MAX_POLYGON_SIDES: i64 = 1024;

/// Unit preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitSettings {
    /// Unit every resolved length is expressed in; bare numbers use it too
    #[serde(default)]
    pub canonical: LinearUnit,
}

/// Limits applied to operation parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimitSettings {
    /// Allowed side counts for regular polygons
    pub polygon_sides: IntRange,
}

impl Default for LimitSettings {
    fn default() -> Self {
        Self {
            polygon_sides: IntRange::POLYGON_SIDES,
        }
    }
}

/// Locations of the lookup tables
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataFiles {
    /// JSON array of tool type definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_types: Option<PathBuf>,
    /// JSON array of material type definitions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub materials: Option<PathBuf>,
}

impl DataFiles {
    /// Load the tool type table, if one is configured
    pub fn load_tool_types(&self) -> SettingsResult<Option<ToolTypeTable>> {
        self.tool_types
            .as_deref()
            .map(|path| -> SettingsResult<ToolTypeTable> {
                let table = ToolTypeTable::from_json(&std::fs::read_to_string(path)?)?;
                debug!("Loaded {} tool types from {}", table.len(), path.display());
                Ok(table)
            })
            .transpose()
    }

    /// Load the material table, if one is configured
    pub fn load_materials(&self) -> SettingsResult<Option<MaterialTable>> {
        self.materials
            .as_deref()
            .map(|path| -> SettingsResult<MaterialTable> {
                let table = MaterialTable::from_json(&std::fs::read_to_string(path)?)?;
                debug!("Loaded {} materials from {}", table.len(), path.display());
                Ok(table)
            })
            .transpose()
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    /// Unit preferences
    #[serde(default)]
    pub units: UnitSettings,
    /// Placement for operations that do not carry their own
    #[serde(default)]
    pub placement: Placement,
    /// Parameter limits
    #[serde(default)]
    pub limits: LimitSettings,
    /// Lookup table locations
    #[serde(default)]
    pub data: DataFiles,
}

enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("").to_string()).into()),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location: `<config dir>/routerplan/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        let dir = dirs::config_dir().ok_or_else(|| {
            ConfigError::UnsupportedPlatform(std::env::consts::OS.to_string())
        })?;
        Ok(dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load the config at the default location, or defaults when absent
    pub fn load_or_default() -> SettingsResult<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from_file(&path)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML), creating parent directories
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| SettingsError::SaveError(e.to_string()))?
            }
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| SettingsError::ConfigDirectory(e.to_string()))?;
        }
        std::fs::write(path, content)?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        check_compatible(self.placement.orientation, self.placement.mode).map_err(|e| {
            SettingsError::InvalidSetting {
                key: "placement".to_string(),
                reason: e.to_string(),
            }
        })?;

        let sides = self.limits.polygon_sides;
        if sides.start() < 3 || sides.end() > MAX_POLYGON_SIDES {
            return Err(ConfigError::ValueOutOfRange {
                key: "limits.polygon_sides".to_string(),
                value: self.limits.polygon_sides.to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Unit table built from the configured canonical unit
    pub fn unit_table(&self) -> UnitTable {
        UnitTable::with_canonical(self.units.canonical)
    }
}
