//! RouterPlan Settings Crate
//!
//! Loads, validates and saves the configuration the resolvers run with:
//! the canonical unit, default placement, parameter limits and the paths
//! of the tool type and material tables.

pub mod config;
pub mod error;

pub use config::{Config, DataFiles, LimitSettings, UnitSettings};
pub use error::{ConfigError, SettingsError, SettingsResult};
