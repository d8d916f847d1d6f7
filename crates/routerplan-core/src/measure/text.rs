//! Textual wrappers for measurement and angle fields.
//!
//! The wrappers hold exactly what the user typed. They serialize as a bare
//! JSON string and never normalize the text, whether or not it parses.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::angle::{evaluate_angle, AngleDirection};
use super::token::tokenize;
use super::{evaluate_length, CanonicalValue, SignPolicy};
use crate::error::MeasureError;
use crate::units::UnitTable;

/// User-entered measurement text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMeasurement(String);

impl RawMeasurement {
    /// Wrap text verbatim. Never fails; validity is checked on evaluation.
    pub fn parse(text: &str) -> Self {
        Self(text.to_owned())
    }

    /// The original text
    pub fn to_text(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Evaluate as a length in the table's canonical unit
    pub fn evaluate(
        &self,
        table: &UnitTable,
        policy: SignPolicy,
    ) -> Result<CanonicalValue, MeasureError> {
        let tokens = tokenize(&self.0, table)?;
        evaluate_length(&tokens, table, policy)
    }
}

impl fmt::Display for RawMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// User-entered angle text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawAngle(String);

impl RawAngle {
    /// Wrap text verbatim. Never fails; validity is checked on evaluation.
    pub fn parse(text: &str) -> Self {
        Self(text.to_owned())
    }

    /// The original text
    pub fn to_text(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Evaluate into normalized degrees
    pub fn evaluate(
        &self,
        table: &UnitTable,
        direction: Option<AngleDirection>,
    ) -> Result<CanonicalValue, MeasureError> {
        let tokens = tokenize(&self.0, table)?;
        evaluate_angle(&tokens, table, direction)
    }
}

impl fmt::Display for RawAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
