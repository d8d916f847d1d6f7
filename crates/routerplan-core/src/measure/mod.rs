//! Measurement text interpretation
//!
//! Turns free-form measurement and angle text into canonical values:
//! raw text → [`Token`]s → [`CanonicalValue`].
//!
//! ```rust
//! use routerplan_core::measure::{evaluate_length_text, SignPolicy};
//! use routerplan_core::units::{LinearUnit, UnitTable};
//!
//! let table = UnitTable::with_canonical(LinearUnit::Inch);
//! let value = evaluate_length_text("(1/4 + 1/8) in", &table, SignPolicy::NonNegative).unwrap();
//! assert_eq!(value.magnitude, 0.375);
//! ```

mod angle;
mod eval;
mod text;
mod token;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use angle::{evaluate_angle, normalize_degrees, AngleDirection};
pub use eval::evaluate;
pub use text::{RawAngle, RawMeasurement};
pub use token::{tokenize, Paren, Symbol, Token, TokenKind};

use crate::error::{MeasureError, UnitError};
use crate::units::UnitTable;

/// What a canonical value measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Length,
    Angle,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Length => write!(f, "length"),
            Self::Angle => write!(f, "angle"),
        }
    }
}

/// A finite magnitude in the canonical unit of its dimension
///
/// Lengths are in the unit table's canonical linear unit; angles are always
/// degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanonicalValue {
    pub magnitude: f64,
    pub dimension: Dimension,
}

impl CanonicalValue {
    pub fn length(magnitude: f64) -> Self {
        Self {
            magnitude,
            dimension: Dimension::Length,
        }
    }

    pub fn angle(magnitude: f64) -> Self {
        Self {
            magnitude,
            dimension: Dimension::Angle,
        }
    }
}

/// Whether a length call site accepts negative results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SignPolicy {
    /// Sizes, radii, diameters
    #[default]
    NonNegative,
    /// Relative offsets
    Signed,
}

/// Evaluate tokens that must describe a length.
pub fn evaluate_length(
    tokens: &[Token<'_>],
    table: &UnitTable,
    policy: SignPolicy,
) -> Result<CanonicalValue, MeasureError> {
    let value = evaluate(tokens, table)?;
    if value.dimension != Dimension::Length {
        return Err(UnitError::DimensionMismatch {
            left: Dimension::Length,
            right: value.dimension,
        }
        .into());
    }
    if policy == SignPolicy::NonNegative && value.magnitude < 0.0 {
        return Err(UnitError::NegativeLength {
            value: value.magnitude,
        }
        .into());
    }
    Ok(value)
}

/// Tokenize and evaluate in one step.
pub fn evaluate_text(text: &str, table: &UnitTable) -> Result<CanonicalValue, MeasureError> {
    let tokens = tokenize(text, table)?;
    evaluate(&tokens, table)
}

/// Tokenize and evaluate a length in one step.
pub fn evaluate_length_text(
    text: &str,
    table: &UnitTable,
    policy: SignPolicy,
) -> Result<CanonicalValue, MeasureError> {
    let tokens = tokenize(text, table)?;
    evaluate_length(&tokens, table, policy)
}

/// Tokenize and evaluate an angle in one step.
pub fn evaluate_angle_text(
    text: &str,
    table: &UnitTable,
    direction: Option<AngleDirection>,
) -> Result<CanonicalValue, MeasureError> {
    let tokens = tokenize(text, table)?;
    evaluate_angle(&tokens, table, direction)
}
