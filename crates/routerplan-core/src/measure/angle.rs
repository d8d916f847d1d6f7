//! Angle evaluation and normalization into `[0, 360)` degrees.

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::eval::evaluate_quantity;
use super::token::Token;
use super::{CanonicalValue, Dimension};
use crate::error::{MeasureError, UnitError};
use crate::units::UnitTable;

/// Directional qualifier attached to an angle field
///
/// `Right` and `Clockwise` are the positive sense; the other two flip the
/// sign before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleDirection {
    Left,
    Right,
    Clockwise,
    CounterClockwise,
}

impl AngleDirection {
    fn sign(self) -> f64 {
        match self {
            Self::Right | Self::Clockwise => 1.0,
            Self::Left | Self::CounterClockwise => -1.0,
        }
    }
}

impl std::str::FromStr for AngleDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "cw" | "clockwise" => Ok(Self::Clockwise),
            "ccw" | "counterclockwise" | "counter_clockwise" => Ok(Self::CounterClockwise),
            _ => Err(format!("Unknown angle direction: {}", s)),
        }
    }
}

/// Wrap degrees into `[0, 360)` by floored modulo.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds up to 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped + 0.0
    }
}

/// Evaluate an angle expression.
///
/// Bare numbers are degrees, radians convert to degrees, and any length unit
/// fails with a dimension mismatch.
pub fn evaluate_angle(
    tokens: &[Token<'_>],
    table: &UnitTable,
    direction: Option<AngleDirection>,
) -> Result<CanonicalValue, MeasureError> {
    let quantity = evaluate_quantity(tokens, table)?;
    if quantity.dimension == Some(Dimension::Length) {
        return Err(UnitError::DimensionMismatch {
            left: Dimension::Angle,
            right: Dimension::Length,
        }
        .into());
    }

    let signed = quantity.value * direction.map_or(1.0, AngleDirection::sign);
    let magnitude = normalize_degrees(signed);
    trace!(raw = quantity.value, normalized = magnitude, "angle evaluated");
    Ok(CanonicalValue {
        magnitude,
        dimension: Dimension::Angle,
    })
}
