//! Validated value ranges
//!
//! Both range types check their bounds when constructed, so a range value in
//! hand is always well-formed. Deserialization goes through the same check.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::RangeError;

/// Inclusive integer range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawIntRange")]
pub struct IntRange {
    start: i64,
    end: i64,
}

#[derive(Deserialize)]
struct RawIntRange {
    start: i64,
    end: i64,
}

impl TryFrom<RawIntRange> for IntRange {
    type Error = RangeError;

    fn try_from(raw: RawIntRange) -> Result<Self, Self::Error> {
        IntRange::new(raw.start, raw.end)
    }
}

impl IntRange {
    /// Side counts accepted for regular polygons unless configured otherwise
    pub const POLYGON_SIDES: IntRange = IntRange { start: 3, end: 64 };

    pub fn new(start: i64, end: i64) -> Result<Self, RangeError> {
        if start > end {
            return Err(RangeError::InvertedIntRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.start..=self.end).contains(&value)
    }
}

impl fmt::Display for IntRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// Inclusive floating point range with finite bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFloatRange")]
pub struct FloatRange {
    minimum: f64,
    maximum: f64,
}

#[derive(Deserialize)]
struct RawFloatRange {
    minimum: f64,
    maximum: f64,
}

impl TryFrom<RawFloatRange> for FloatRange {
    type Error = RangeError;

    fn try_from(raw: RawFloatRange) -> Result<Self, Self::Error> {
        FloatRange::new(raw.minimum, raw.maximum)
    }
}

impl FloatRange {
    pub fn new(minimum: f64, maximum: f64) -> Result<Self, RangeError> {
        if !minimum.is_finite() || !maximum.is_finite() {
            return Err(RangeError::NonFiniteBound);
        }
        if minimum > maximum {
            return Err(RangeError::InvertedFloatRange { minimum, maximum });
        }
        Ok(Self { minimum, maximum })
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn maximum(&self) -> f64 {
        self.maximum
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.minimum..=self.maximum).contains(&value)
    }
}

impl fmt::Display for FloatRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.minimum, self.maximum)
    }
}
