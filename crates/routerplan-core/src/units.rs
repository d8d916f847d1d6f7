//! Unit table and conversion utilities
//!
//! Maps the unit suffixes a user may type after a number to a linear or
//! angular unit, and converts between linear units exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linear units recognized after a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LinearUnit {
    #[default]
    Millimeter,
    Centimeter,
    Meter,
    Inch,
    Foot,
}

impl LinearUnit {
    /// Size of one unit in micrometers. Integer so that ratios between
    /// units divide exactly where the true ratio is representable.
    const fn micrometers(self) -> u32 {
        match self {
            Self::Millimeter => 1_000,
            Self::Centimeter => 10_000,
            Self::Meter => 1_000_000,
            Self::Inch => 25_400,
            Self::Foot => 304_800,
        }
    }

    /// Multiplier converting a value in `self` into `target`
    pub fn factor_to(self, target: LinearUnit) -> f64 {
        if self == target {
            return 1.0;
        }
        f64::from(self.micrometers()) / f64::from(target.micrometers())
    }

    /// Short symbol used for display
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Inch => "in",
            Self::Foot => "ft",
        }
    }
}

impl fmt::Display for LinearUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for LinearUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match UNIT_TABLE_ENTRIES
            .iter()
            .find(|(suffix, _)| suffix.eq_ignore_ascii_case(s.trim()))
        {
            Some((_, Unit::Linear(unit))) => Ok(*unit),
            _ => Err(format!("Unknown linear unit: {}", s)),
        }
    }
}

/// Angular units recognized after a number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    Degree,
    Radian,
}

impl AngleUnit {
    /// Multiplier converting a value in `self` into degrees
    pub fn factor_to_degrees(self) -> f64 {
        match self {
            Self::Degree => 1.0,
            Self::Radian => 180.0 / std::f64::consts::PI,
        }
    }
}

/// A unit recognized by the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Linear(LinearUnit),
    Angular(AngleUnit),
}

impl Unit {
    /// Whether this unit tags its literal as an angle
    pub fn is_angular(self) -> bool {
        matches!(self, Unit::Angular(_))
    }
}

const UNIT_TABLE_ENTRIES: &[(&str, Unit)] = &[
    ("mm", Unit::Linear(LinearUnit::Millimeter)),
    ("millimeter", Unit::Linear(LinearUnit::Millimeter)),
    ("millimeters", Unit::Linear(LinearUnit::Millimeter)),
    ("millimetre", Unit::Linear(LinearUnit::Millimeter)),
    ("millimetres", Unit::Linear(LinearUnit::Millimeter)),
    ("cm", Unit::Linear(LinearUnit::Centimeter)),
    ("centimeter", Unit::Linear(LinearUnit::Centimeter)),
    ("centimeters", Unit::Linear(LinearUnit::Centimeter)),
    ("centimetre", Unit::Linear(LinearUnit::Centimeter)),
    ("centimetres", Unit::Linear(LinearUnit::Centimeter)),
    ("m", Unit::Linear(LinearUnit::Meter)),
    ("meter", Unit::Linear(LinearUnit::Meter)),
    ("meters", Unit::Linear(LinearUnit::Meter)),
    ("metre", Unit::Linear(LinearUnit::Meter)),
    ("metres", Unit::Linear(LinearUnit::Meter)),
    ("in", Unit::Linear(LinearUnit::Inch)),
    ("inch", Unit::Linear(LinearUnit::Inch)),
    ("inches", Unit::Linear(LinearUnit::Inch)),
    ("\"", Unit::Linear(LinearUnit::Inch)),
    ("ft", Unit::Linear(LinearUnit::Foot)),
    ("foot", Unit::Linear(LinearUnit::Foot)),
    ("feet", Unit::Linear(LinearUnit::Foot)),
    ("'", Unit::Linear(LinearUnit::Foot)),
    ("deg", Unit::Angular(AngleUnit::Degree)),
    ("degree", Unit::Angular(AngleUnit::Degree)),
    ("degrees", Unit::Angular(AngleUnit::Degree)),
    ("\u{b0}", Unit::Angular(AngleUnit::Degree)),
    ("rad", Unit::Angular(AngleUnit::Radian)),
    ("radian", Unit::Angular(AngleUnit::Radian)),
    ("radians", Unit::Angular(AngleUnit::Radian)),
];

/// Unit lookup table plus the canonical linear unit values convert into
///
/// Cheap to copy; the suffix list itself is static.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UnitTable {
    canonical: LinearUnit,
}

impl UnitTable {
    /// Table converting into millimeters
    pub fn new() -> Self {
        Self::default()
    }

    /// Table converting into the given canonical linear unit
    pub fn with_canonical(canonical: LinearUnit) -> Self {
        Self { canonical }
    }

    /// The canonical linear unit
    pub fn canonical(&self) -> LinearUnit {
        self.canonical
    }

    /// Longest suffix at the start of `rest`, with its byte length.
    ///
    /// Alphabetic suffixes must not run into a following letter, so `min`
    /// does not match `m`.
    pub fn lookup_longest(&self, rest: &str) -> Option<(Unit, usize)> {
        let (suffix, unit) = UNIT_TABLE_ENTRIES
            .iter()
            .filter(|(suffix, _)| {
                rest.get(..suffix.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(suffix))
            })
            .max_by_key(|(suffix, _)| suffix.len())?;

        let ends_in_letter = suffix.chars().last().is_some_and(char::is_alphabetic);
        let next_is_letter = rest[suffix.len()..]
            .chars()
            .next()
            .is_some_and(char::is_alphabetic);
        if ends_in_letter && next_is_letter {
            return None;
        }
        Some((*unit, suffix.len()))
    }

    /// Multiplier converting a literal tagged with `unit` into canonical form
    pub fn factor(&self, unit: Unit) -> f64 {
        match unit {
            Unit::Linear(linear) => linear.factor_to(self.canonical),
            Unit::Angular(angular) => angular.factor_to_degrees(),
        }
    }
}
