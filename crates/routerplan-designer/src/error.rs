//! Error types for the designer crate.
//!
//! Coordinate errors come from placement resolution; resolve errors wrap
//! everything that can fail while turning an operation into a primitive.

use routerplan_core::MeasureError;
use thiserror::Error;

use crate::placement::{Axis, AxisSide, MeasurementMode, Orientation};

/// Errors raised while resolving a single coordinate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoordinateError {
    /// The placement names no origin anchor.
    #[error("No origin location is set")]
    UndefinedOrigin,

    /// Relative orientation with no previously resolved tool position.
    #[error("Relative orientation needs a previous tool position")]
    NoReferencePosition,

    /// The orientation and measurement mode disagree.
    #[error("Orientation {orientation} cannot be combined with measurement mode {mode}")]
    IncompatibleModeCombination {
        orientation: Orientation,
        mode: MeasurementMode,
    },

    /// An offset side was used on the wrong axis (e.g. `Top` for an x field).
    #[error("Offset side {side} does not apply to the {axis} axis")]
    WrongAxis { side: AxisSide, axis: Axis },

    /// The offset value is an angle.
    #[error("Offset value must be a length")]
    NotALength,

    /// An edge-to-center extent evaluated below zero.
    #[error("Object extent must not be negative: {value}")]
    NegativeExtent { value: f64 },
}

/// Errors raised while resolving an operation.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// A measurement or angle field failed to evaluate.
    #[error("Invalid {field}: {source}")]
    Measure {
        field: &'static str,
        #[source]
        source: MeasureError,
    },

    /// A position could not be placed.
    #[error(transparent)]
    Coordinate(#[from] CoordinateError),

    /// Path data failed syntax validation.
    #[error("Malformed path data at command {index}: {reason}")]
    MalformedPath { index: usize, reason: String },

    /// Tool type or material lookup failed.
    #[error("Tooling error: {0}")]
    Tooling(#[from] routerplan_core::Error),

    /// A template operation failed; `index` is its position in the template.
    #[error("Operation {index} ({kind}): {source}")]
    InOperation {
        index: usize,
        kind: &'static str,
        #[source]
        source: Box<ResolveError>,
    },

    /// A numeric parameter is outside its permitted range.
    #[error("Parameter '{parameter}' out of range: {value} (allowed {allowed})")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: String,
        allowed: String,
    },
}

impl ResolveError {
    pub(crate) fn measure(field: &'static str) -> impl FnOnce(MeasureError) -> Self {
        move |source| ResolveError::Measure { field, source }
    }

    pub(crate) fn malformed_path(index: usize, reason: impl Into<String>) -> Self {
        ResolveError::MalformedPath {
            index,
            reason: reason.into(),
        }
    }
}

/// Result type alias for operation resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;
