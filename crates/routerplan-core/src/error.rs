//! Error handling for RouterPlan
//!
//! Provides the error types shared by every layer of the measurement core:
//! - Parse errors (tokenizing and grammar)
//! - Unit errors (arithmetic and dimensions)
//! - Range errors (value-range construction)
//! - Data errors (configuration lookup tables)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::measure::Dimension;
use thiserror::Error;

/// Parse error type
///
/// Raised by the tokenizer and the expression grammar. Positions are byte
/// offsets into the original text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A character that belongs to no token class
    #[error("Unrecognized character '{character}' at position {position}")]
    UnrecognizedCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character.
        position: usize,
    },

    /// Unbalanced parentheses, dangling operators, empty input and the like
    #[error("Malformed expression at position {position}: {reason}")]
    MalformedExpression {
        /// Byte offset where the problem was detected.
        position: usize,
        /// What was wrong.
        reason: String,
    },
}

impl ParseError {
    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        ParseError::MalformedExpression {
            position,
            reason: reason.into(),
        }
    }
}

/// Unit error type
///
/// Raised while evaluating a well-formed expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    /// A fraction or division with a zero denominator
    #[error("Division by zero at position {position}")]
    DivisionByZero {
        /// Byte offset of the fraction or operator.
        position: usize,
    },

    /// Angle-tagged and length-tagged operands were combined
    #[error("Dimension mismatch: cannot combine {left} with {right}")]
    DimensionMismatch {
        /// Dimension of the left operand (or the expected dimension).
        left: Dimension,
        /// Dimension of the right operand (or the found dimension).
        right: Dimension,
    },

    /// A length evaluated below zero where only non-negative values are allowed
    #[error("Length must not be negative: {value}")]
    NegativeLength {
        /// The evaluated magnitude.
        value: f64,
    },

    /// The result overflowed to infinity or NaN
    #[error("Result is not a finite number")]
    NonFinite,
}

/// Measurement error type
///
/// Everything that can go wrong turning text into a canonical value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    /// Tokenizer or grammar failure
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Arithmetic or dimension failure
    #[error(transparent)]
    Unit(#[from] UnitError),
}

/// Range construction error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeError {
    /// Integer range with start after end
    #[error("Invalid range: start {start} is greater than end {end}")]
    InvertedIntRange {
        /// The requested start.
        start: i64,
        /// The requested end.
        end: i64,
    },

    /// Float range with minimum above maximum
    #[error("Invalid range: minimum {minimum} is greater than maximum {maximum}")]
    InvertedFloatRange {
        /// The requested minimum.
        minimum: f64,
        /// The requested maximum.
        maximum: f64,
    },

    /// Float range bound is NaN or infinite
    #[error("Range bounds must be finite")]
    NonFiniteBound,
}

/// Configuration table error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// Two entries share the same key
    #[error("Duplicate entry: {name}")]
    DuplicateEntry {
        /// The repeated name.
        name: String,
    },

    /// A lookup failed
    #[error("Unknown {kind}: {name}")]
    UnknownEntry {
        /// The kind of record (tool type, material, ...).
        kind: &'static str,
        /// The name that was looked up.
        name: String,
    },

    /// A tool type exists but is flagged as unsupported
    #[error("Tool type not supported: {name}")]
    UnsupportedToolType {
        /// The tool type name.
        name: String,
    },

    /// A user-entered feed rate falls outside the material limits
    #[error("Feed rate {feed_rate} for {material} is outside {minimum}..={maximum}")]
    FeedRateOutOfRange {
        /// The material name.
        material: String,
        /// The offending feed rate.
        feed_rate: f64,
        /// Lower limit.
        minimum: f64,
        /// Upper limit.
        maximum: f64,
    },
}

/// Main error type for RouterPlan core
#[derive(Error, Debug)]
pub enum Error {
    /// Measurement error
    #[error(transparent)]
    Measure(#[from] MeasureError),

    /// Range error
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Lookup table error
    #[error(transparent)]
    Data(#[from] DataError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a measurement error
    pub fn is_measure_error(&self) -> bool {
        matches!(self, Error::Measure(_))
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Measure(err.into())
    }
}

impl From<UnitError> for Error {
    fn from(err: UnitError) -> Self {
        Error::Measure(err.into())
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
