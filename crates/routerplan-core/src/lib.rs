//! # RouterPlan Core
//!
//! Measurement parsing and shared data types for RouterPlan.
//! Provides the tokenizer, unit table, expression evaluator and angle
//! normalizer, plus the tool and material lookup tables.

pub mod data;
pub mod error;
pub mod measure;
pub mod units;

pub use data::{
    FloatRange, IntRange, MaterialTable, MaterialTypeDefinition, ToolName, ToolTypeDefinition,
    ToolTypeTable,
};

pub use error::{DataError, Error, MeasureError, ParseError, RangeError, Result, UnitError};

pub use measure::{
    evaluate, evaluate_angle, evaluate_angle_text, evaluate_length, evaluate_length_text,
    evaluate_text, normalize_degrees, tokenize, AngleDirection, CanonicalValue, Dimension,
    RawAngle, RawMeasurement, SignPolicy, Token, TokenKind,
};

pub use units::{AngleUnit, LinearUnit, Unit, UnitTable};
