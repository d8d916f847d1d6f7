//! # RouterPlan
//!
//! Resolves measurement-driven cut layouts for CNC routers into absolute
//! machine coordinates.
//!
//! ## Architecture
//!
//! RouterPlan is organized as a workspace with multiple crates:
//!
//! 1. **routerplan-core** - Measurement tokenizer and evaluator, unit table,
//!    angle normalization, tool type and material tables
//! 2. **routerplan-designer** - Coordinate resolver, operation resolver,
//!    cut templates
//! 3. **routerplan-settings** - Configuration files and validation
//! 4. **routerplan** - Command line binary that integrates all crates

pub use routerplan_core as core;
pub use routerplan_designer as designer;
pub use routerplan_settings as settings;

pub use routerplan_core::{
    AngleDirection, CanonicalValue, Dimension, Error, LinearUnit, MeasureError, RawAngle,
    RawMeasurement, Result, SignPolicy, UnitTable,
};
pub use routerplan_designer::{
    CanonicalOperation, CutTemplate, FrameSet, Operation, OperationSpec, Placement, ResolveError,
    Resolver,
};
pub use routerplan_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Initialize logging
///
/// Logs go to stderr so command output on stdout stays machine readable.
/// `RUST_LOG` overrides `default_level` when set.
pub fn init_logging(format: LogFormat, default_level: tracing::Level) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_line_number(true),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_current_span(false),
            )
            .try_init()?,
    }

    Ok(())
}
