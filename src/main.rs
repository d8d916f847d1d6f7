use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

use routerplan::{init_logging, LogFormat};
use routerplan_core::{
    evaluate_angle_text, evaluate_text, AngleDirection, CanonicalValue, Dimension, LinearUnit,
    UnitTable,
};
use routerplan_designer::{CutTemplate, FrameSet, ResolveContext, Resolver};
use routerplan_settings::Config;

#[derive(Parser)]
#[command(version, about = "Resolve measurement-driven cut layouts for CNC routers")]
struct Cli {
    /// Config file (.toml or .json); defaults to the platform config directory
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log line format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    log_format: LogFormatArg,

    /// Log at info level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Evaluate one measurement or angle expression
    Eval {
        /// Expression text, e.g. "1 1/2 in + 3mm"
        #[arg(allow_hyphen_values = true)]
        text: String,

        /// Treat the text as an angle in degrees
        #[arg(long)]
        angle: bool,

        /// Turning direction applied to an angle (left, right, cw, ccw)
        #[arg(long, requires = "angle")]
        direction: Option<AngleDirection>,

        /// Canonical unit for lengths; overrides the config
        #[arg(long)]
        unit: Option<LinearUnit>,
    },
    /// Resolve every operation of a cut template and print them as JSON
    Resolve {
        /// Template JSON file
        template: PathBuf,

        /// JSON file with the material, part and workspace boxes
        #[arg(long, value_name = "FILE")]
        frames: PathBuf,

        /// Resolve independent operations on all cores
        #[arg(long)]
        parallel: bool,
    },
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from_file(path)?,
        None => Config::load_or_default()?,
    };
    debug!("Canonical unit: {}", config.units.canonical);
    Ok(config)
}

fn format_value(value: &CanonicalValue, table: &UnitTable) -> String {
    match value.dimension {
        Dimension::Length => format!("{} {}", value.magnitude, table.canonical().symbol()),
        Dimension::Angle => format!("{} deg", value.magnitude),
    }
}

fn run_eval(
    config: &Config,
    text: &str,
    angle: bool,
    direction: Option<AngleDirection>,
    unit: Option<LinearUnit>,
) -> anyhow::Result<()> {
    let table = unit.map_or_else(|| config.unit_table(), UnitTable::with_canonical);
    let value = if angle {
        evaluate_angle_text(text, &table, direction)
    } else {
        evaluate_text(text, &table)
    }
    .with_context(|| format!("cannot evaluate '{}'", text))?;
    println!("{}", format_value(&value, &table));
    Ok(())
}

fn run_resolve(
    config: &Config,
    template_path: &Path,
    frames_path: &Path,
    parallel: bool,
) -> anyhow::Result<()> {
    let template = CutTemplate::from_json(
        &fs::read_to_string(template_path)
            .with_context(|| format!("cannot read {}", template_path.display()))?,
    )
    .with_context(|| format!("invalid template {}", template_path.display()))?;
    let frames: FrameSet = serde_json::from_str(
        &fs::read_to_string(frames_path)
            .with_context(|| format!("cannot read {}", frames_path.display()))?,
    )
    .with_context(|| format!("invalid frames {}", frames_path.display()))?;

    let tool_types = config.data.load_tool_types()?;
    let materials = config.data.load_materials()?;
    let mut resolver = Resolver::new(config.unit_table())
        .with_polygon_sides(config.limits.polygon_sides)
        .with_default_placement(config.placement);
    if let Some(tool_types) = &tool_types {
        resolver = resolver.with_tool_types(tool_types);
    }
    if let Some(materials) = &materials {
        resolver = resolver.with_materials(materials);
    }

    info!(
        "Resolving '{}' ({} operations)",
        template.name,
        template.len()
    );
    let ctx = ResolveContext::new(frames);
    let resolved = if parallel {
        template.resolve_parallel(&resolver, ctx)?
    } else {
        template.resolve_in_order(&resolver, ctx)?
    };
    println!("{}", serde_json::to_string_pretty(&resolved)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Json => LogFormat::Json,
    };
    let level = if cli.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    init_logging(format, level)?;

    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Eval {
            text,
            angle,
            direction,
            unit,
        } => run_eval(&config, &text, angle, direction, unit),
        Command::Resolve {
            template,
            frames,
            parallel,
        } => run_resolve(&config, &template, &frames, parallel),
    }
}
