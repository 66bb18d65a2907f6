mod clipboard;
mod renderer;

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use clap::{Parser, ValueEnum};
use fluid_clamp_core::engine::ClampExpression;
use fluid_clamp_core::input::coerce_number;
use fluid_clamp_core::model::{Session, ValuePair, ViewportConfig};
use fluid_clamp_core::try_compute_clamp_expression;
use fluid_clamp_protocol::FieldId;
use serde::Serialize;

/// Compute CSS clamp() expressions for fluid typography.
///
/// With --min and --max the expression is printed and the program exits;
/// otherwise an interactive form opens.
#[derive(Parser, Debug)]
#[command(name = "fluid-clamp", version)]
struct Cli {
    /// Pixels per rem.
    #[arg(long, default_value = "16", allow_hyphen_values = true)]
    px_per_rem: String,

    /// Minimum viewport width in px.
    #[arg(long, default_value = "360", allow_hyphen_values = true)]
    min_width: String,

    /// Maximum viewport width in px.
    #[arg(long, default_value = "840", allow_hyphen_values = true)]
    max_width: String,

    /// Value at the minimum width, in rem.
    #[arg(long, requires = "max", allow_hyphen_values = true)]
    min: Option<String>,

    /// Value at the maximum width, in rem.
    #[arg(long, requires = "min", allow_hyphen_values = true)]
    max: Option<String>,

    /// Output format for one-shot mode.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Reject degenerate settings instead of printing NaN/Infinity.
    #[arg(long)]
    strict: bool,

    /// Write logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct ClampReport {
    config: ViewportConfig,
    min_width_rem: f64,
    max_width_rem: f64,
    pair: ValuePair,
    slope: f64,
    intercept: f64,
    /// Whether the expression is valid CSS.
    finite: bool,
    expression: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let one_shot = cli.min.is_some() && cli.max.is_some();
    init_tracing(cli.verbose, cli.log_file.as_deref(), !one_shot)?;

    let config = ViewportConfig::new(
        coerce_number(&cli.px_per_rem),
        coerce_number(&cli.min_width),
        coerce_number(&cli.max_width),
    );

    match (&cli.min, &cli.max) {
        (Some(min), Some(max)) => {
            let pair = ValuePair::new(coerce_number(min), coerce_number(max));
            let mut out = std::io::stdout().lock();
            print_expression(&mut out, &config, &pair, cli.format, cli.strict)
        }
        _ => renderer::run_form(form_session(&config, cli.strict)?),
    }
}

/// Session for the interactive form, seeded with the command-line settings.
fn form_session(config: &ViewportConfig, strict: bool) -> Result<Session> {
    if strict {
        config.validate().context("invalid viewport settings")?;
    }
    let mut session = Session::new();
    session.set_field(FieldId::PixelsPerRem, config.pixels_per_rem);
    session.set_field(FieldId::MinWidthPx, config.min_width_px);
    session.set_field(FieldId::MaxWidthPx, config.max_width_px);
    Ok(session)
}

fn print_expression(
    out: &mut impl Write,
    config: &ViewportConfig,
    pair: &ValuePair,
    format: OutputFormat,
    strict: bool,
) -> Result<()> {
    let computed = ClampExpression::from_pair(pair, config);
    let expression = if strict {
        try_compute_clamp_expression(pair, config).context("refusing to compute expression")?
    } else {
        computed.to_string()
    };
    if computed.is_finite() {
        tracing::info!(%expression, "computed");
    } else {
        tracing::warn!(%expression, "expression contains non-finite values");
    }

    match format {
        OutputFormat::Text => writeln!(out, "{expression}")?,
        OutputFormat::Json => {
            let report = ClampReport {
                config: *config,
                min_width_rem: config.min_width_rem(),
                max_width_rem: config.max_width_rem(),
                pair: *pair,
                slope: computed.line.slope,
                intercept: computed.line.intercept,
                finite: computed.is_finite(),
                expression,
            };
            // serde_json writes non-finite floats as null.
            serde_json::to_writer_pretty(&mut *out, &report)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn init_tracing(verbose: u8, log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let builder = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("create log file '{}'", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        // The alternate screen owns the terminal; stderr output would corrupt it.
        None if interactive => {}
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}
