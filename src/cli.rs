//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::{DetailValue, Level};

/// Top-level CLI entry point for the domain log sink.
#[derive(Parser, Debug)]
#[command(
    name = "domainlog",
    about = "Append-only JSON-lines logging for managed domains",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// TOML file with sink settings (missing file means defaults)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Domain identifier used in the log file name
    #[arg(short, long, global = true)]
    pub identifier: Option<String>,

    /// Override the container directory holding Library/Logs
    #[arg(long, global = true)]
    pub container: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append a single record
    Emit(EmitOpts),
    /// Write many records from parallel producers
    Stress(StressOpts),
    /// Run as a background service writing heartbeats until interrupted
    Serve(ServeOpts),
    /// Print version information
    Version,
}

/// Options for the `emit` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct EmitOpts {
    /// Category stamped on the record
    #[arg(long, default_value = "Cli")]
    pub category: String,

    /// Severity: debug, info, default, error or fault
    #[arg(short, long, default_value = "default")]
    pub level: Level,

    /// Detail entry as key=value (repeatable)
    #[arg(short = 'D', long = "detail", value_parser = parse_detail)]
    pub details: Vec<(String, DetailValue)>,

    /// Message text
    pub message: String,
}

/// Options for the `stress` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct StressOpts {
    /// Number of producer threads
    #[arg(short, long, default_value_t = 4)]
    pub threads: usize,

    /// Total number of records to write
    #[arg(short, long, default_value_t = 1000)]
    pub records: u32,
}

/// Options for the `serve` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ServeOpts {
    /// Seconds between heartbeat records
    #[arg(long, default_value_t = 5)]
    pub interval: u64,
}

/// Parse `key=value` into a detail entry.
///
/// `true`/`false` become booleans, whole numbers become integers, decimals
/// become floats, `null` becomes null and anything else stays a string.
fn parse_detail(raw: &str) -> Result<(String, DetailValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty detail key in '{raw}'"));
    }

    let value = if value == "null" {
        DetailValue::Null
    } else if let Ok(b) = value.parse::<bool>() {
        DetailValue::Boolean(b)
    } else if let Ok(i) = value.parse::<i64>() {
        DetailValue::Integer(i)
    } else if let Some(f) = value.parse::<f64>().ok().filter(|f| f.is_finite()) {
        DetailValue::Float(f)
    } else {
        DetailValue::String(value.to_string())
    };
    Ok((key.to_string(), value))
}
