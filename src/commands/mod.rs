//! Subcommand implementations.
pub mod emit;
pub mod serve;
pub mod stress;
pub mod version;

use anyhow::{Context as _, Result};
use std::io::Write;

use crate::cli::GlobalOpts;
use crate::config::LogConfig;
use crate::logging::LogSink;

/// Sink configuration and the open sink shared by every command that writes.
#[derive(Debug)]
pub struct CommandSetup {
    /// Effective configuration after command-line overrides.
    pub config: LogConfig,
    /// Sink opened from [`config`](Self::config).
    pub sink: LogSink,
}

impl CommandSetup {
    /// Load the configuration, apply overrides and open the sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file cannot be loaded. Sink
    /// setup problems are not errors; the sink runs mirror-only instead.
    pub fn init(global: &GlobalOpts) -> Result<Self> {
        let config = resolve_config(global)?;
        let sink = LogSink::new(&config);
        tracing::debug!(
            identifier = %config.domain_identifier,
            path = ?sink.path(),
            degraded = sink.is_degraded(),
            "sink opened"
        );
        Ok(Self { config, sink })
    }
}

/// Build the effective [`LogConfig`]: the file named by `--config` (or the
/// defaults), then `--identifier` and `--container` on top.
///
/// # Errors
///
/// Returns an error if the configuration file exists but cannot be read or
/// parsed.
pub fn resolve_config(global: &GlobalOpts) -> Result<LogConfig> {
    let mut config = match &global.config {
        Some(path) => LogConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => LogConfig::default(),
    };
    if let Some(identifier) = &global.identifier {
        config.domain_identifier.clone_from(identifier);
    }
    if let Some(container) = &global.container {
        config.container = Some(container.clone());
    }
    Ok(config)
}

/// Write one line to stdout.
fn say(line: &str) -> Result<()> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "{line}").context("writing to stdout")
}
