//! Sink configuration loaded from TOML.
pub mod container;
pub mod toml_loader;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::logging::Delimiter;

/// Identifier used when none is configured.
pub const DEFAULT_DOMAIN_IDENTIFIER: &str = "default";

/// Everything a [`LogSink`](crate::logging::LogSink) needs at construction.
///
/// ```toml
/// domain_identifier = "Documents"
/// subsystem = "com.example.provider"
/// container = "/srv/group.example"
/// delimiter = "none"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    /// Identifier of the domain this process manages; part of the file name.
    pub domain_identifier: String,

    /// Subsystem tag for every record. Defaults to the executable name.
    pub subsystem: Option<String>,

    /// Container directory holding `Library/Logs`. Resolved from the
    /// environment when absent (see [`container::resolve`]).
    pub container: Option<PathBuf>,

    /// Bytes written after each record. Records are written back to back
    /// unless `"newline"` is asked for.
    pub delimiter: Delimiter,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            domain_identifier: DEFAULT_DOMAIN_IDENTIFIER.to_string(),
            subsystem: None,
            container: None,
            delimiter: Delimiter::default(),
        }
    }
}

impl LogConfig {
    /// Load from a TOML file; a missing file gives the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid config
    /// TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        toml_loader::load_config(path)
    }

    /// Subsystem tag, falling back to the executable's file stem and then to
    /// the crate name.
    #[must_use]
    pub fn subsystem(&self) -> String {
        self.subsystem.clone().unwrap_or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.file_stem().map(|s| s.to_string_lossy().into_owned()))
                .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
        })
    }

    /// Container directory, from the config or the process environment.
    #[must_use]
    pub fn resolve_container(&self) -> Option<PathBuf> {
        container::resolve(self.container.as_ref(), |key| std::env::var_os(key))
    }
}
