//! Domain-specific error types for the logging core.
//!
//! This module provides structured error types using [`thiserror`].
//! None of these errors cross the emit path: the sink renders a
//! [`SinkError`] into a diagnostic on the mirrored channel and carries on.
//! Only configuration loading and level parsing return them to callers, and
//! the binary converts them to [`anyhow::Error`] at the CLI boundary.
//!
//! # Error types
//!
//! ```text
//! SinkError         setup and per-record write failures, mirrored as text
//! ConfigError       TOML loading, delimiter parsing
//! LevelParseError   unknown severity names
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while setting up or writing through a log sink.
///
/// These are never returned from the emit path. They exist so the text of
/// every diagnostic sent to the mirrored channel comes from one place.
#[derive(Error, Debug)]
pub enum SinkError {
    /// No container location could be resolved for the log files.
    #[error("Failed to resolve a container location for domain \"{0}\"")]
    ContainerUnresolved(String),

    /// The logs directory could not be created.
    #[error("Failed to create logs directory at \"{}\": {source}", .path.display())]
    CreateDirectory {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The log file could not be opened for appending.
    #[error("Failed to create file handle for writing to \"{}\": {source}", .path.display())]
    OpenFile {
        /// File that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A record could not be serialized.
    #[error("Failed to encode message: {message}")]
    Encode {
        /// Message text of the lost record.
        message: String,
        /// Underlying serializer error.
        source: serde_json::Error,
    },

    /// A serialized record could not be appended.
    #[error("Failed to write message: {message}")]
    Write {
        /// Message text of the lost record.
        message: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The writer thread is no longer accepting records.
    #[error("Log writer is gone, dropping message: {0}")]
    WriterGone(String),
}

/// Errors that arise from configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {}: {source}", .path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The config file is not valid TOML or has the wrong shape.
    #[error("Invalid TOML in {}: {source}", .path.display())]
    Parse {
        /// Path to the malformed file.
        path: PathBuf,
        /// Underlying TOML error.
        source: toml::de::Error,
    },

    /// The record delimiter name is not recognised.
    #[error("Invalid delimiter '{0}': must be one of newline, none")]
    InvalidDelimiter(String),
}

/// An unknown severity name was given.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid level '{0}': must be one of debug, info, default, error, fault")]
pub struct LevelParseError(pub String);
