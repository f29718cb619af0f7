//! The JSON object written for each log event, and how records are framed.
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::detail::Details;
use super::types::Level;
use crate::error::ConfigError;

/// Bytes appended after each serialized record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    /// One `\n` per record, for line-oriented readers.
    Newline,
    /// Objects concatenated back to back. A streaming JSON reader splits
    /// them.
    #[default]
    None,
}

impl Delimiter {
    /// Bytes written after a record.
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Newline => b"\n",
            Self::None => b"",
        }
    }
}

impl FromStr for Delimiter {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newline" => Ok(Self::Newline),
            "none" => Ok(Self::None),
            _ => Err(ConfigError::InvalidDelimiter(s.to_string())),
        }
    }
}

/// One log event as written into the JSON-lines file.
///
/// Fields are declared in alphabetical order, which is the order serde
/// writes them in, so every record has its keys sorted:
/// `category`, `date`, `details`, `level`, `message`, `subsystem`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Component that produced the record.
    pub category: String,

    /// Time the sink accepted the record, RFC 3339 UTC with milliseconds.
    pub date: String,

    /// Structured metadata; an empty object when there is none.
    pub details: Details,

    /// Severity.
    pub level: Level,

    /// Human-readable message.
    pub message: String,

    /// Process-wide subsystem tag fixed at sink construction.
    pub subsystem: String,
}

impl LogRecord {
    /// Serialize to compact JSON bytes with no delimiter.
    ///
    /// # Errors
    ///
    /// Returns the serializer error; with string keys and total detail values
    /// this does not happen in practice, but the sink still treats it as a
    /// per-record write failure.
    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Parse a record from one JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if `bytes` is not a record-shaped JSON object.
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}
