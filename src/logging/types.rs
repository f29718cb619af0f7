//! Core logging types: severity levels and the [`Log`] trait.
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::detail::Details;
use crate::error::LevelParseError;

/// Severity of a log record, ordered from least to most important.
///
/// The names match the unified-logging vocabulary the files are read with,
/// including `default` for records without a more specific severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Verbose diagnostics.
    Debug,
    /// Informational message.
    Info,
    /// Unclassified message.
    Default,
    /// A recoverable error.
    Error,
    /// A bug or unrecoverable state.
    Fault,
}

impl Level {
    /// Every level, in ascending severity.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Default,
        Self::Error,
        Self::Fault,
    ];

    /// Name as written into the `level` key of a record.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Default => "default",
            Self::Error => "error",
            Self::Fault => "fault",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LevelParseError(s.to_string()))
    }
}

/// Generate a pair of provided convenience methods per severity: one
/// without details and a `_with` variant that takes a detail map.
macro_rules! leveled_methods {
    ($($method:ident, $method_with:ident => $level:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Emit a message at the `", stringify!($method), "` level.")]
            fn $method(&self, message: &str) {
                self.emit(Level::$level, message, Details::new());
            }

            #[doc = concat!("Emit a message with details at the `", stringify!($method), "` level.")]
            fn $method_with(&self, message: &str, details: Details) {
                self.emit(Level::$level, message, details);
            }
        )+
    };
}

/// Abstraction over emit surfaces.
///
/// [`CategoryLogger`](super::logger::CategoryLogger) is the production
/// implementation. Components that only need to report diagnostics take a
/// `&dyn Log` or `Arc<dyn Log>` so they can be exercised with a test double.
///
/// Emitting never blocks on I/O and never fails observably.
pub trait Log: Send + Sync {
    /// Hand one record to the sink and return immediately.
    fn emit(&self, level: Level, message: &str, details: Details);

    leveled_methods! {
        debug, debug_with => Debug,
        info, info_with => Info,
        notice, notice_with => Default,
        error, error_with => Error,
        fault, fault_with => Fault,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Captured {
        entries: Mutex<Vec<(Level, String, Details)>>,
    }

    impl Log for Captured {
        fn emit(&self, level: Level, message: &str, details: Details) {
            self.entries
                .lock()
                .unwrap()
                .push((level, message.to_string(), details));
        }
    }

    #[test]
    fn levels_are_ordered_by_severity() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Default);
        assert!(Level::Default < Level::Error);
        assert!(Level::Error < Level::Fault);
    }

    #[test]
    fn level_display_matches_record_names() {
        let names: Vec<String> = Level::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["debug", "info", "default", "error", "fault"]);
    }

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("FAULT".parse::<Level>().unwrap(), Level::Fault);
        assert_eq!(" info ".parse::<Level>().unwrap(), Level::Info);
    }

    #[test]
    fn level_rejects_unknown_name() {
        let err = "warn".parse::<Level>().unwrap_err();
        assert_eq!(err, LevelParseError("warn".to_string()));
    }

    #[test]
    fn level_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Level::Default).unwrap(),
            "\"default\""
        );
    }

    #[test]
    fn provided_methods_route_to_emit() {
        let log = Captured::default();
        log.debug("d");
        log.notice("n");
        let mut details = Details::new();
        details.insert("k".to_string(), "v".into());
        log.fault_with("f", details.clone());

        let entries = log.entries.lock().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, Level::Debug);
        assert_eq!(entries[1].0, Level::Default);
        assert_eq!(entries[2], (Level::Fault, "f".to_string(), details));
    }
}
