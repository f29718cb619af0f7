//! Category-scoped emit handle.
use std::sync::Arc;

use super::detail::Details;
use super::sink::SinkHandle;
use super::types::{Level, Log};

/// Lightweight handle bound to one category and one [`LogSink`].
///
/// Cloning is cheap and every clone writes through the same sink. Emitting
/// enqueues the record and returns; the caller never waits for file I/O or
/// for other pending records. Ordering is global across the sink: records
/// from all loggers appear in the order the sink accepted them.
///
/// The leveled helpers (`debug`, `info`, `notice`, `error`, `fault` and their
/// `_with` variants) come from the [`Log`] trait.
///
/// [`LogSink`]: super::sink::LogSink
#[derive(Debug, Clone)]
pub struct CategoryLogger {
    category: Arc<str>,
    sink: SinkHandle,
}

impl CategoryLogger {
    pub(super) fn new(category: impl Into<String>, sink: SinkHandle) -> Self {
        let category: String = category.into();
        Self {
            category: category.into(),
            sink,
        }
    }

    /// Category stamped on every record from this logger.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Subsystem of the sink this logger writes to.
    #[must_use]
    pub fn subsystem(&self) -> &str {
        self.sink.subsystem()
    }

    /// Create a logger for another category on the same sink.
    #[must_use]
    pub fn with_category(&self, category: impl Into<String>) -> Self {
        Self::new(category, self.sink.clone())
    }
}

impl Log for CategoryLogger {
    fn emit(&self, level: Level, message: &str, details: Details) {
        self.sink
            .submit(Arc::clone(&self.category), level, message.to_string(), details);
    }
}
