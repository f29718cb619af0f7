//! Secondary, always-available log channel.
use super::types::Level;

/// Best-effort destination that receives every record, whether or not the
/// file write succeeds, plus the sink's own diagnostics.
///
/// Implementations must be cheap and internally thread-safe; the sink calls
/// them from its writer thread without extra synchronization.
#[cfg_attr(test, mockall::automock)]
pub trait Mirror: Send + Sync {
    /// Forward one line of text tagged with subsystem, category and level.
    fn mirror(&self, subsystem: &str, category: &str, level: Level, text: &str);
}

/// [`Mirror`] backed by the process [`tracing`] dispatcher.
///
/// `default` has no `tracing` counterpart and maps to `INFO`; `fault` maps to
/// `ERROR`. The original level is kept in the `level` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingMirror;

/// Target used for every mirrored event, so subscribers can filter on it.
pub const MIRROR_TARGET: &str = "domainlog";

impl Mirror for TracingMirror {
    fn mirror(&self, subsystem: &str, category: &str, level: Level, text: &str) {
        let tag = level.as_str();
        match level {
            Level::Debug => {
                tracing::debug!(target: MIRROR_TARGET, subsystem, category, level = tag, "{text}");
            }
            Level::Info | Level::Default => {
                tracing::info!(target: MIRROR_TARGET, subsystem, category, level = tag, "{text}");
            }
            Level::Error | Level::Fault => {
                tracing::error!(target: MIRROR_TARGET, subsystem, category, level = tag, "{text}");
            }
        }
    }
}
