//! Change notification for a managed domain.
//!
//! A [`ChangeNotifier`] tells the system that the content of a domain has
//! changed so that whoever enumerates it re-reads. Notifying is fire and
//! forget: the signal runs on a background thread and failures only show up
//! in the log.
use std::fmt;
use std::io;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::details;
use crate::logging::{CategoryLogger, DetailKey, Log, LogSink};

/// Category used for records about change signalling.
pub const NOTIFIER_CATEGORY: &str = "ChangeNotifier";

/// Something that can announce a change in a domain.
pub trait ChangeNotifier: Send + Sync {
    /// Announce a change. Returns immediately.
    fn notify_change(&self);
}

/// [`ChangeNotifier`] backed by a signal function.
///
/// The function receives the domain identifier and runs on its own thread
/// for every notification. Errors are logged at `error` level with the
/// domain attached.
pub struct SignalNotifier<F> {
    domain_identifier: Arc<str>,
    signal: Arc<F>,
    log: CategoryLogger,
}

impl<F> SignalNotifier<F>
where
    F: Fn(&str) -> anyhow::Result<()> + Send + Sync + 'static,
{
    /// Create a notifier for `domain_identifier` logging through `sink`.
    #[must_use]
    pub fn new(domain_identifier: impl Into<String>, sink: &LogSink, signal: F) -> Self {
        let domain_identifier: String = domain_identifier.into();
        Self {
            domain_identifier: domain_identifier.into(),
            signal: Arc::new(signal),
            log: sink.logger(NOTIFIER_CATEGORY),
        }
    }

    /// Domain this notifier signals for.
    #[must_use]
    pub fn domain_identifier(&self) -> &str {
        &self.domain_identifier
    }

    /// Run the signal on a new thread and hand back its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the thread cannot be spawned.
    pub fn spawn_signal(&self) -> io::Result<JoinHandle<()>> {
        let domain = Arc::clone(&self.domain_identifier);
        let signal = Arc::clone(&self.signal);
        let log = self.log.clone();
        thread::Builder::new()
            .name("domainlog-notify".to_string())
            .spawn(move || {
                if let Err(e) = signal(&*domain) {
                    log.error_with(
                        &format!("Failed to signal change: {e:#}"),
                        details! { DetailKey::Domain => &*domain },
                    );
                }
            })
    }
}

impl<F> ChangeNotifier for SignalNotifier<F>
where
    F: Fn(&str) -> anyhow::Result<()> + Send + Sync + 'static,
{
    fn notify_change(&self) {
        if let Err(e) = self.spawn_signal() {
            self.log.error_with(
                &format!("Failed to start change signal: {e}"),
                details! { DetailKey::Domain => &*self.domain_identifier },
            );
        }
    }
}

impl<F> fmt::Debug for SignalNotifier<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalNotifier")
            .field("domain_identifier", &self.domain_identifier)
            .field("category", &self.log.category())
            .finish_non_exhaustive()
    }
}
