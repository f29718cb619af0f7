//! The log sink: owner of the log file and its writer thread.
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, SendError, Sender};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread::JoinHandle;

use super::detail::Details;
use super::logger::CategoryLogger;
use super::mirror::{Mirror, TracingMirror};
use super::record::Delimiter;
use super::types::Level;
use super::utils::{log_file_name, logs_directory};
use super::writer::{Command, SINK_CATEGORY, Submission, Writer};
use crate::config::LogConfig;
use crate::error::SinkError;

/// Cheap, cloneable producer side of a [`LogSink`].
///
/// Holds the channel into the writer thread plus what is needed to mirror a
/// record directly when that thread is gone.
///
/// `accepting` is shared with the owning [`LogSink`]. Producers hold its read
/// lock only across the channel send; shutdown takes the write lock to close
/// it before queueing the shutdown marker, so every record either lands
/// ahead of the marker or is turned away here.
#[derive(Clone)]
pub(super) struct SinkHandle {
    sender: Sender<Command>,
    accepting: Arc<RwLock<bool>>,
    subsystem: Arc<str>,
    mirror: Arc<dyn Mirror>,
}

impl SinkHandle {
    /// Enqueue one record. Never blocks on I/O, never fails observably.
    pub(super) fn submit(&self, category: Arc<str>, level: Level, message: String, details: Details) {
        let submission = Submission {
            category,
            level,
            message,
            details,
        };
        let sent = {
            let accepting = self.accepting.read().unwrap_or_else(PoisonError::into_inner);
            if *accepting {
                self.sender.send(Command::Write(submission))
            } else {
                Err(SendError(Command::Write(submission)))
            }
        };
        if let Err(SendError(Command::Write(lost))) = sent {
            self.mirror
                .mirror(&self.subsystem, &lost.category, lost.level, &lost.message);
            self.mirror.mirror(
                &self.subsystem,
                SINK_CATEGORY,
                Level::Error,
                &SinkError::WriterGone(lost.message).to_string(),
            );
        }
    }

    pub(super) fn subsystem(&self) -> &str {
        &self.subsystem
    }
}

impl fmt::Debug for SinkHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SinkHandle")
            .field("subsystem", &self.subsystem)
            .finish_non_exhaustive()
    }
}

/// Append-only JSON-lines log sink.
///
/// Construct one per process and hand out [`CategoryLogger`]s with
/// [`logger`](Self::logger). Every record is mirrored first and then, if a
/// file is open, appended to
/// `<container>/Library/Logs/{identifier}_{created}_{pid}.log.jsonl`.
///
/// Setup problems never surface as errors: if the container cannot be
/// resolved, the directory cannot be created, or the file cannot be opened,
/// the sink reports this once on the mirror and keeps running in
/// mirror-only mode ([`is_degraded`](Self::is_degraded)).
///
/// All file writes happen on one dedicated thread. Dropping the sink (or
/// calling [`shutdown`](Self::shutdown)) writes everything accepted so far
/// and joins that thread.
pub struct LogSink {
    handle: SinkHandle,
    path: Option<PathBuf>,
    degraded: bool,
    worker: Option<JoinHandle<()>>,
}

impl LogSink {
    /// Open a sink for `config`, mirroring through [`tracing`].
    #[must_use]
    pub fn new(config: &LogConfig) -> Self {
        Self::with_mirror(config, Arc::new(TracingMirror))
    }

    /// Open a sink for `config` with an explicit mirrored channel.
    #[must_use]
    pub fn with_mirror(config: &LogConfig, mirror: Arc<dyn Mirror>) -> Self {
        Self::in_container(config, config.resolve_container(), mirror)
    }

    /// Open a sink under an already resolved container; `None` means no
    /// container could be found and the sink starts mirror-only.
    fn in_container(
        config: &LogConfig,
        container: Option<PathBuf>,
        mirror: Arc<dyn Mirror>,
    ) -> Self {
        let subsystem = config.subsystem();
        let (destination, path) = match open_log_file(config, container) {
            Ok((file, path)) => (Some(Box::new(file) as Box<dyn Write + Send>), Some(path)),
            Err(e) => {
                mirror.mirror(&subsystem, SINK_CATEGORY, Level::Error, &e.to_string());
                (None, None)
            }
        };
        Self::start(destination, path, subsystem, mirror, config.delimiter)
    }

    /// Build a sink over an arbitrary destination instead of a log file.
    ///
    /// Useful for capturing output in memory or writing to a stream the
    /// caller already owns. [`path`](Self::path) is `None`.
    #[must_use]
    pub fn from_writer<W>(
        subsystem: impl Into<String>,
        destination: W,
        delimiter: Delimiter,
        mirror: Arc<dyn Mirror>,
    ) -> Self
    where
        W: Write + Send + 'static,
    {
        Self::start(
            Some(Box::new(destination)),
            None,
            subsystem.into(),
            mirror,
            delimiter,
        )
    }

    fn start(
        destination: Option<Box<dyn Write + Send>>,
        path: Option<PathBuf>,
        subsystem: String,
        mirror: Arc<dyn Mirror>,
        delimiter: Delimiter,
    ) -> Self {
        let subsystem: Arc<str> = subsystem.into();
        let (sender, receiver) = mpsc::channel();
        let has_destination = destination.is_some();
        let writer = Writer::new(destination, Arc::clone(&subsystem), Arc::clone(&mirror), delimiter);
        let worker = match writer.spawn(receiver) {
            Ok(worker) => Some(worker),
            Err(e) => {
                mirror.mirror(
                    &subsystem,
                    SINK_CATEGORY,
                    Level::Error,
                    &format!("Failed to start log writer thread: {e}"),
                );
                None
            }
        };
        let degraded = !has_destination || worker.is_none();
        Self {
            handle: SinkHandle {
                sender,
                accepting: Arc::new(RwLock::new(true)),
                subsystem,
                mirror,
            },
            path: path.filter(|_| !degraded),
            degraded,
            worker,
        }
    }

    /// Enqueue one record for `category`.
    ///
    /// Returns immediately. The record is mirrored and appended by the writer
    /// thread in the order it was accepted here. Failures are reported on the
    /// mirror and otherwise swallowed.
    pub fn write(&self, category: &str, level: Level, message: &str, details: Details) {
        self.handle
            .submit(category.into(), level, message.to_string(), details);
    }

    /// Create a [`CategoryLogger`] bound to this sink.
    #[must_use]
    pub fn logger(&self, category: impl Into<String>) -> CategoryLogger {
        CategoryLogger::new(category, self.handle.clone())
    }

    /// Block until every record accepted before this call has been written
    /// and the file flushed.
    ///
    /// Returns right away if the writer thread is not running.
    pub fn flush(&self) {
        let (ack, done) = mpsc::channel();
        if self.handle.sender.send(Command::Flush(ack)).is_ok() {
            done.recv().ok();
        }
    }

    /// Write everything accepted so far and stop the writer thread.
    ///
    /// Loggers that outlive the sink keep working in mirror-only mode.
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(worker) = self.worker.take() {
            *self
                .handle
                .accepting
                .write()
                .unwrap_or_else(PoisonError::into_inner) = false;
            self.handle.sender.send(Command::Shutdown).ok();
            if worker.join().is_err() {
                self.handle.mirror.mirror(
                    &self.handle.subsystem,
                    SINK_CATEGORY,
                    Level::Fault,
                    "Log writer thread panicked",
                );
            }
        }
    }

    /// Path of the log file, or `None` in mirror-only mode.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// `true` when records only reach the mirror.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Subsystem tag written into every record.
    #[must_use]
    pub fn subsystem(&self) -> &str {
        self.handle.subsystem()
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogSink")
            .field("subsystem", &self.handle.subsystem)
            .field("path", &self.path)
            .field("degraded", &self.degraded)
            .field("running", &self.worker.is_some())
            .finish()
    }
}

impl Drop for LogSink {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Create the logs directory under `container` and open a fresh file for
/// append.
fn open_log_file(
    config: &LogConfig,
    container: Option<PathBuf>,
) -> Result<(File, PathBuf), SinkError> {
    let container = container
        .ok_or_else(|| SinkError::ContainerUnresolved(config.domain_identifier.clone()))?;

    let dir = logs_directory(&container);
    fs::create_dir_all(&dir).map_err(|source| SinkError::CreateDirectory {
        path: dir.clone(),
        source,
    })?;

    let name = log_file_name(
        &config.domain_identifier,
        chrono::Utc::now(),
        std::process::id(),
    );
    let path = dir.join(name);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| SinkError::OpenFile {
            path: path.clone(),
            source,
        })?;
    Ok((file, path))
}
