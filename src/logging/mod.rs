//! Append-only JSON-lines logging core.
//!
//! One [`LogSink`] per process owns the log file and a dedicated writer
//! thread. Components get a [`CategoryLogger`] from the sink and emit through
//! the [`Log`] trait; emitting only enqueues, so callers never wait on disk.
//! Every record is mirrored to a [`Mirror`] (by default `tracing`) before it
//! is appended, so nothing is lost from view when the file is unavailable.
//!
//! ```text
//! caller ─► CategoryLogger::emit ─► channel ─► writer thread ─┬─► Mirror
//!                                                              └─► <container>/Library/Logs/*.log.jsonl
//! ```

mod detail;
mod logger;
mod mirror;
mod record;
mod sink;
mod subscriber;
mod types;
mod utils;
mod writer;

pub use detail::{DetailKey, DetailValue, Details, UNSUPPORTED_DETAIL};
pub use logger::CategoryLogger;
pub use mirror::{MIRROR_TARGET, Mirror, TracingMirror};
pub use record::{Delimiter, LogRecord};
pub use sink::LogSink;
pub use subscriber::init_subscriber;
pub use types::{Level, Log};
pub use utils::LOG_FILE_EXTENSION;
pub use writer::SINK_CATEGORY;
