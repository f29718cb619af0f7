//! Dedicated writer thread: the only code that touches the log file.
//!
//! Producers enqueue [`Command`]s on an unbounded channel and return. The
//! thread drains the channel in order, so the channel order is the order
//! records appear in the file, and each record is appended with a single
//! `write_all` call before the next one is looked at.
use std::io::{self, Write};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use super::detail::Details;
use super::mirror::Mirror;
use super::record::{Delimiter, LogRecord};
use super::types::Level;
use super::utils::format_record_date;
use crate::error::SinkError;

/// Category under which the sink reports its own problems.
pub const SINK_CATEGORY: &str = "LogSink";

/// A record as handed over by a producer, before it is timestamped.
#[derive(Debug)]
pub(super) struct Submission {
    pub(super) category: Arc<str>,
    pub(super) level: Level,
    pub(super) message: String,
    pub(super) details: Details,
}

/// Messages understood by the writer thread.
#[derive(Debug)]
pub(super) enum Command {
    /// Mirror and append one record.
    Write(Submission),
    /// Flush the destination, then acknowledge.
    Flush(Sender<()>),
    /// Stop after everything queued before this marker.
    Shutdown,
}

/// State owned by the writer thread.
pub(super) struct Writer {
    destination: Option<Box<dyn Write + Send>>,
    subsystem: Arc<str>,
    mirror: Arc<dyn Mirror>,
    delimiter: Delimiter,
}

impl Writer {
    pub(super) fn new(
        destination: Option<Box<dyn Write + Send>>,
        subsystem: Arc<str>,
        mirror: Arc<dyn Mirror>,
        delimiter: Delimiter,
    ) -> Self {
        Self {
            destination,
            subsystem,
            mirror,
            delimiter,
        }
    }

    /// Start the thread.
    pub(super) fn spawn(self, commands: Receiver<Command>) -> io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("domainlog-writer".to_string())
            .spawn(move || self.run(commands))
    }

    /// Process commands until shutdown or until every sender is gone.
    ///
    /// Whatever is still queued behind the shutdown marker is handled too,
    /// and the channel is closed before the final flush so that later sends
    /// fail back to the producer.
    fn run(mut self, commands: Receiver<Command>) {
        for command in &commands {
            if !self.handle(command) {
                break;
            }
        }
        for command in commands.try_iter() {
            self.handle(command);
        }
        drop(commands);
        self.flush();
    }

    /// Returns `false` on the shutdown marker.
    fn handle(&mut self, command: Command) -> bool {
        match command {
            Command::Write(submission) => self.write(submission),
            Command::Flush(ack) => {
                self.flush();
                ack.send(()).ok();
            }
            Command::Shutdown => return false,
        }
        true
    }

    /// Mirror, then append to the file if there is one.
    ///
    /// A record that cannot be encoded or appended is dropped after a
    /// diagnostic naming its message goes to the mirror.
    fn write(&mut self, submission: Submission) {
        let Submission {
            category,
            level,
            message,
            details,
        } = submission;
        self.mirror.mirror(&self.subsystem, &category, level, &message);

        let Some(destination) = self.destination.as_mut() else {
            return;
        };

        let record = LogRecord {
            category: category.to_string(),
            date: format_record_date(),
            details,
            level,
            message,
            subsystem: self.subsystem.to_string(),
        };

        if let Err(e) = append(destination.as_mut(), &record, self.delimiter) {
            self.mirror
                .mirror(&self.subsystem, SINK_CATEGORY, Level::Error, &e.to_string());
        }
    }

    fn flush(&mut self) {
        if let Some(destination) = self.destination.as_mut()
            && let Err(e) = destination.flush()
        {
            self.mirror.mirror(
                &self.subsystem,
                SINK_CATEGORY,
                Level::Error,
                &format!("Failed to flush log file: {e}"),
            );
        }
    }
}

/// Serialize `record` and append it plus the delimiter in one write.
fn append(
    destination: &mut dyn Write,
    record: &LogRecord,
    delimiter: Delimiter,
) -> Result<(), SinkError> {
    let mut bytes = record.to_json().map_err(|source| SinkError::Encode {
        message: record.message.clone(),
        source,
    })?;
    bytes.extend_from_slice(delimiter.as_bytes());
    destination
        .write_all(&bytes)
        .map_err(|source| SinkError::Write {
            message: record.message.clone(),
            source,
        })
}
