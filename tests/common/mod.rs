// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed container and a fluent builder so
// each integration test can open a sink against an isolated location without
// repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use domainlog::config::LogConfig;
use domainlog::logging::{Level, LogRecord, LogSink, Mirror};

/// Subsystem used by every sink opened through these helpers.
pub const SUBSYSTEM: &str = "com.example.provider";

/// One call received by a [`CapturingMirror`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mirrored {
    pub subsystem: String,
    pub category: String,
    pub level: Level,
    pub text: String,
}

/// A [`Mirror`] that records every call for later inspection.
#[derive(Debug, Default)]
pub struct CapturingMirror {
    calls: Mutex<Vec<Mirrored>>,
}

impl CapturingMirror {
    /// Everything mirrored so far, in call order.
    pub fn calls(&self) -> Vec<Mirrored> {
        self.calls.lock().expect("mirror lock").clone()
    }

    /// Calls for one category.
    pub fn calls_for(&self, category: &str) -> Vec<Mirrored> {
        self.calls()
            .into_iter()
            .filter(|c| c.category == category)
            .collect()
    }
}

impl Mirror for CapturingMirror {
    fn mirror(&self, subsystem: &str, category: &str, level: Level, text: &str) {
        self.calls.lock().expect("mirror lock").push(Mirrored {
            subsystem: subsystem.to_string(),
            category: category.to_string(),
            level,
            text: text.to_string(),
        });
    }
}

/// An isolated container backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary directory acting as the shared container.
    pub root: tempfile::TempDir,
    /// Mirror every sink opened from this context reports to.
    pub mirror: Arc<CapturingMirror>,
}

impl IntegrationTestContext {
    /// Create a new context with an empty container.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
            mirror: Arc::new(CapturingMirror::default()),
        }
    }

    /// Path to the container.
    pub fn container(&self) -> &Path {
        self.root.path()
    }

    /// Path to `Library/Logs` inside the container.
    pub fn logs_dir(&self) -> PathBuf {
        self.root.path().join("Library").join("Logs")
    }

    /// Configuration pointing at this container.
    pub fn config(&self, identifier: &str) -> LogConfig {
        LogConfig {
            domain_identifier: identifier.to_string(),
            subsystem: Some(SUBSYSTEM.to_string()),
            container: Some(self.root.path().to_path_buf()),
            ..LogConfig::default()
        }
    }

    /// Open a sink for `identifier` in this container.
    pub fn sink(&self, identifier: &str) -> LogSink {
        LogSink::with_mirror(&self.config(identifier), self.mirror.clone())
    }

    /// Every file currently in the logs directory, sorted by name.
    pub fn log_files(&self) -> Vec<PathBuf> {
        let Ok(entries) = std::fs::read_dir(self.logs_dir()) else {
            return Vec::new();
        };
        let mut files: Vec<PathBuf> = entries
            .map(|e| e.expect("read dir entry").path())
            .collect();
        files.sort();
        files
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context with an empty container.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write `content` to `<container>/<filename>`.
    pub fn with_file(self, filename: &str, content: &str) -> Self {
        std::fs::write(self.ctx.root.path().join(filename), content).expect("write file");
        self
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}

/// Parse a log file into records, with or without newlines between them.
pub fn read_records(path: &Path) -> Vec<LogRecord> {
    let bytes = std::fs::read(path).expect("read log file");
    serde_json::Deserializer::from_slice(&bytes)
        .into_iter::<LogRecord>()
        .map(|record| record.expect("parse record"))
        .collect()
}
