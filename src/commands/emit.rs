//! Command: append a single record.
use anyhow::Result;

use crate::cli::{EmitOpts, GlobalOpts};
use crate::logging::{Details, Log, LogSink};

/// Run the emit command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or stdout cannot
/// be written.
pub fn run(global: &GlobalOpts, opts: &EmitOpts) -> Result<()> {
    let setup = super::CommandSetup::init(global)?;
    emit(&setup.sink, opts);
    let path = setup.sink.path().map(|p| p.display().to_string());
    setup.sink.shutdown();

    match path {
        Some(path) => super::say(&path),
        None => {
            tracing::warn!("no log file available, record was mirrored only");
            Ok(())
        }
    }
}

/// Emit the record described by `opts` through `sink`.
pub fn emit(sink: &LogSink, opts: &EmitOpts) {
    let details: Details = opts.details.iter().cloned().collect();
    sink.logger(opts.category.as_str())
        .emit(opts.level, &opts.message, details);
}
