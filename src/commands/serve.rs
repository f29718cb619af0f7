//! Command: run as a background service until interrupted.
use anyhow::{Context as _, Result};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crate::cli::{GlobalOpts, ServeOpts};
use crate::details;
use crate::logging::{CategoryLogger, DetailKey, Log};

/// Category of the service lifecycle records.
pub const SERVICE_CATEGORY: &str = "Service";

/// Run the serve command.
///
/// Writes a heartbeat every `--interval` seconds until Ctrl-C, then drains
/// the sink and exits.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the Ctrl-C
/// handler cannot be installed.
pub fn run(global: &GlobalOpts, opts: &ServeOpts) -> Result<()> {
    let setup = super::CommandSetup::init(global)?;
    let log = setup.sink.logger(SERVICE_CATEGORY);

    let (stop_tx, stop_rx) = mpsc::channel();
    ctrlc::set_handler(move || {
        stop_tx.send(()).ok();
    })
    .context("installing Ctrl-C handler")?;

    tracing::info!(path = ?setup.sink.path(), "serving, press Ctrl-C to stop");
    let beats = serve_until(
        &log,
        &setup.config.domain_identifier,
        Duration::from_secs(opts.interval.max(1)),
        &stop_rx,
    );
    setup.sink.shutdown();
    tracing::info!(beats, "stopped");
    Ok(())
}

/// Emit a heartbeat through `log` every `interval` until `stop` receives a
/// value or is disconnected. Returns the number of heartbeats written.
pub fn serve_until(
    log: &CategoryLogger,
    domain_identifier: &str,
    interval: Duration,
    stop: &Receiver<()>,
) -> u64 {
    log.notice_with(
        "Service started",
        details! { DetailKey::Domain => domain_identifier },
    );

    let mut beats: u64 = 0;
    loop {
        match stop.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {
                beats += 1;
                log.debug_with(
                    "heartbeat",
                    details! { "beat" => i64::try_from(beats).unwrap_or(i64::MAX) },
                );
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    log.notice_with(
        "Service stopping",
        details! {
            DetailKey::Domain => domain_identifier,
            "beats" => i64::try_from(beats).unwrap_or(i64::MAX),
        },
    );
    beats
}
