//! Append-only JSON-lines log sink for processes that manage a domain.
//!
//! Every record is mirrored to the platform log (through [`tracing`]) and
//! appended as one JSON object to a per-process file under
//! `<container>/Library/Logs`. Producers never wait on disk: a dedicated
//! writer thread owns the file and records are written in the order the sink
//! accepted them.
//!
//! The public API is organised into these layers:
//!
//! - **[`logging`]**: the sink, category loggers, records and detail values
//! - **[`config`]**: TOML configuration and container resolution
//! - **[`notify`]**: fire-and-forget change signalling that logs its failures
//! - **[`commands`]**: the `domainlog` subcommands (`emit`, `stress`, `serve`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
