#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for opening sinks from a TOML configuration file.

mod common;

use common::{TestContextBuilder, read_records};
use domainlog::cli::GlobalOpts;
use domainlog::commands::resolve_config;
use domainlog::config::LogConfig;
use domainlog::logging::{Delimiter, Log, LogSink};

/// A config file with a container points the sink at that container.
#[test]
fn sink_opens_from_config_file() {
    let ctx = TestContextBuilder::new().build();
    let config_path = ctx.container().join("domainlog.toml");
    std::fs::write(
        &config_path,
        format!(
            "domain_identifier = \"Photos\"\nsubsystem = \"com.example.photos\"\ncontainer = {:?}\n",
            ctx.container().display().to_string()
        ),
    )
    .unwrap();

    let config = LogConfig::load(&config_path).unwrap();
    let sink = LogSink::with_mirror(&config, ctx.mirror.clone());
    sink.logger("Startup").info("loaded");
    let path = sink.path().unwrap().to_path_buf();
    sink.shutdown();

    assert!(
        path.file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("Photos_")
    );
    let records = read_records(&path);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].subsystem, "com.example.photos");
    assert_eq!(records[0].category, "Startup");
}

/// Command-line overrides win over the file.
#[test]
fn command_line_overrides_file() {
    let ctx = TestContextBuilder::new()
        .with_file(
            "domainlog.toml",
            "domain_identifier = \"FromFile\"\ncontainer = \"/nonexistent/group\"\ndelimiter = \"newline\"\n",
        )
        .build();

    let global = GlobalOpts {
        config: Some(ctx.container().join("domainlog.toml")),
        identifier: Some("FromFlag".to_string()),
        container: Some(ctx.container().to_path_buf()),
    };
    let config = resolve_config(&global).unwrap();
    assert_eq!(config.domain_identifier, "FromFlag");
    assert_eq!(config.delimiter, Delimiter::Newline);

    let sink = LogSink::with_mirror(&config, ctx.mirror.clone());
    assert!(!sink.is_degraded());
    assert_eq!(sink.path().unwrap().parent().unwrap(), ctx.logs_dir());
}

/// A missing config file is not an error.
#[test]
fn missing_config_file_gives_defaults() {
    let ctx = TestContextBuilder::new().build();
    let config = LogConfig::load(&ctx.container().join("absent.toml")).unwrap();
    assert_eq!(config, LogConfig::default());
}
