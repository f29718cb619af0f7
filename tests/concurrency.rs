#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing,
    clippy::unreachable
)]
//! Integration tests for ordering and concurrent use of one sink.
//!
//! Many producers share a sink through cloned loggers. These tests check
//! that no record is lost or interleaved, that each producer's records keep
//! their order in the file, and that happens-before across threads is
//! preserved.

mod common;

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use common::{IntegrationTestContext, read_records};
use domainlog::details;
use domainlog::config::LogConfig;
use domainlog::logging::{Delimiter, DetailValue, Log, LogSink};

const THREADS: usize = 8;
const PER_THREAD: i64 = 250;

/// Every record from every thread lands once, and each thread's records
/// appear in the order that thread emitted them.
#[test]
fn concurrent_producers_keep_per_producer_order() {
    let ctx = IntegrationTestContext::new();
    let sink = ctx.sink("Concurrent");
    let path = sink.path().unwrap().to_path_buf();

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let log = sink.logger(format!("Worker{t}"));
            thread::spawn(move || {
                for seq in 0..PER_THREAD {
                    log.info_with("tick", details! { "seq" => seq });
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    sink.shutdown();

    let records = read_records(&path);
    assert_eq!(
        records.len(),
        THREADS * usize::try_from(PER_THREAD).unwrap()
    );

    let mut last_seen: HashMap<String, i64> = HashMap::new();
    for record in &records {
        let DetailValue::Integer(seq) = record.details["seq"] else {
            unreachable!("seq is always an integer");
        };
        let previous = last_seen.insert(record.category.clone(), seq);
        assert_eq!(previous.map_or(0, |p| p + 1), seq, "{}", record.category);
    }
    assert_eq!(last_seen.len(), THREADS);
    assert!(last_seen.values().all(|seq| *seq == PER_THREAD - 1));
}

/// A record emitted after another thread's emit has been observed lands
/// after it in the file, even through different loggers.
#[test]
fn happens_before_is_preserved_across_threads() {
    let ctx = IntegrationTestContext::new();
    let sink = ctx.sink("Ordering");
    let path = sink.path().unwrap().to_path_buf();

    let first = sink.logger("First");
    let second = sink.logger("Second");
    let (tx, rx) = mpsc::channel();

    let producer = thread::spawn(move || {
        for i in 0..50 {
            first.info_with("ping", details! { "i" => i });
            tx.send(i).unwrap();
        }
    });
    for i in rx.iter() {
        second.info_with("pong", details! { "i" => i });
    }
    producer.join().unwrap();
    drop(second);
    sink.shutdown();

    let records = read_records(&path);
    assert_eq!(records.len(), 100);
    let position = |message: &str, i: i64| {
        records
            .iter()
            .position(|r| r.message == message && r.details["i"] == DetailValue::Integer(i))
            .unwrap()
    };
    for i in 0..50 {
        assert!(position("ping", i) < position("pong", i), "pair {i}");
    }
}

/// Each line in a newline-framed file is one complete object even under
/// contention.
#[test]
fn lines_are_never_interleaved() {
    let ctx = IntegrationTestContext::new();
    let config = LogConfig {
        delimiter: Delimiter::Newline,
        ..ctx.config("Interleave")
    };
    let sink = LogSink::with_mirror(&config, ctx.mirror.clone());
    let path = sink.path().unwrap().to_path_buf();
    let long = "x".repeat(4096);

    thread::scope(|scope| {
        for t in 0..4 {
            let log = sink.logger("Big");
            let long = long.as_str();
            scope.spawn(move || {
                for _ in 0..50 {
                    log.notice_with(long, details! { "thread" => t });
                }
            });
        }
    });
    sink.shutdown();

    let text = std::fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 200);
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["message"].as_str().unwrap().len(), 4096);
    }
}

/// Unframed records written under contention still split into whole objects.
#[test]
fn unframed_records_are_never_interleaved() {
    let ctx = IntegrationTestContext::new();
    let sink = ctx.sink("Interleave");
    let path = sink.path().unwrap().to_path_buf();
    let long = "y".repeat(4096);

    thread::scope(|scope| {
        for t in 0..4 {
            let log = sink.logger("Big");
            let long = long.as_str();
            scope.spawn(move || {
                for _ in 0..50 {
                    log.notice_with(long, details! { "thread" => t });
                }
            });
        }
    });
    sink.shutdown();

    let records = read_records(&path);
    assert_eq!(records.len(), 200);
    assert!(records.iter().all(|r| r.message.len() == 4096));
}
