//! Command: write many records from parallel producers.
use anyhow::Result;
use rayon::prelude::*;

use crate::cli::{GlobalOpts, StressOpts};
use crate::details;
use crate::logging::{CategoryLogger, Log};

/// Category of every record written by the stress command.
pub const STRESS_CATEGORY: &str = "Stress";

/// Run the stress command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, the thread pool
/// cannot be built, or stdout cannot be written.
pub fn run(global: &GlobalOpts, opts: &StressOpts) -> Result<()> {
    let setup = super::CommandSetup::init(global)?;
    let log = setup.sink.logger(STRESS_CATEGORY);

    let started = std::time::Instant::now();
    produce(&log, opts)?;
    setup.sink.flush();
    let elapsed = started.elapsed();

    let target = setup
        .sink
        .path()
        .map_or_else(|| "the mirror only".to_string(), |p| p.display().to_string());
    setup.sink.shutdown();

    super::say(&format!(
        "wrote {} records from {} threads to {target} in {elapsed:.2?}",
        opts.records, opts.threads
    ))
}

/// Emit `opts.records` records through `log` from a pool of `opts.threads`
/// threads.
///
/// # Errors
///
/// Returns an error if the thread pool cannot be built.
pub fn produce(log: &CategoryLogger, opts: &StressOpts) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(opts.threads.max(1))
        .thread_name(|i| format!("domainlog-stress-{i}"))
        .build()?;

    pool.install(|| {
        (0..opts.records).into_par_iter().for_each(|index| {
            let worker = rayon::current_thread_index().and_then(|i| u32::try_from(i).ok());
            log.debug_with(
                "stress record",
                details! { "index" => index, "worker" => worker },
            );
        });
    });
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use crate::logging::{Delimiter, DetailValue, LogRecord, LogSink, TracingMirror};
    use std::collections::BTreeSet;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Shared(Arc<Mutex<Vec<u8>>>);

    impl Write for Shared {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn every_record_is_written_once() {
        let buffer = Shared::default();
        let sink = LogSink::from_writer(
            "com.example.stress",
            buffer.clone(),
            Delimiter::Newline,
            Arc::new(TracingMirror),
        );
        let log = sink.logger(STRESS_CATEGORY);

        produce(
            &log,
            &StressOpts {
                threads: 4,
                records: 200,
            },
        )
        .unwrap();
        sink.shutdown();

        let bytes = buffer.0.lock().unwrap().clone();
        let mut seen = BTreeSet::new();
        for line in bytes.split(|b| *b == b'\n').filter(|l| !l.is_empty()) {
            let record = LogRecord::from_json(line).unwrap();
            assert_eq!(record.category, STRESS_CATEGORY);
            let Some(DetailValue::Integer(index)) = record.details.get("index") else {
                panic!("missing index in {record:?}");
            };
            assert!(seen.insert(*index), "duplicate index {index}");
        }
        assert_eq!(seen.len(), 200);
        assert_eq!(seen.iter().copied().max(), Some(199));
    }

    #[test]
    fn zero_threads_still_runs() {
        let buffer = Shared::default();
        let sink = LogSink::from_writer(
            "com.example.stress",
            buffer.clone(),
            Delimiter::Newline,
            Arc::new(TracingMirror),
        );
        produce(
            &sink.logger(STRESS_CATEGORY),
            &StressOpts {
                threads: 0,
                records: 3,
            },
        )
        .unwrap();
        sink.flush();
        let lines = buffer.0.lock().unwrap().iter().filter(|b| **b == b'\n').count();
        assert_eq!(lines, 3);
    }
}
