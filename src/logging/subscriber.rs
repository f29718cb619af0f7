//! Tracing subscriber setup: console formatter for mirrored records.
use std::fmt;

use tracing::field::{Field, Visit};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

/// Collects the fields [`TracingMirror`](super::mirror::TracingMirror)
/// attaches to each event.
#[derive(Debug, Default)]
struct MirrorFields {
    message: String,
    subsystem: Option<String>,
    category: Option<String>,
    level: Option<String>,
}

impl Visit for MirrorFields {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "message" => self.message = value.to_string(),
            "subsystem" => self.subsystem = Some(value.to_string()),
            "category" => self.category = Some(value.to_string()),
            "level" => self.level = Some(value.to_string()),
            _ => {}
        }
    }
}

impl MirrorFields {
    /// Render one console line without the trailing newline.
    fn render(&self, fallback_level: tracing::Level, target: &str) -> String {
        let level = self
            .level
            .as_deref()
            .map_or_else(|| fallback_level.as_str().to_ascii_uppercase(), str::to_ascii_uppercase);
        let color = match level.as_str() {
            "FAULT" | "ERROR" => "\x1b[31m",
            "DEFAULT" | "WARN" => "\x1b[33m",
            "DEBUG" | "TRACE" => "\x1b[2m",
            _ => "\x1b[32m",
        };
        let origin = match (&self.subsystem, &self.category) {
            (Some(subsystem), Some(category)) => format!("{subsystem}/{category}"),
            (None, Some(category)) => category.clone(),
            _ => target.to_string(),
        };
        format!("{color}{level:<7}\x1b[0m [{origin}] {}", self.message)
    }
}

/// A [`FormatEvent`] that prints `LEVEL [subsystem/category] message`.
struct MirrorFormatter;

impl<S, N> FormatEvent<S, N> for MirrorFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let mut fields = MirrorFields::default();
        event.record(&mut fields);
        writeln!(writer, "{}", fields.render(*metadata.level(), metadata.target()))
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Mirrored records and the binary's own events go to stderr. `debug` is
/// shown only when `verbose` is set; a `RUST_LOG` filter, when present,
/// takes precedence over both. Must be called once at program startup,
/// before the first sink is created.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::{
        EnvFilter, Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let console_layer = fmt::layer()
        .event_format(MirrorFormatter)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}
