//! Utility functions for log file naming and time formatting.
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

/// Extension of every log file.
pub const LOG_FILE_EXTENSION: &str = "log.jsonl";

/// Return `<container>/Library/Logs`.
pub(super) fn logs_directory(container: &Path) -> PathBuf {
    container.join("Library").join("Logs")
}

/// Replace characters that are unsafe in a file name component with `_`.
///
/// Keeps ASCII alphanumerics and `-`, `.`, `_`; an empty result becomes `_`
/// so the file name never starts with the timestamp separator.
pub(super) fn sanitize_component(raw: &str) -> String {
    let clean: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if clean.is_empty() { "_".to_string() } else { clean }
}

/// Build the file name for a sink created at `created` by process `pid`.
///
/// `{identifier}_{YYYY-MM-DDTHH-MM-SS.mmm}_{pid}.log.jsonl`; the creation
/// time and process id keep restarts and concurrent processes apart.
pub(super) fn log_file_name(identifier: &str, created: DateTime<Utc>, pid: u32) -> String {
    format!(
        "{}_{}_{pid}.{LOG_FILE_EXTENSION}",
        sanitize_component(identifier),
        created.format("%Y-%m-%dT%H-%M-%S%.3f"),
    )
}

/// Format the current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ` for the `date` key.
pub(super) fn format_record_date() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    #[test]
    fn logs_directory_appends_library_logs() {
        assert_eq!(
            logs_directory(Path::new("/srv/group")),
            PathBuf::from("/srv/group/Library/Logs")
        );
    }

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize_component("a/b\\c d:e"), "a_b_c_d_e");
        assert_eq!(sanitize_component("ok-1.2_x"), "ok-1.2_x");
        assert_eq!(sanitize_component(""), "_");
    }

    #[test]
    fn file_name_embeds_identifier_time_and_pid() {
        let created = Utc.with_ymd_and_hms(2026, 10, 19, 8, 5, 9).unwrap();
        assert_eq!(
            log_file_name("Documents", created, 4242),
            "Documents_2026-10-19T08-05-09.000_4242.log.jsonl"
        );
    }

    #[test]
    fn record_date_has_millisecond_precision() {
        let s = format_record_date();
        assert!(s.ends_with('Z'), "should end with Z");
        let dot = s.find('.').expect("should have decimal point");
        assert_eq!(s[dot + 1..s.len() - 1].len(), 3, "three fractional digits");
    }
}
