//! Resolution of the shared container that holds `Library/Logs`.
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable naming the container directory explicitly.
pub const CONTAINER_ENV: &str = "DOMAINLOG_CONTAINER";

/// Directory name used under the per-user data directory.
const APP_DIR: &str = "domainlog";

/// Pick the container directory.
///
/// Order: `explicit`, then `$DOMAINLOG_CONTAINER`, then
/// `$XDG_DATA_HOME/domainlog`, then `$HOME/.local/share/domainlog`
/// (`%USERPROFILE%` on Windows). Empty variables are ignored. `None` means no
/// location could be resolved and the sink will run mirror-only.
///
/// `env` looks up environment variables; pass `|k| std::env::var_os(k)` in
/// production.
pub fn resolve<F>(explicit: Option<&PathBuf>, env: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<OsString>,
{
    let non_empty = |key: &str| env(key).filter(|v| !v.is_empty()).map(PathBuf::from);

    if let Some(path) = explicit {
        return Some(path.clone());
    }
    if let Some(path) = non_empty(CONTAINER_ENV) {
        return Some(path);
    }
    if let Some(data) = non_empty("XDG_DATA_HOME") {
        return Some(data.join(APP_DIR));
    }
    non_empty("HOME")
        .or_else(|| non_empty("USERPROFILE"))
        .map(|home| home.join(".local").join("share").join(APP_DIR))
}
