//! Command: print version information.
use anyhow::Result;

/// Version string stamped by the build script, or the crate version.
#[must_use]
pub fn version() -> &'static str {
    option_env!("DOMAINLOG_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
}

/// Target triple the binary was built for.
#[must_use]
pub fn build_target() -> &'static str {
    option_env!("DOMAINLOG_BUILD_TARGET").unwrap_or("unknown")
}

/// One-line version banner, e.g. `domainlog 0.1.0 (x86_64-unknown-linux-gnu)`.
#[must_use]
pub fn banner() -> String {
    format!("domainlog {} ({})", version(), build_target())
}

/// Print the domainlog version to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run() -> Result<()> {
    super::say(&banner())
}
