//! Stamps the version and target triple reported by `domainlog version`.
use std::env;
use std::path::Path;
use std::process::Command;

const VERSION_VAR: &str = "DOMAINLOG_VERSION";
const TARGET_VAR: &str = "DOMAINLOG_BUILD_TARGET";

fn main() {
    println!("cargo:rerun-if-env-changed={VERSION_VAR}");
    if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        let git = Path::new(&manifest_dir).join(".git");
        if git.exists() {
            println!("cargo:rerun-if-changed={}", git.join("HEAD").display());
            println!("cargo:rerun-if-changed={}", git.join("refs").display());
        }
    }

    // An explicit release version wins over whatever git reports.
    let version = env::var(VERSION_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(git_describe);
    if let Some(version) = version {
        println!("cargo:rustc-env={VERSION_VAR}={version}");
    }

    if let Ok(target) = env::var("TARGET") {
        println!("cargo:rustc-env={TARGET_VAR}={target}");
    }
}

/// `git describe` for the working tree, or `None` outside a checkout.
fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let described = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!described.is_empty()).then_some(described)
}
