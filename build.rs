//! Embeds the build version as `DOCGEN_VERSION`.
use std::env;
use std::process::Command;

const VERSION_VAR: &str = "DOCGEN_VERSION";

fn main() {
    println!("cargo:rerun-if-env-changed={VERSION_VAR}");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");

    let version = env::var(VERSION_VAR)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(git_describe);
    if let Some(version) = version {
        // Release tags are `vYYYY.M.P`; the binary reports the bare version.
        let version = version.trim();
        let version = version.strip_prefix('v').unwrap_or(version);
        println!("cargo:rustc-env={VERSION_VAR}={version}");
    }
}

/// `git describe` of the checkout, when built from one.
fn git_describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).into_owned())
}
