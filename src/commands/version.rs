//! Command: print version information.
use std::io::Write as _;

use anyhow::{Context as _, Result};

/// The build version: `DOCGEN_VERSION` when set at build time, otherwise
/// the crate version.
pub const VERSION: &str = match option_env!("DOCGEN_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};

/// The build version; see [`VERSION`].
#[must_use]
pub const fn version() -> &'static str {
    VERSION
}

/// Print the docgen version to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run() -> Result<()> {
    writeln!(std::io::stdout().lock(), "docgen {}", version()).context("failed to write version")
}
