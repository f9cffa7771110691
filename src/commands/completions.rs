//! Command: generate shell completions for this CLI.
use std::io::Write;

use anyhow::{Context as _, Result};
use clap::CommandFactory as _;

use crate::cli::{Cli, CompletionsOpts};

/// Write the completion script for the requested shell to `out`.
///
/// # Errors
///
/// Returns an error if the script cannot be flushed.
pub fn write(opts: &CompletionsOpts, out: &mut dyn Write) -> Result<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(opts.shell, &mut cmd, name, out);
    out.flush().context("failed to write completions")
}

/// Run the `completions` command, writing to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn run(opts: &CompletionsOpts) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write(opts, &mut stdout)?;
    stdout.flush().context("failed to write completions")
}
