//! Command: print completion suggestions as JSON.
use anyhow::Result;

use crate::cli::{GlobalOpts, SuggestOpts};
use crate::exec::Executor;
use crate::logging::Logger;
use crate::suggest;

/// Run the `suggest` command.
///
/// Generator failures are reported inline as error suggestions, so this
/// only fails when stdout cannot be written.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn run(
    global: &GlobalOpts,
    opts: &SuggestOpts,
    executor: &dyn Executor,
    log: &Logger,
) -> Result<()> {
    log.debug(&format!(
        "generators: {}",
        opts.generators
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    ));
    let suggestions = suggest::gather(executor, &global.mise, &opts.generators);
    log.debug(&format!("{} suggestions", suggestions.len()));
    super::write_output(None, &super::to_pretty_json(&suggestions)?, log)
}
