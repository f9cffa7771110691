//! Command: emit settings documentation data.
use anyhow::{Context as _, Result};

use crate::cli::{GlobalOpts, OutputOpts};
use crate::config::validation::{ConfigValidator as _, SettingsValidator};
use crate::logging::Logger;
use crate::settings;

/// Run the `settings` command.
///
/// Hidden settings are left out of the documentation data.
///
/// # Errors
///
/// Returns an error if the settings source cannot be loaded, contains an
/// authoring error, or the output cannot be written.
pub fn run(global: &GlobalOpts, opts: &OutputOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log);
    let source = setup.paths.settings();

    log.stage("Loading settings");
    let entries = settings::load(&source)
        .with_context(|| format!("failed to load settings from {}", source.display()))?;
    log.report(&SettingsValidator::new(&entries).validate());

    let entries = settings::visible(entries);
    let leaves: usize = entries.iter().map(|e| e.elements().len()).sum();
    log.info(&format!("{} entries, {leaves} settings", entries.len()));

    super::write_output(
        opts.output.as_deref(),
        &super::to_pretty_json(&entries)?,
        log,
    )
}
