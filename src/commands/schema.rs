//! Command: merge the settings catalog into the JSON schema files.
use anyhow::{Context as _, Result};

use crate::cli::GlobalOpts;
use crate::config::toml_loader;
use crate::config::validation::{ConfigValidator as _, SettingsValidator};
use crate::logging::Logger;
use crate::settings::{self, schema};

/// Run the `schema` command.
///
/// Rewrites `$defs.settings.properties` in the main schema, mirrors the
/// shared definitions into the task schema when it exists, and regenerates
/// the early-init schema. Hidden settings stay in the schema.
///
/// # Errors
///
/// Returns an error if the settings or main schema cannot be loaded, a
/// required definition is missing, or a file cannot be written.
pub fn run(global: &GlobalOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log);
    let paths = &setup.paths;

    log.stage("Loading settings");
    let entries = settings::load(&paths.settings())
        .with_context(|| format!("failed to load settings from {}", paths.settings().display()))?;
    log.report(&SettingsValidator::new(&entries).validate());

    log.stage("Updating JSON schema");
    let mut main = toml_loader::load_json(&paths.schema())?;
    let properties = schema::properties(&entries);
    log.debug(&format!("{} settings properties", properties.len()));
    schema::merge_settings(&mut main, properties)?;
    super::write_file(&paths.schema(), &super::to_pretty_json(&main)?, log)?;

    let task_path = paths.task_schema();
    if task_path.is_file() {
        let mut task = toml_loader::load_json(&task_path)?;
        schema::sync_task_defs(&main, &mut task)?;
        super::write_file(&task_path, &super::to_pretty_json(&task)?, log)?;
    } else {
        log.debug(&format!("no task schema at {}", task_path.display()));
    }

    let rc = schema::rc_schema(&entries);
    super::write_file(&paths.rc_schema(), &super::to_pretty_json(&rc)?, log)
}
