//! Commands: normalize the registry and render the registry table.
use anyhow::{Context as _, Result, bail};

use crate::cli::{GlobalOpts, OutputOpts, RegistryFormat, RegistryOpts};
use crate::config::validation::{ConfigValidator as _, RegistryValidator};
use crate::exec::Executor;
use crate::logging::Logger;
use crate::registry::{self, table};

/// Run the `registry` command.
///
/// # Errors
///
/// Returns an error if the registry cannot be read or the output cannot be
/// written.
pub fn run(global: &GlobalOpts, opts: &RegistryOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log);
    let source = setup.paths.registry();

    log.stage("Loading registry");
    let tools = registry::load(&source)
        .with_context(|| format!("failed to load registry from {}", source.display()))?;
    log.info(&format!("{} tools", tools.len()));
    log.report(&RegistryValidator::new(&tools).validate());

    let content = match opts.format {
        RegistryFormat::Json => super::to_pretty_json(&tools)?,
        RegistryFormat::Markdown => table::render_markdown(&tools),
    };
    super::write_output(opts.output.output.as_deref(), &content, log)
}

/// Run the `registry-table` command against the live `mise registry` output.
///
/// # Errors
///
/// Returns an error if the `mise` binary is not on PATH, `mise registry`
/// fails, or the output cannot be written.
pub fn run_table(
    global: &GlobalOpts,
    opts: &OutputOpts,
    executor: &dyn Executor,
    log: &Logger,
) -> Result<()> {
    if !executor.which(&global.mise) {
        bail!("{} not found on PATH (set --mise or MISE_BIN)", global.mise);
    }

    log.stage("Reading mise registry");
    let result = executor
        .run(&global.mise, &["registry"])
        .context("failed to list the mise registry")?;
    let tools = table::parse_registry_output(&result.stdout);
    log.info(&format!("{} registry rows", tools.len()));

    super::write_output(
        opts.output.as_deref(),
        &table::render_markdown(&tools),
        log,
    )
}
