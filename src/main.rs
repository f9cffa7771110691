use std::process::ExitCode;

use clap::Parser;

use docgen::{cli, commands, exec, logging};

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new();
    let executor = exec::SystemExecutor;

    let result = match args.command {
        cli::Command::Registry(opts) => commands::registry::run(&args.global, &opts, &log),
        cli::Command::RegistryTable(opts) => {
            commands::registry::run_table(&args.global, &opts, &executor, &log)
        }
        cli::Command::Settings(opts) => commands::settings::run(&args.global, &opts, &log),
        cli::Command::Schema => commands::schema::run(&args.global, &log),
        cli::Command::Suggest(opts) => {
            commands::suggest::run(&args.global, &opts, &executor, &log)
        }
        cli::Command::Completions(opts) => commands::completions::run(&opts),
        cli::Command::Version => commands::version::run(),
    };

    let warnings = log.warning_count();
    if warnings > 0 {
        log.info(&format!("finished with {warnings} warning(s)"));
    }
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
