use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::suggest::Generator;

/// Top-level CLI entry point for the documentation data generator.
#[derive(Parser, Debug)]
#[command(
    name = "docgen",
    about = "Registry and settings normalization for the mise documentation build",
    version = crate::commands::version::VERSION
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override the repository root (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// The mise binary used by shell-out commands
    #[arg(long, global = true, env = "MISE_BIN", default_value = "mise")]
    pub mise: String,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Normalize the tool registry
    Registry(RegistryOpts),
    /// Render the registry table from `mise registry` output
    RegistryTable(OutputOpts),
    /// Emit settings documentation data
    Settings(OutputOpts),
    /// Merge settings into the JSON schema files
    Schema,
    /// Print completion suggestions from one or more generators
    Suggest(SuggestOpts),
    /// Generate shell completions for this CLI
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

/// Output format for the `registry` subcommand.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegistryFormat {
    /// Ordered list of tool records
    #[default]
    Json,
    /// `| Tool | Backends |` table
    Markdown,
}

/// Options for the `registry` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct RegistryOpts {
    /// Output format
    #[arg(long, value_enum, default_value_t)]
    pub format: RegistryFormat,

    #[command(flatten)]
    pub output: OutputOpts,
}

/// Where generated data is written.
#[derive(Parser, Debug, Clone, Default)]
pub struct OutputOpts {
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Options for the `suggest` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct SuggestOpts {
    /// Generators to run, in output order
    #[arg(value_enum, required = true)]
    pub generators: Vec<Generator>,
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn version_flag_reports_embedded_version() {
        assert_eq!(
            Cli::command().render_version().trim(),
            format!("docgen {}", crate::commands::version::version())
        );
    }

    #[test]
    fn parse_registry_defaults_to_json() {
        let cli = Cli::parse_from(["docgen", "registry"]);
        assert!(
            matches!(&cli.command, Command::Registry(_)),
            "Expected Registry command"
        );
        if let Command::Registry(opts) = cli.command {
            assert_eq!(opts.format, RegistryFormat::Json);
            assert_eq!(opts.output.output, None);
        }
    }

    #[test]
    fn parse_registry_markdown_to_file() {
        let cli = Cli::parse_from(["docgen", "registry", "--format", "markdown", "-o", "out.md"]);
        if let Command::Registry(opts) = cli.command {
            assert_eq!(opts.format, RegistryFormat::Markdown);
            assert_eq!(opts.output.output, Some(PathBuf::from("out.md")));
        } else {
            panic!("Expected Registry command");
        }
    }

    #[test]
    fn parse_root_override() {
        let cli = Cli::parse_from(["docgen", "--root", "/tmp/mise", "schema"]);
        assert_eq!(cli.global.root, Some(PathBuf::from("/tmp/mise")));
        assert!(matches!(cli.command, Command::Schema));
    }

    #[test]
    fn parse_mise_binary() {
        let cli = Cli::parse_from(["docgen", "registry-table", "--mise", "./target/debug/mise"]);
        assert_eq!(cli.global.mise, "./target/debug/mise");
        assert!(matches!(cli.command, Command::RegistryTable(_)));
    }

    #[test]
    fn parse_suggest_generators() {
        let cli = Cli::parse_from(["docgen", "suggest", "registry", "config-paths"]);
        if let Command::Suggest(opts) = cli.command {
            assert_eq!(
                opts.generators,
                vec![Generator::Registry, Generator::ConfigPaths]
            );
        } else {
            panic!("Expected Suggest command");
        }
    }

    #[test]
    fn suggest_requires_a_generator() {
        assert!(Cli::try_parse_from(["docgen", "suggest"]).is_err());
        assert!(Cli::try_parse_from(["docgen", "suggest", "nope"]).is_err());
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["docgen", "completions", "zsh"]);
        assert!(matches!(
            cli.command,
            Command::Completions(CompletionsOpts {
                shell: clap_complete::Shell::Zsh
            })
        ));
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["docgen", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["docgen", "-v", "settings"]);
        assert!(cli.verbose);
    }
}
