//! Generator definitions: one `mise` invocation plus an output parser each.
use std::fmt;

use anyhow::{Context, Result};
use serde::Deserialize;

use super::Suggestion;

/// Description attached to backend suggestions.
const BACKEND_DESCRIPTION: &str = "Backend";

/// A named completion source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Generator {
    /// Tools from `mise registry`.
    Registry,
    /// Backends from `mise backends ls`.
    Backends,
    /// Installed tools from `mise ls --installed`.
    Installed,
    /// Every known plugin from `mise plugins --all`.
    Plugins,
    /// Tasks from `mise tasks -J`.
    Tasks,
    /// Setting keys from `mise settings --keys`.
    Settings,
    /// Loaded config files from `mise config ls -J`.
    ConfigPaths,
    /// Shell aliases from `mise shell-alias ls --no-header`.
    ShellAliases,
}

impl Generator {
    /// Arguments passed to the `mise` binary.
    #[must_use]
    pub const fn args(self) -> &'static [&'static str] {
        match self {
            Self::Registry => &["registry"],
            Self::Backends => &["backends", "ls"],
            Self::Installed => &["ls", "--installed"],
            Self::Plugins => &["plugins", "--all"],
            Self::Tasks => &["tasks", "-J"],
            Self::Settings => &["settings", "--keys"],
            Self::ConfigPaths => &["config", "ls", "-J"],
            Self::ShellAliases => &["shell-alias", "ls", "--no-header"],
        }
    }

    /// Name used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::Backends => "backends",
            Self::Installed => "installed",
            Self::Plugins => "plugins",
            Self::Tasks => "tasks",
            Self::Settings => "settings",
            Self::ConfigPaths => "config-paths",
            Self::ShellAliases => "shell-aliases",
        }
    }

    /// Turn the command's stdout into suggestions.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON output cannot be parsed.
    pub fn parse(self, stdout: &str) -> Result<Vec<Suggestion>> {
        match self {
            Self::Registry => Ok(parse_registry(stdout)),
            Self::Backends => Ok(lines(stdout)
                .map(|name| Suggestion::new(name).with_description(BACKEND_DESCRIPTION))
                .collect()),
            Self::Installed => Ok(parse_installed(stdout)),
            Self::Plugins | Self::Settings => Ok(lines(stdout).map(Suggestion::new).collect()),
            Self::Tasks => parse_tasks(stdout),
            Self::ConfigPaths => parse_config_paths(stdout),
            Self::ShellAliases => Ok(parse_shell_aliases(stdout)),
        }
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn lines(stdout: &str) -> impl Iterator<Item = &str> {
    stdout.lines().map(str::trim).filter(|l| !l.is_empty())
}

/// `name  backend...` rows; the first backend becomes the description and
/// repeated names are dropped.
fn parse_registry(stdout: &str) -> Vec<Suggestion> {
    let mut out: Vec<Suggestion> = Vec::new();
    for line in lines(stdout) {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else { continue };
        if out.iter().any(|s| s.name == name) {
            continue;
        }
        let mut suggestion = Suggestion::new(name);
        if let Some(backend) = tokens.next() {
            suggestion = suggestion.with_description(backend);
        }
        out.push(suggestion);
    }
    out
}

/// `name  version ...` rows. A tool with one installed version is offered
/// as-is; one with several is offered as `name@` so the version can follow.
fn parse_installed(stdout: &str) -> Vec<Suggestion> {
    let mut tools: Vec<(&str, Vec<&str>)> = Vec::new();
    for line in lines(stdout) {
        let mut tokens = line.split_whitespace();
        let Some(name) = tokens.next() else { continue };
        let version = tokens.next();
        match tools.iter_mut().find(|(n, _)| *n == name) {
            Some((_, versions)) => versions.extend(version),
            None => tools.push((name, version.into_iter().collect())),
        }
    }
    tools
        .into_iter()
        .map(|(name, versions)| {
            if versions.len() > 1 {
                Suggestion::new(format!("{name}@")).with_description(versions.join(", "))
            } else {
                let suggestion = Suggestion::new(name);
                match versions.first() {
                    Some(v) => suggestion.with_description(*v),
                    None => suggestion,
                }
            }
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct TaskRow {
    name: String,
    #[serde(default)]
    description: Option<String>,
}

fn parse_tasks(stdout: &str) -> Result<Vec<Suggestion>> {
    let rows: Vec<TaskRow> =
        serde_json::from_str(stdout).context("failed to parse task list JSON")?;
    Ok(rows
        .into_iter()
        .map(|row| {
            let suggestion = Suggestion::new(row.name);
            match row.description.filter(|d| !d.is_empty()) {
                Some(d) => suggestion.with_description(d),
                None => suggestion,
            }
        })
        .collect())
}

#[derive(Debug, Deserialize)]
struct ConfigRow {
    path: String,
}

fn parse_config_paths(stdout: &str) -> Result<Vec<Suggestion>> {
    let rows: Vec<ConfigRow> =
        serde_json::from_str(stdout).context("failed to parse config list JSON")?;
    Ok(rows
        .into_iter()
        .map(|row| Suggestion::new(row.path.clone()).with_description(row.path))
        .collect())
}

/// `alias  command...` rows; everything after the alias is its description.
fn parse_shell_aliases(stdout: &str) -> Vec<Suggestion> {
    lines(stdout)
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let name = tokens.next()?;
            let rest = tokens.collect::<Vec<_>>().join(" ");
            let suggestion = Suggestion::new(name);
            Some(if rest.is_empty() {
                suggestion
            } else {
                suggestion.with_description(rest)
            })
        })
        .collect()
}
