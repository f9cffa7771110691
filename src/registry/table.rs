//! Markdown table rendering for the registry page.
use std::fmt::Write as _;
use std::sync::LazyLock;

use regex::Regex;

use super::tool::{BackendLink, ToolRecord};
use super::url;

/// One line of `mise registry` output: tool name, then a backend
/// descriptor with an optional option clause.
#[allow(clippy::expect_used)]
static REGISTRY_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(.+?) +(.+?):(.+?)(\[.+\])? *$").expect("registry line pattern is valid")
});

/// Render records as a `| Tool | Backends |` Markdown table.
#[must_use]
pub fn render_markdown(records: &[ToolRecord]) -> String {
    let mut out = String::from("| Tool | Backends |\n| ---- | -------- |\n");
    for record in records {
        let backends = record
            .backends
            .iter()
            .filter(|b| !b.name.is_empty())
            .map(link)
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "| {} | {} |", escape(&record.name), backends);
    }
    out
}

/// Parse the tabular stdout of `mise registry` into records, one backend
/// per line. Lines that do not match the expected shape are skipped.
#[must_use]
pub fn parse_registry_output(stdout: &str) -> Vec<ToolRecord> {
    stdout
        .lines()
        .filter_map(|line| {
            let Some(caps) = REGISTRY_LINE.captures(line) else {
                if !line.trim().is_empty() {
                    tracing::debug!("skipping unrecognized registry line: {line}");
                }
                return None;
            };
            let (prefix, slug) = (&caps[2], &caps[3]);
            Some(ToolRecord {
                name: caps[1].to_string(),
                aliases: Vec::new(),
                backends: vec![BackendLink {
                    name: format!("{prefix}:{slug}"),
                    url: url::resolve(prefix, slug, &Default::default()),
                    platforms: Vec::new(),
                }],
                os: Default::default(),
                description: None,
            })
        })
        .collect()
}

fn link(backend: &BackendLink) -> String {
    let name = escape(&backend.name);
    if backend.url.is_empty() {
        format!("`{name}`")
    } else {
        format!("[{name}]({})", backend.url)
    }
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}
