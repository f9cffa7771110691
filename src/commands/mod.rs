pub mod completions;
pub mod registry;
pub mod schema;
pub mod settings;
pub mod suggest;
pub mod version;

use std::fs;
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context as _, Result};
use serde::Serialize;

use crate::cli::GlobalOpts;
use crate::config::Paths;
use crate::logging::Logger;

/// Shared state produced by the common command setup sequence.
#[derive(Debug)]
pub struct CommandSetup {
    pub paths: Paths,
}

impl CommandSetup {
    /// Resolve the documentation root from the global options.
    #[must_use]
    pub fn init(global: &GlobalOpts, log: &Logger) -> Self {
        let paths = Paths::from_args(global.root.as_deref());
        log.debug(&format!("root: {}", paths.root.display()));
        Self { paths }
    }
}

/// Serialize `value` as pretty JSON with a trailing newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value).context("failed to serialize JSON")?;
    text.push('\n');
    Ok(text)
}

/// Write generated text to `output`, or to stdout when no path is given.
///
/// # Errors
///
/// Returns an error if the file or stdout cannot be written.
pub fn write_output(output: Option<&Path>, content: &str, log: &Logger) -> Result<()> {
    match output {
        Some(path) => write_file(path, content, log),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .context("failed to write to stdout")
        }
    }
}

/// Write `content` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_file(path: &Path, content: &str, log: &Logger) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
    log.info(&format!("wrote {}", path.display()));
    Ok(())
}
