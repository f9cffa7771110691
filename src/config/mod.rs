//! Source and output locations for the documentation build.
pub mod toml_loader;
pub mod validation;

use std::path::{Path, PathBuf};

/// Fixed locations of the pipeline's inputs and outputs, relative to a
/// documentation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Documentation root all other paths are resolved against.
    pub root: PathBuf,
}

impl Paths {
    /// Create paths rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve paths from the optional `--root` override, defaulting to the
    /// current directory.
    #[must_use]
    pub fn from_args(root: Option<&Path>) -> Self {
        Self::new(root.map_or_else(|| PathBuf::from("."), Path::to_path_buf))
    }

    /// Registry source: the `registry/` directory of per-tool files when it
    /// exists, otherwise the single `registry.toml` document.
    #[must_use]
    pub fn registry(&self) -> PathBuf {
        let dir = self.root.join("registry");
        if dir.is_dir() {
            dir
        } else {
            self.root.join("registry.toml")
        }
    }

    /// Settings schema source.
    #[must_use]
    pub fn settings(&self) -> PathBuf {
        self.root.join("settings.toml")
    }

    /// Main JSON schema the settings are merged into.
    #[must_use]
    pub fn schema(&self) -> PathBuf {
        self.root.join("schema").join("mise.json")
    }

    /// Task JSON schema that mirrors shared definitions from [`Self::schema`].
    #[must_use]
    pub fn task_schema(&self) -> PathBuf {
        self.root.join("schema").join("mise-task.json")
    }

    /// Early-init (`.miserc.toml`) JSON schema.
    #[must_use]
    pub fn rc_schema(&self) -> PathBuf {
        self.root.join("schema").join("miserc.json")
    }
}
