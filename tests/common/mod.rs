// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed documentation root and a fluent
// builder so each integration test can set up an isolated environment
// without repeating filesystem boilerplate.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use docgen::cli::GlobalOpts;
use docgen::config::Paths;

/// Minimal main schema with an empty settings definition and the shared
/// definitions mirrored into the task schema.
pub const MAIN_SCHEMA: &str = r#"{
  "$schema": "https://json-schema.org/draft/2020-12/schema",
  "$defs": {
    "env": { "type": "object" },
    "task": { "type": "object" },
    "settings": { "type": "object", "additionalProperties": false }
  },
  "type": "object"
}"#;

/// Write the minimal set of sources the pipeline reads into `root`.
///
/// Creates:
/// - `registry.toml`: empty `[tools]` table
/// - `settings.toml`: empty document
/// - `schema/mise.json`: [`MAIN_SCHEMA`]
pub fn setup_minimal_root(root: &Path) {
    std::fs::create_dir_all(root.join("schema")).expect("create schema dir");
    std::fs::write(root.join("registry.toml"), "[tools]\n").expect("write registry.toml");
    std::fs::write(root.join("settings.toml"), "").expect("write settings.toml");
    std::fs::write(root.join("schema").join("mise.json"), MAIN_SCHEMA)
        .expect("write mise.json");
}

/// An isolated documentation root backed by a [`tempfile::TempDir`].
pub struct IntegrationTestContext {
    /// Temporary directory containing the test sources.
    pub root: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new context with a minimal but valid set of sources.
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        setup_minimal_root(root.path());
        Self { root }
    }

    /// Path to the documentation root.
    pub fn root_path(&self) -> &Path {
        self.root.path()
    }

    /// Resolved source and output locations.
    pub fn paths(&self) -> Paths {
        Paths::new(self.root.path())
    }

    /// Global options pointing at this root.
    pub fn global(&self) -> GlobalOpts {
        GlobalOpts {
            root: Some(self.root.path().to_path_buf()),
            mise: "mise".to_string(),
        }
    }

    /// Path for a generated output file inside the root.
    pub fn out(&self, name: &str) -> PathBuf {
        self.root.path().join("out").join(name)
    }

    /// Read a file under the root as a string.
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.root.path().join(relative)).expect("read file")
    }

    /// Read a JSON file under the root.
    pub fn read_json(&self, relative: &str) -> serde_json::Value {
        serde_json::from_str(&self.read(relative)).expect("parse JSON")
    }
}

/// Fluent builder for [`IntegrationTestContext`].
pub struct TestContextBuilder {
    ctx: IntegrationTestContext,
}

impl TestContextBuilder {
    /// Begin building a new context backed by a minimal root.
    pub fn new() -> Self {
        Self {
            ctx: IntegrationTestContext::new(),
        }
    }

    /// Write `content` to `<relative>` in the root, creating parents.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.ctx.root.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(path, content).expect("write file");
        self
    }

    /// Replace `registry.toml`.
    pub fn with_registry(self, content: &str) -> Self {
        self.with_file("registry.toml", content)
    }

    /// Add `registry/<name>.toml` for directory-style registries.
    pub fn with_tool_file(self, name: &str, content: &str) -> Self {
        self.with_file(&format!("registry/{name}.toml"), content)
    }

    /// Replace `settings.toml`.
    pub fn with_settings(self, content: &str) -> Self {
        self.with_file("settings.toml", content)
    }

    /// Finish building and return the configured context.
    pub fn build(self) -> IntegrationTestContext {
        self.ctx
    }
}
