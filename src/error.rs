//! Domain-specific error types for the documentation data pipeline.
//!
//! Internal modules return typed errors while command handlers at the CLI
//! boundary convert them to [`anyhow::Error`] via the standard `?` operator.
//!
//! Registry data is user-authored and loads permissively: the only failures
//! it can produce are [`LoadError`]s (the file itself is unreadable). The
//! settings schema is hand-maintained and loads strictly: an authoring
//! mistake surfaces as a [`SchemaError`] and aborts the build.
//!
//! # Error hierarchy
//!
//! ```text
//! DocgenError
//! ├── Load(LoadError):     file I/O, TOML syntax, missing sections
//! └── Schema(SchemaError): settings authoring errors (fail-fast)
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the pipeline.
#[derive(Error, Debug)]
pub enum DocgenError {
    /// A source file could not be read or parsed.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// The settings schema contains an authoring error.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Errors that arise while reading source documents from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source path does not exist.
    #[error("Source not found: {}", .0.display())]
    NotFound(PathBuf),

    /// An I/O error occurred while reading a source file.
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML.
    #[error("Invalid TOML in {}: {message}", path.display())]
    InvalidToml {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// The file is not valid JSON.
    #[error("Invalid JSON in {}: {message}", path.display())]
    InvalidJson {
        /// Path to the offending file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// A required top-level table is absent from the document.
    #[error("Missing required section [{0}]")]
    MissingSection(String),
}

/// Authoring errors in the settings schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The internal type tag has no render mapping.
    #[error("Unknown type '{type_tag}' for setting {key}")]
    UnknownType {
        /// Dotted setting key.
        key: String,
        /// The unrecognized type tag as authored.
        type_tag: String,
    },

    /// A leaf setting declares no description.
    #[error("Missing description for {0}")]
    MissingDescription(String),

    /// The `parse_env` mode is not one of the supported list modes.
    #[error("Unknown parse_env '{mode}' for setting {key}")]
    UnknownEnvParse {
        /// Dotted setting key.
        key: String,
        /// The unrecognized mode as authored.
        mode: String,
    },

    /// A setting entry has the wrong shape (e.g. a scalar where a table is expected).
    #[error("Invalid setting {key}: {reason}")]
    InvalidEntry {
        /// Dotted setting key.
        key: String,
        /// Human-readable reason.
        reason: String,
    },

    /// The target JSON schema lacks the definition the settings are merged into.
    #[error("Schema document has no {0} definition")]
    MissingDefinition(String),
}
