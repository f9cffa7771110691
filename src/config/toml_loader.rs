//! Source document reading with path-aware errors.
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::error::LoadError;

/// Read a file to a string, mapping failures to [`LoadError`].
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] when the path does not exist and
/// [`LoadError::Io`] for any other read failure.
pub fn read_source(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a TOML document and deserialize it into `T`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or does
/// not match the shape of `T`.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = read_source(path)?;
    toml::from_str(&content).map_err(|e| LoadError::InvalidToml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read and parse a TOML document into a table.
///
/// Tables keep their authored key order.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_table(path: &Path) -> Result<toml::Table, LoadError> {
    load_config(path)
}

/// Read and parse a JSON document.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON.
pub fn load_json(path: &Path) -> Result<serde_json::Value, LoadError> {
    let content = read_source(path)?;
    serde_json::from_str(&content).map_err(|e| LoadError::InvalidJson {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// List the `*.toml` files directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns an error if the directory cannot be read.
pub fn list_toml_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let io_err = |source| LoadError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
