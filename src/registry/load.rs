//! Registry loading from a single document or a directory of tool files.
use std::path::Path;

use serde::Deserialize;

use crate::collate;
use crate::config::toml_loader;
use crate::error::LoadError;

use super::tool::{ToolRecord, ToolSource};

/// A registry document: one table per tool under `[tools]`.
#[derive(Debug, Deserialize)]
struct RegistryDocument {
    tools: Option<toml::Table>,
}

/// Load every tool from `path` and return the records sorted by name.
///
/// `path` is either a document with a `[tools.<name>]` table per tool, or a
/// directory holding one `<name>.toml` file per tool.
///
/// # Errors
///
/// Returns an error if a file cannot be read or is not valid TOML. Malformed
/// tool entries inside a valid document never fail the load.
pub fn load(path: &Path) -> Result<Vec<ToolRecord>, LoadError> {
    if path.is_dir() {
        load_dir(path)
    } else {
        load_document(path)
    }
}

/// Load a single registry document.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid TOML, or has no
/// `tools` table.
pub fn load_document(path: &Path) -> Result<Vec<ToolRecord>, LoadError> {
    let doc: RegistryDocument = toml_loader::load_config(path)?;
    let tools = doc
        .tools
        .ok_or_else(|| LoadError::MissingSection("tools".to_string()))?;

    let records = tools
        .into_iter()
        .map(|(name, value)| ToolRecord::build(&name, &ToolSource::from_value(value)))
        .collect();
    Ok(sorted(records))
}

/// Load a directory of per-tool documents; each file stem is the tool name.
///
/// # Errors
///
/// Returns an error if the directory or any tool file cannot be read or
/// parsed.
pub fn load_dir(dir: &Path) -> Result<Vec<ToolRecord>, LoadError> {
    let records = toml_loader::list_toml_files(dir)?
        .into_iter()
        .filter_map(|file| {
            let name = file.file_stem()?.to_string_lossy().into_owned();
            Some((name, file))
        })
        .map(|(name, file)| {
            let source: ToolSource = toml_loader::load_config(&file)?;
            Ok(ToolRecord::build(&name, &source))
        })
        .collect::<Result<Vec<_>, LoadError>>()?;
    Ok(sorted(records))
}

fn sorted(mut records: Vec<ToolRecord>) -> Vec<ToolRecord> {
    collate::sort_by_key(&mut records, |r| r.name.as_str());
    records
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn names(records: &[ToolRecord]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn document_is_sorted_regardless_of_declaration_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        std::fs::write(
            &path,
            "[tools.b]\nbackends = [\"npm:bar\"]\n\n[tools.a]\nbackends = [\"cargo:foo\"]\n",
        )
        .unwrap();

        let records = load(&path).unwrap();
        assert_eq!(names(&records), vec!["a", "b"]);
        assert_eq!(records[0].backends[0].url, "https://crates.io/crates/foo");
        assert_eq!(records[1].backends[0].url, "https://www.npmjs.com/package/bar");
    }

    #[test]
    fn document_without_tools_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        std::fs::write(&path, "[other]\nx = 1\n").unwrap();
        assert!(matches!(
            load(&path).unwrap_err(),
            LoadError::MissingSection(_)
        ));
    }

    #[test]
    fn non_table_tool_yields_empty_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.toml");
        std::fs::write(&path, "[tools]\nweird = 3\n\n[tools.ok]\nbackends = [\"go:x\"]\n").unwrap();

        let records = load(&path).unwrap();
        assert_eq!(names(&records), vec!["ok", "weird"]);
        assert!(records[1].backends.is_empty());
    }

    #[test]
    fn directory_uses_file_stem_as_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("zoxide.toml"),
            "backends = [\"aqua:ajeetdsouza/zoxide\"]\nos = [\"linux\", \"macos\"]\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("Act.toml"),
            "aliases = [\"gh-act\"]\nbackends = [\"github:nektos/act\"]\n",
        )
        .unwrap();

        let records = load(dir.path()).unwrap();
        assert_eq!(names(&records), vec!["Act", "zoxide"]);
        assert_eq!(records[0].aliases, vec!["gh-act"]);
        assert_eq!(records[1].os.len(), 2);
    }

    #[test]
    fn directory_with_invalid_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.toml"), "backends = [").unwrap();
        assert!(matches!(
            load(dir.path()).unwrap_err(),
            LoadError::InvalidToml { .. }
        ));
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load(&dir.path().join("registry.toml")).unwrap_err(),
            LoadError::NotFound(_)
        ));
    }
}
