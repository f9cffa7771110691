//! Tool record construction from registry entries.
//!
//! Registry entries are user-authored, so every field deserializes
//! leniently: a mistyped value degrades to empty instead of failing.
use std::collections::{BTreeMap, BTreeSet};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::identifier::BackendSpec;
use super::url::BackendKind;

/// One backend as authored in the registry, before parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum BackendEntry {
    /// A plain `prefix:slug[opts]` descriptor.
    Descriptor(String),
    /// `{ full, platforms, options }`.
    Structured(StructuredBackend),
    /// Anything else; kept so the backend list stays aligned with the source.
    Malformed(toml::Value),
}

/// The table form of a backend entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StructuredBackend {
    /// Descriptor string.
    pub full: String,
    /// Platforms this backend is restricted to; empty means all.
    #[serde(default, deserialize_with = "lenient_list")]
    pub platforms: Vec<String>,
    /// Structured options, applied before inline bracket options.
    #[serde(default, deserialize_with = "lenient_options")]
    pub options: BTreeMap<String, String>,
}

impl BackendEntry {
    /// Descriptor string; empty for malformed entries.
    #[must_use]
    pub fn raw(&self) -> &str {
        match self {
            Self::Descriptor(raw) => raw,
            Self::Structured(entry) => &entry.full,
            Self::Malformed(_) => "",
        }
    }

    /// Platform restriction; empty means all.
    #[must_use]
    pub fn platforms(&self) -> &[String] {
        match self {
            Self::Structured(entry) => &entry.platforms,
            Self::Descriptor(_) | Self::Malformed(_) => &[],
        }
    }

    /// Parse the descriptor and merge structured options under the inline ones.
    #[must_use]
    pub fn spec(&self) -> BackendSpec {
        let spec = BackendSpec::parse(self.raw());
        match self {
            Self::Structured(entry) => spec.with_structured_options(entry.options.clone()),
            Self::Descriptor(_) | Self::Malformed(_) => spec,
        }
    }
}

/// A tool's registry entry as authored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ToolSource {
    /// Alternate names, in authored order.
    #[serde(deserialize_with = "lenient_list")]
    pub aliases: Vec<String>,
    /// Backends in preference order.
    #[serde(deserialize_with = "lenient_list")]
    pub backends: Vec<BackendEntry>,
    /// Supported operating systems; empty means all.
    #[serde(deserialize_with = "lenient_list")]
    pub os: Vec<String>,
    /// One-line description, if authored.
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
}

impl ToolSource {
    /// Read a tool entry permissively. A value that is not a table yields
    /// an empty source.
    #[must_use]
    pub fn from_value(value: toml::Value) -> Self {
        value.try_into().unwrap_or_default()
    }

    /// Read a tool table permissively.
    #[must_use]
    pub fn from_table(table: &toml::Table) -> Self {
        Self::from_value(toml::Value::Table(table.clone()))
    }
}

/// A resolved backend reference shown next to a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendLink {
    /// `prefix:slug`, or empty when the descriptor was unparseable.
    pub name: String,
    /// Package-origin URL, or empty when none can be deduced.
    pub url: String,
    /// Platform restriction carried over from a structured entry.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<String>,
}

impl BackendLink {
    /// The backend kind named by this link's prefix.
    #[must_use]
    pub fn kind(&self) -> Option<BackendKind> {
        self.name
            .split_once(':')
            .map(|(prefix, _)| BackendKind::from_prefix(prefix))
    }
}

/// One normalized tool entry, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolRecord {
    /// Unique short name.
    #[serde(rename = "short")]
    pub name: String,
    /// Alternate names in authored order.
    pub aliases: Vec<String>,
    /// Resolved backends; the first is the default.
    pub backends: Vec<BackendLink>,
    /// Supported operating systems; empty means all.
    pub os: BTreeSet<String>,
    /// One-line description, if authored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ToolRecord {
    /// Build a record from a tool's source entry.
    ///
    /// Backends keep their declared order and none are dropped, even when
    /// their URL resolves to an empty string.
    #[must_use]
    pub fn build(name: &str, source: &ToolSource) -> Self {
        let backends = source
            .backends
            .iter()
            .map(|entry| {
                let spec = entry.spec();
                let url = super::url::resolve(&spec.prefix, &spec.slug, &spec.options);
                BackendLink {
                    name: spec.full(),
                    url,
                    platforms: entry.platforms().to_vec(),
                }
            })
            .collect();

        Self {
            name: name.to_string(),
            aliases: source.aliases.clone(),
            backends,
            os: source.os.iter().cloned().collect(),
            description: source.description.clone(),
        }
    }
}

/// Keep the items of an array that deserialize as `T`; anything that is
/// not an array becomes an empty list.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match toml::Value::deserialize(deserializer)? {
        toml::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| item.try_into().ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match toml::Value::deserialize(deserializer)? {
        toml::Value::String(s) => Some(s),
        _ => None,
    })
}

/// Option values are stringified; a non-table becomes no options.
fn lenient_options<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    Ok(match toml::Value::deserialize(deserializer)? {
        toml::Value::Table(table) => table
            .into_iter()
            .map(|(k, v)| {
                let value = match v {
                    toml::Value::String(s) => s,
                    other => other.to_string(),
                };
                (k, value)
            })
            .collect(),
        _ => BTreeMap::new(),
    })
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn source(toml_src: &str) -> ToolSource {
        ToolSource::from_table(&toml_src.parse::<toml::Table>().unwrap())
    }

    #[test]
    fn builds_backends_in_declared_order() {
        let src = source(
            r#"
            aliases = ["rg"]
            backends = ["aqua:BurntSushi/ripgrep", "cargo:ripgrep"]
            "#,
        );
        let record = ToolRecord::build("ripgrep", &src);
        assert_eq!(record.name, "ripgrep");
        assert_eq!(record.aliases, vec!["rg"]);
        assert_eq!(record.backends.len(), 2);
        assert_eq!(record.backends[0].name, "aqua:BurntSushi/ripgrep");
        assert_eq!(record.backends[0].url, "https://github.com/BurntSushi/ripgrep");
        assert_eq!(record.backends[1].url, "https://crates.io/crates/ripgrep");
        assert!(record.os.is_empty());
    }

    #[test]
    fn structured_entry_options_and_platforms() {
        let src = source(
            r#"
            [[backends]]
            full = "conda:samtools"
            platforms = ["linux"]
            options = { channel = "bioconda" }
            "#,
        );
        let record = ToolRecord::build("samtools", &src);
        assert_eq!(record.backends[0].name, "conda:samtools");
        assert_eq!(record.backends[0].url, "https://anaconda.org/bioconda/samtools");
        assert_eq!(record.backends[0].platforms, vec!["linux"]);
    }

    #[test]
    fn inline_options_win_over_structured() {
        let src = source(
            r#"
            [[backends]]
            full = "spm:org/pkg[provider=gitlab]"
            options = { provider = "github" }
            "#,
        );
        let record = ToolRecord::build("pkg", &src);
        assert_eq!(record.backends[0].url, "https://gitlab.com/org/pkg");
    }

    #[test]
    fn bracket_clause_is_dropped_from_name() {
        let src = source(r#"backends = ["ubi:owner/repo[exe=tool]"]"#);
        let record = ToolRecord::build("tool", &src);
        assert_eq!(record.backends[0].name, "ubi:owner/repo");
    }

    #[test]
    fn unparseable_backend_keeps_empty_entry() {
        let src = source(r#"backends = ["garbage", "npm:bar"]"#);
        let record = ToolRecord::build("bar", &src);
        assert_eq!(record.backends.len(), 2);
        assert_eq!(record.backends[0].name, "");
        assert_eq!(record.backends[0].url, "");
        assert_eq!(record.backends[1].name, "npm:bar");
    }

    #[test]
    fn mistyped_fields_default_to_empty() {
        let src = source("aliases = 3\nbackends = \"cargo:x\"\nos = [1, \"linux\"]\n");
        let record = ToolRecord::build("x", &src);
        assert!(record.aliases.is_empty());
        assert!(record.backends.is_empty());
        assert_eq!(record.os.iter().collect::<Vec<_>>(), vec!["linux"]);
    }

    #[test]
    fn non_string_backend_becomes_empty_entry() {
        let src = source("backends = [42]\n");
        let record = ToolRecord::build("x", &src);
        assert_eq!(record.backends.len(), 1);
        assert!(record.backends[0].name.is_empty());
    }

    #[test]
    fn structured_entry_tolerates_mistyped_extras() {
        let src = source(
            r#"
            [[backends]]
            full = "cargo:foo"
            platforms = "linux"
            options = 3
            "#,
        );
        assert_eq!(
            src.backends[0],
            BackendEntry::Structured(StructuredBackend {
                full: "cargo:foo".to_string(),
                ..StructuredBackend::default()
            })
        );
        let record = ToolRecord::build("foo", &src);
        assert_eq!(record.backends[0].url, "https://crates.io/crates/foo");
    }

    #[test]
    fn non_string_option_values_are_stringified() {
        let src = source(
            r#"
            [[backends]]
            full = "ubi:owner/repo"
            options = { extract_all = true }
            "#,
        );
        assert_eq!(
            src.backends[0].spec().options.get("extract_all").map(String::as_str),
            Some("true")
        );
    }

    #[test]
    fn non_table_tool_is_empty() {
        assert_eq!(ToolSource::from_value(toml::Value::Integer(1)), ToolSource::default());
    }

    #[test]
    fn serializes_with_short_key() {
        let src = source(r#"backends = ["cargo:foo"]"#);
        let json = serde_json::to_value(ToolRecord::build("foo", &src)).unwrap();
        assert_eq!(json["short"], "foo");
        assert_eq!(json["backends"][0]["url"], "https://crates.io/crates/foo");
        assert!(json["backends"][0].get("platforms").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn link_kind_reads_prefix() {
        let link = BackendLink {
            name: "aqua:cli/cli".to_string(),
            url: String::new(),
            platforms: Vec::new(),
        };
        assert_eq!(link.kind(), Some(BackendKind::Aqua));
        let empty = BackendLink {
            name: String::new(),
            url: String::new(),
            platforms: Vec::new(),
        };
        assert_eq!(empty.kind(), None);
    }
}
