//! Settings entries as authored in `settings.toml`.
//!
//! Leaves reject unknown and mistyped fields so a typo in the schema fails
//! the build instead of silently dropping a property.
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::SchemaError;

/// A leaf setting table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingSource {
    /// Internal type tag (e.g. `Option<Url>`).
    #[serde(rename = "type")]
    pub type_tag: Option<String>,
    /// One-line description.
    pub description: Option<String>,
    /// Long-form Markdown.
    pub docs: Option<String>,
    /// Literal default value.
    pub default: Option<toml::Value>,
    /// Display text used in place of the literal default.
    pub docs_default: Option<String>,
    /// Whether the setting may be unset.
    #[serde(default)]
    pub optional: bool,
    /// Hidden from the documentation.
    #[serde(default)]
    pub hide: bool,
    /// Read during early initialization.
    #[serde(default)]
    pub rc: bool,
    /// Allowed values.
    #[serde(rename = "enum")]
    pub enum_items: Option<Vec<EnumItem>>,
    /// Environment variable name.
    pub env: Option<String>,
    /// List-splitting mode for the environment variable.
    pub parse_env: Option<String>,
    /// Deprecation flag or note.
    pub deprecated: Option<Deprecation>,
}

impl SettingSource {
    /// Deserialize a leaf table.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidEntry`] for unknown or mistyped fields.
    pub fn from_table(key: &str, table: &toml::Table) -> Result<Self, SchemaError> {
        deserialize(key, toml::Value::Table(table.clone()))
    }
}

/// A group table: metadata plus member settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupSource {
    /// Group description.
    pub description: Option<String>,
    /// Deprecation flag or note for the whole group.
    pub deprecated: Option<Deprecation>,
    /// Hidden from the documentation.
    #[serde(default)]
    pub hide: bool,
    /// Member settings in authored order, keyed by subkey.
    #[serde(flatten)]
    pub members: toml::Table,
}

impl GroupSource {
    /// Deserialize a group table.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidEntry`] for mistyped metadata.
    pub fn from_table(key: &str, table: &toml::Table) -> Result<Self, SchemaError> {
        deserialize(key, toml::Value::Table(table.clone()))
    }
}

/// One item of an `enum` declaration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumItem {
    /// `{ value, description }`.
    Described {
        /// The allowed value.
        value: toml::Value,
        /// What the value means.
        description: Option<String>,
    },
    /// `[value, description]`.
    Pair(Vec<toml::Value>),
    /// A bare value.
    Literal(toml::Value),
}

impl EnumItem {
    /// The allowed value, if the item carries one.
    #[must_use]
    pub fn value(&self) -> Option<&toml::Value> {
        match self {
            Self::Described { value, .. } => Some(value),
            Self::Pair(pair) => pair.first(),
            Self::Literal(toml::Value::Table(_)) => None,
            Self::Literal(value) => Some(value),
        }
    }
}

/// `deprecated = true` or `deprecated = "use X instead"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Deprecation {
    /// Plain flag.
    Flag(bool),
    /// Deprecation note; an empty note does not deprecate.
    Note(String),
}

impl Deprecation {
    /// Whether this marks the setting as deprecated.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Note(note) => !note.is_empty(),
        }
    }
}

fn deserialize<T: DeserializeOwned>(key: &str, value: toml::Value) -> Result<T, SchemaError> {
    value.try_into().map_err(|e| SchemaError::InvalidEntry {
        key: key.to_string(),
        reason: e.message().to_string(),
    })
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

    fn leaf(src: &str) -> Result<SettingSource, SchemaError> {
        SettingSource::from_table("jobs", &src.parse::<toml::Table>().unwrap())
    }

    #[test]
    fn leaf_reads_every_field() {
        let source = leaf(
            r#"
            type = "Integer"
            description = "Parallel jobs"
            docs = "Long form"
            default = 8
            optional = true
            env = "MISE_JOBS"
            deprecated = "use threads"
            "#,
        )
        .unwrap();
        assert_eq!(source.type_tag.as_deref(), Some("Integer"));
        assert_eq!(source.default, Some(toml::Value::Integer(8)));
        assert!(source.optional);
        assert!(!source.hide);
        assert_eq!(source.env.as_deref(), Some("MISE_JOBS"));
        assert!(source.deprecated.unwrap().is_set());
    }

    #[test]
    fn mistyped_fields_are_rejected() {
        let base = "type = \"Integer\"\ndescription = \"d\"\n";
        for field in ["optional = \"true\"", "hide = 1", "env = 5", "rc = \"yes\""] {
            let err = leaf(&format!("{base}{field}\n")).unwrap_err();
            assert!(
                matches!(err, SchemaError::InvalidEntry { ref key, .. } if key == "jobs"),
                "{field} should be rejected"
            );
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = leaf("type = \"Integer\"\ndescripton = \"d\"\n").unwrap_err();
        let SchemaError::InvalidEntry { reason, .. } = err else {
            panic!("expected an invalid entry");
        };
        assert!(reason.contains("descripton"));
    }

    #[test]
    fn enum_items_in_every_form() {
        let source = leaf(
            r#"
            type = "String"
            description = "d"
            enum = ["a", { value = "b", description = "bee" }, ["c", "see"], { label = "x" }]
            "#,
        )
        .unwrap();
        let values: Vec<Option<&toml::Value>> = source
            .enum_items
            .as_deref()
            .unwrap()
            .iter()
            .map(EnumItem::value)
            .collect();
        assert_eq!(values[0].and_then(toml::Value::as_str), Some("a"));
        assert_eq!(values[1].and_then(toml::Value::as_str), Some("b"));
        assert_eq!(values[2].and_then(toml::Value::as_str), Some("c"));
        assert_eq!(values[3], None);
    }

    #[test]
    fn group_collects_members_in_order() {
        let table: toml::Table =
            "description = \"Node\"\n[mirror_url]\ntype = \"Url\"\n[compile]\ntype = \"Bool\"\n"
                .parse()
                .unwrap();
        let group = GroupSource::from_table("node", &table).unwrap();
        assert_eq!(group.description.as_deref(), Some("Node"));
        let keys: Vec<&str> = group.members.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["mirror_url", "compile"]);
    }

    #[test]
    fn group_rejects_mistyped_metadata() {
        let table: toml::Table = "hide = \"no\"\n".parse().unwrap();
        assert!(GroupSource::from_table("node", &table).is_err());
    }

    #[test]
    fn empty_note_is_not_deprecated() {
        assert!(!Deprecation::Note(String::new()).is_set());
        assert!(Deprecation::Flag(true).is_set());
    }
}
