//! Render-ready setting records and the per-setting builder.
use serde::{Serialize, Serializer};

use super::source::{Deprecation, EnumItem, SettingSource};
use super::types::{RenderType, SettingType, TypeRef};
use crate::error::SchemaError;

/// Token shown for an optional setting that has no default.
pub const ABSENT_DEFAULT: &str = "None";

/// The default shown for a setting.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Authored display text, used verbatim.
    Docs(String),
    /// A typed literal value.
    Value(serde_json::Value),
    /// Optional with no value; rendered as [`ABSENT_DEFAULT`].
    Absent,
}

impl Serialize for DefaultValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Docs(text) => serializer.serialize_str(text),
            Self::Value(value) => value.serialize(serializer),
            Self::Absent => serializer.serialize_str(ABSENT_DEFAULT),
        }
    }
}

/// How an environment variable value is split into a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvParse {
    /// The whole value is one item.
    #[default]
    Singular,
    /// Comma-delimited list.
    Comma,
    /// Colon-delimited list.
    Colon,
}

impl EnvParse {
    /// Parse a `parse_env` mode.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnknownEnvParse`] for anything other than
    /// `list_by_comma` or `list_by_colon`.
    pub fn from_mode(key: &str, mode: &str) -> Result<Self, SchemaError> {
        match mode {
            "list_by_comma" => Ok(Self::Comma),
            "list_by_colon" => Ok(Self::Colon),
            _ => Err(SchemaError::UnknownEnvParse {
                key: key.to_string(),
                mode: mode.to_string(),
            }),
        }
    }
}

/// An environment variable that can also set a setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvBinding {
    /// Variable name.
    pub name: String,
    /// How the value is split.
    pub parse: EnvParse,
}

/// One leaf setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingElement {
    /// Dotted key (`group.subkey` for nested settings).
    pub key: String,
    /// Render type.
    #[serde(rename = "type")]
    pub render_type: RenderType,
    /// Default shown in the documentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    /// One-line description.
    pub description: String,
    /// Long-form Markdown, falling back to the description.
    pub docs: String,
    /// Whether the setting is deprecated.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Closed set of allowed values.
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
    /// Environment variable binding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env: Option<EnvBinding>,
    /// Whether the setting may be unset, for display purposes.
    pub optional: bool,
    /// Item type for `string[]` settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<TypeRef>,
    /// Value type for `object` settings.
    #[serde(
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<TypeRef>,
    /// The literal default as authored, used by the JSON schema.
    #[serde(skip)]
    pub declared_default: Option<serde_json::Value>,
    /// Hidden from the documentation (still part of the schema).
    #[serde(skip)]
    pub hide: bool,
    /// Read during early initialization (`.miserc.toml`).
    #[serde(skip)]
    pub rc: bool,
}

impl SettingElement {
    /// Build a leaf setting from its source table.
    ///
    /// # Errors
    ///
    /// Fails on an unknown or mistyped field, a missing or unknown type, a
    /// missing description, or an unknown `parse_env` mode.
    pub fn build(key: &str, props: &toml::Table) -> Result<Self, SchemaError> {
        Self::from_source(key, SettingSource::from_table(key, props)?)
    }

    /// Build a leaf setting from its deserialized source.
    ///
    /// # Errors
    ///
    /// Same as [`SettingElement::build`], minus the field-shape checks.
    pub fn from_source(key: &str, source: SettingSource) -> Result<Self, SchemaError> {
        let tag = source
            .type_tag
            .as_deref()
            .ok_or_else(|| invalid(key, "missing type"))?;
        let render_type = tag
            .parse::<SettingType>()
            .map_err(|e| SchemaError::UnknownType {
                key: key.to_string(),
                type_tag: e.0,
            })?
            .render();

        let description = source
            .description
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| SchemaError::MissingDescription(key.to_string()))?;
        let docs = source.docs.unwrap_or_else(|| description.clone());

        let declared_default = source
            .default
            .as_ref()
            .map(|v| to_json(key, v))
            .transpose()?;
        let optional = source.optional || tag.starts_with("Option<");
        let (default, optional) = compute_default(
            render_type,
            declared_default.as_ref(),
            source.docs_default.as_deref(),
            optional,
        );

        let enum_values = source
            .enum_items
            .as_deref()
            .map(|items| enum_values(key, items))
            .transpose()?;

        let env = source
            .env
            .map(|name| {
                let parse = source
                    .parse_env
                    .as_deref()
                    .map(|mode| EnvParse::from_mode(key, mode))
                    .transpose()?
                    .unwrap_or_default();
                Ok::<_, SchemaError>(EnvBinding { name, parse })
            })
            .transpose()?;

        Ok(Self {
            key: key.to_string(),
            render_type,
            default,
            description,
            docs,
            deprecated: source.deprecated.as_ref().is_some_and(Deprecation::is_set),
            enum_values,
            env,
            optional,
            items: render_type.items(),
            additional_properties: render_type.additional_properties(),
            declared_default,
            hide: source.hide,
            rc: source.rc,
        })
    }
}

/// Compute the displayed default and the displayed optionality.
///
/// Precedence: authored display text (which also marks the setting as not
/// optional for display), then the literal default, then `false` for a
/// required boolean, then `[]` for a required list, then the absent marker
/// for optional settings. Anything else has no default.
#[must_use]
pub fn compute_default(
    render_type: RenderType,
    declared: Option<&serde_json::Value>,
    docs_default: Option<&str>,
    optional: bool,
) -> (Option<DefaultValue>, bool) {
    if let Some(text) = docs_default {
        return (Some(DefaultValue::Docs(text.to_string())), false);
    }
    let default = match (declared, render_type, optional) {
        (Some(value), _, _) => Some(DefaultValue::Value(value.clone())),
        (None, RenderType::Boolean, false) => Some(DefaultValue::Value(false.into())),
        (None, RenderType::StringArray, false) => {
            Some(DefaultValue::Value(serde_json::Value::Array(Vec::new())))
        }
        (None, _, true) => Some(DefaultValue::Absent),
        (None, _, false) => None,
    };
    (default, optional)
}

/// A group of related settings (a non-leaf key in the source).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingGroup {
    /// Group key.
    pub key: String,
    /// Group description, if authored.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "additionalProperties")]
    additional_properties: bool,
    /// Whether the whole group is deprecated.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub deprecated: bool,
    /// Hidden from the documentation.
    #[serde(skip)]
    pub hide: bool,
    /// Member settings in authored order.
    pub settings: Vec<SettingElement>,
}

impl SettingGroup {
    /// Create an empty group. Groups are closed: `additionalProperties` is
    /// always `false`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            description: None,
            additional_properties: false,
            deprecated: false,
            hide: false,
            settings: Vec::new(),
        }
    }

    /// Always `false`.
    #[must_use]
    pub const fn additional_properties(&self) -> bool {
        self.additional_properties
    }
}

/// A top-level settings entry: a leaf or a group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SettingEntry {
    /// A leaf setting.
    Element(SettingElement),
    /// A group of leaf settings.
    Group(SettingGroup),
}

impl SettingEntry {
    /// Primary key used for ordering.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Element(e) => &e.key,
            Self::Group(g) => &g.key,
        }
    }

    /// Every leaf in this entry.
    #[must_use]
    pub fn elements(&self) -> Vec<&SettingElement> {
        match self {
            Self::Element(e) => vec![e],
            Self::Group(g) => g.settings.iter().collect(),
        }
    }
}

/// Extract allowed values from an `enum` declaration.
///
/// Items may be bare literals, `{ value, description }` tables, or
/// `[value, description]` pairs; only the value is kept.
fn enum_values(key: &str, items: &[EnumItem]) -> Result<Vec<serde_json::Value>, SchemaError> {
    items
        .iter()
        .map(|item| {
            item.value()
                .ok_or_else(|| invalid(key, "enum item has no value"))
                .and_then(|v| to_json(key, v))
        })
        .collect()
}

fn to_json(key: &str, value: &toml::Value) -> Result<serde_json::Value, SchemaError> {
    serde_json::to_value(value).map_err(|e| invalid(key, &e.to_string()))
}

pub(super) fn invalid(key: &str, reason: &str) -> SchemaError {
    SchemaError::InvalidEntry {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    fn build(key: &str, src: &str) -> Result<SettingElement, SchemaError> {
        SettingElement::build(key, &src.parse::<toml::Table>().unwrap())
    }

    #[test]
    fn required_list_defaults_to_empty_list() {
        let e = build(
            "idiomatic_version_file_enable_tools",
            "type = \"ListString\"\ndescription = \"d\"\n",
        )
        .unwrap();
        assert_eq!(e.render_type, RenderType::StringArray);
        assert_eq!(e.items, Some(TypeRef::STRING));
        assert_eq!(e.default, Some(DefaultValue::Value(json!([]))));
        assert!(!e.optional);
    }

    #[test]
    fn required_bool_defaults_to_false() {
        let e = build("experimental", "type = \"Bool\"\ndescription = \"d\"\n").unwrap();
        assert_eq!(e.default, Some(DefaultValue::Value(json!(false))));
    }

    #[test]
    fn false_fallback_does_not_leak_to_other_types() {
        let e = build("jobs", "type = \"Integer\"\ndescription = \"d\"\n").unwrap();
        assert_eq!(e.default, None);
        let e = build("node.mirror_url", "type = \"Url\"\ndescription = \"d\"\n").unwrap();
        assert_eq!(e.default, None);
    }

    #[test]
    fn optional_without_default_is_absent() {
        let e = build("color", "type = \"Bool\"\noptional = true\ndescription = \"d\"\n").unwrap();
        assert_eq!(e.default, Some(DefaultValue::Absent));
        assert!(e.optional);
        assert_eq!(serde_json::to_value(&e).unwrap()["default"], "None");
    }

    #[test]
    fn option_wrapper_implies_optional() {
        let e = build(
            "cache_prune_age",
            "type = \"Option<Duration>\"\ndescription = \"d\"\n",
        )
        .unwrap();
        assert!(e.optional);
        assert_eq!(e.default, Some(DefaultValue::Absent));
    }

    #[test]
    fn literal_default_wins_over_fallbacks() {
        let e = build(
            "jobs",
            "type = \"Integer\"\ndefault = 8\noptional = true\ndescription = \"d\"\n",
        )
        .unwrap();
        assert_eq!(e.default, Some(DefaultValue::Value(json!(8))));
        assert_eq!(e.declared_default, Some(json!(8)));
    }

    #[test]
    fn docs_default_is_verbatim_and_not_optional() {
        let e = build(
            "cache_dir",
            "type = \"Path\"\noptional = true\ndefault = \"/x\"\ndocs_default = \"~/.cache/mise\"\ndescription = \"d\"\n",
        )
        .unwrap();
        assert_eq!(e.default, Some(DefaultValue::Docs("~/.cache/mise".to_string())));
        assert!(!e.optional);
        assert_eq!(e.declared_default, Some(json!("/x")));
    }

    #[test]
    fn map_type_carries_additional_properties() {
        let e = build("env", "type = \"IndexMap<String, String>\"\ndescription = \"d\"\n").unwrap();
        assert_eq!(e.render_type, RenderType::Object);
        assert_eq!(e.additional_properties, Some(TypeRef::STRING));
        assert_eq!(e.items, None);
    }

    #[test]
    fn unknown_type_fails_fast() {
        let err = build("x", "type = \"Frobnicate\"\ndescription = \"d\"\n").unwrap_err();
        assert_eq!(
            err,
            SchemaError::UnknownType {
                key: "x".to_string(),
                type_tag: "Frobnicate".to_string()
            }
        );
    }

    #[test]
    fn missing_type_fails() {
        assert!(matches!(
            build("x", "description = \"d\"\n").unwrap_err(),
            SchemaError::InvalidEntry { .. }
        ));
    }

    #[test]
    fn mistyped_fields_fail_the_build() {
        let err = build(
            "jobs",
            "type = \"Integer\"\ndescription = \"d\"\noptional = \"true\"\nhide = 1\nenv = 5\n",
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidEntry { ref key, .. } if key == "jobs"));
    }

    #[test]
    fn missing_description_fails() {
        assert_eq!(
            build("x", "type = \"String\"\n").unwrap_err(),
            SchemaError::MissingDescription("x".to_string())
        );
        assert!(build("x", "type = \"String\"\ndescription = \"  \"\n").is_err());
    }

    #[test]
    fn enum_values_from_every_form() {
        let e = build(
            "status.show_env",
            r#"
            type = "String"
            description = "d"
            enum = ["a", { value = "b", description = "bee" }, ["c", "see"]]
            "#,
        )
        .unwrap();
        assert_eq!(e.enum_values, Some(vec![json!("a"), json!("b"), json!("c")]));
    }

    #[test]
    fn env_binding_with_parse_mode() {
        let e = build(
            "disable_tools",
            "type = \"SetString\"\ndescription = \"d\"\nenv = \"MISE_DISABLE_TOOLS\"\nparse_env = \"list_by_comma\"\n",
        )
        .unwrap();
        assert_eq!(
            e.env,
            Some(EnvBinding {
                name: "MISE_DISABLE_TOOLS".to_string(),
                parse: EnvParse::Comma
            })
        );

        let e = build(
            "jobs",
            "type = \"Integer\"\ndescription = \"d\"\nenv = \"MISE_JOBS\"\n",
        )
        .unwrap();
        assert_eq!(e.env.unwrap().parse, EnvParse::Singular);
    }

    #[test]
    fn unknown_parse_env_fails() {
        let err = build(
            "x",
            "type = \"ListPath\"\ndescription = \"d\"\nenv = \"MISE_X\"\nparse_env = \"list_by_semicolon\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownEnvParse { .. }));
    }

    #[test]
    fn docs_fall_back_to_description() {
        let e = build("x", "type = \"String\"\ndescription = \"short\"\n").unwrap();
        assert_eq!(e.docs, "short");
        let e = build(
            "x",
            "type = \"String\"\ndescription = \"short\"\ndocs = \"long\"\n",
        )
        .unwrap();
        assert_eq!(e.docs, "long");
    }

    #[test]
    fn deprecated_accepts_flag_or_note() {
        let e = build(
            "x",
            "type = \"String\"\ndescription = \"d\"\ndeprecated = \"use y\"\n",
        )
        .unwrap();
        assert!(e.deprecated);
        let e = build("x", "type = \"String\"\ndescription = \"d\"\n").unwrap();
        assert!(!e.deprecated);
        assert!(serde_json::to_value(&e).unwrap().get("deprecated").is_none());
    }

    #[test]
    fn group_is_always_closed() {
        let g = SettingGroup::new("node");
        assert!(!g.additional_properties());
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["additionalProperties"], json!(false));
    }
}
