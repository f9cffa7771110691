//! Internal setting type tags and their render types.
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Type tags used in the settings schema source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingType {
    /// `String`
    String,
    /// `Path` (also written `PathBuf`)
    Path,
    /// `Url`
    Url,
    /// `Duration`
    Duration,
    /// `Bool`
    Bool,
    /// `Integer`
    Integer,
    /// `ListString`
    ListString,
    /// `ListPath`
    ListPath,
    /// `SetString`
    SetString,
    /// `IndexMap<String, String>`
    StringMap,
    /// `BoolOrString`
    BoolOrString,
}

/// Returned when a type tag has no mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownType(pub String);

impl FromStr for SettingType {
    type Err = UnknownType;

    /// Parse a tag, unwrapping an `Option<...>` wrapper and treating
    /// `PathBuf` as `Path`.
    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        let inner = tag
            .strip_prefix("Option<")
            .and_then(|t| t.strip_suffix('>'))
            .unwrap_or(tag);
        match inner {
            "String" => Ok(Self::String),
            "Path" | "PathBuf" => Ok(Self::Path),
            "Url" => Ok(Self::Url),
            "Duration" => Ok(Self::Duration),
            "Bool" => Ok(Self::Bool),
            "Integer" => Ok(Self::Integer),
            "ListString" => Ok(Self::ListString),
            "ListPath" => Ok(Self::ListPath),
            "SetString" => Ok(Self::SetString),
            "IndexMap<String, String>" => Ok(Self::StringMap),
            "BoolOrString" => Ok(Self::BoolOrString),
            _ => Err(UnknownType(tag.to_string())),
        }
    }
}

impl SettingType {
    /// The render type this tag maps to.
    #[must_use]
    pub const fn render(self) -> RenderType {
        match self {
            Self::String | Self::Path | Self::Url | Self::Duration => RenderType::String,
            Self::Bool => RenderType::Boolean,
            Self::Integer => RenderType::Number,
            Self::ListString | Self::ListPath | Self::SetString => RenderType::StringArray,
            Self::StringMap => RenderType::Object,
            Self::BoolOrString => RenderType::BooleanOrString,
        }
    }
}

/// The small set of types the documentation and JSON schema understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderType {
    /// `string`
    String,
    /// `boolean`
    Boolean,
    /// `number`
    Number,
    /// `string[]`
    StringArray,
    /// `object` (string-valued map)
    Object,
    /// `boolean|string`
    BooleanOrString,
}

impl RenderType {
    /// Name used in the documentation data.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::StringArray => "string[]",
            Self::Object => "object",
            Self::BooleanOrString => "boolean|string",
        }
    }

    /// Type value for a JSON-Schema property.
    #[must_use]
    pub fn schema_type(self) -> serde_json::Value {
        match self {
            Self::StringArray => "array".into(),
            Self::BooleanOrString => serde_json::json!(["boolean", "string"]),
            other => other.as_str().into(),
        }
    }

    /// Item metadata for list types.
    #[must_use]
    pub const fn items(self) -> Option<TypeRef> {
        match self {
            Self::StringArray => Some(TypeRef::STRING),
            _ => None,
        }
    }

    /// Value metadata for map types.
    #[must_use]
    pub const fn additional_properties(self) -> Option<TypeRef> {
        match self {
            Self::Object => Some(TypeRef::STRING),
            _ => None,
        }
    }
}

impl Serialize for RenderType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A `{ "type": ... }` reference used for `items` and `additionalProperties`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeRef {
    /// Referenced type name.
    #[serde(rename = "type")]
    pub type_name: &'static str,
}

impl TypeRef {
    /// `{ "type": "string" }`
    pub const STRING: Self = Self {
        type_name: "string",
    };
}
