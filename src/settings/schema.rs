//! JSON-Schema rendering of the settings catalog.
use serde_json::{Map, Value, json};

use super::element::{SettingElement, SettingEntry, SettingGroup};
use crate::error::SchemaError;

/// Definitions the task schema shares with the main schema.
pub const SHARED_TASK_DEFS: &[&str] = &["env_directive", "env", "task_run_entry", "task"];

const RC_SCHEMA_TITLE: &str = "mise rc config";
const RC_SCHEMA_DESCRIPTION: &str =
    "Early initialization settings for mise. These settings are loaded before the main config files.";

/// Render one leaf as a JSON-Schema property.
#[must_use]
pub fn element_schema(element: &SettingElement) -> Value {
    let mut prop = Map::new();
    prop.insert("type".into(), element.render_type.schema_type());
    if let Some(default) = &element.declared_default {
        prop.insert("default".into(), default.clone());
    }
    prop.insert("description".into(), element.description.clone().into());
    if element.deprecated {
        prop.insert("deprecated".into(), true.into());
    }
    if let Some(values) = &element.enum_values {
        prop.insert("enum".into(), Value::Array(values.clone()));
    }
    if let Some(items) = element.items {
        prop.insert("items".into(), json!({ "type": items.type_name }));
    }
    if let Some(values) = element.additional_properties {
        prop.insert(
            "additionalProperties".into(),
            json!({ "type": values.type_name }),
        );
    }
    Value::Object(prop)
}

/// Render a group as a closed nested object schema.
#[must_use]
pub fn group_schema(group: &SettingGroup) -> Value {
    let mut prop = Map::new();
    prop.insert("type".into(), "object".into());
    prop.insert(
        "additionalProperties".into(),
        group.additional_properties().into(),
    );
    if let Some(description) = &group.description {
        prop.insert("description".into(), description.clone().into());
    }
    if group.deprecated {
        prop.insert("deprecated".into(), true.into());
    }
    let properties: Map<String, Value> = group
        .settings
        .iter()
        .map(|s| (member_name(group, s).to_string(), element_schema(s)))
        .collect();
    prop.insert("properties".into(), Value::Object(properties));
    Value::Object(prop)
}

/// Render every entry into the `properties` map of the settings definition.
#[must_use]
pub fn properties(entries: &[SettingEntry]) -> Map<String, Value> {
    entries
        .iter()
        .map(|entry| {
            let schema = match entry {
                SettingEntry::Element(e) => element_schema(e),
                SettingEntry::Group(g) => group_schema(g),
            };
            (entry.key().to_string(), schema)
        })
        .collect()
}

/// Replace `$defs.settings.properties` in the main schema document.
///
/// # Errors
///
/// Returns [`SchemaError::MissingDefinition`] if the document has no
/// `$defs.settings` object.
pub fn merge_settings(
    schema: &mut Value,
    properties: Map<String, Value>,
) -> Result<(), SchemaError> {
    let settings = schema
        .get_mut("$defs")
        .and_then(|defs| defs.get_mut("settings"))
        .and_then(Value::as_object_mut)
        .ok_or_else(|| SchemaError::MissingDefinition("$defs.settings".to_string()))?;
    settings.insert("properties".into(), Value::Object(properties));
    Ok(())
}

/// Copy the definitions the task schema shares with the main schema.
///
/// Definitions absent from the main schema are left untouched in the task
/// schema.
///
/// # Errors
///
/// Returns [`SchemaError::MissingDefinition`] if the task schema has no
/// `$defs` object.
pub fn sync_task_defs(main: &Value, task: &mut Value) -> Result<(), SchemaError> {
    let task_defs = task
        .get_mut("$defs")
        .and_then(Value::as_object_mut)
        .ok_or_else(|| SchemaError::MissingDefinition("$defs".to_string()))?;
    for name in SHARED_TASK_DEFS {
        if let Some(def) = main.get("$defs").and_then(|defs| defs.get(*name)) {
            task_defs.insert((*name).to_string(), def.clone());
        }
    }
    Ok(())
}

/// Build the standalone schema for early-init settings: top-level leaves
/// marked `rc = true`.
#[must_use]
pub fn rc_schema(entries: &[SettingEntry]) -> Value {
    let properties: Map<String, Value> = entries
        .iter()
        .filter_map(|entry| match entry {
            SettingEntry::Element(e) if e.rc => Some((e.key.clone(), element_schema(e))),
            _ => None,
        })
        .collect();
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "title": RC_SCHEMA_TITLE,
        "description": RC_SCHEMA_DESCRIPTION,
        "type": "object",
        "additionalProperties": false,
        "properties": properties,
    })
}

/// Member key relative to its group (`node.mirror_url` → `mirror_url`).
fn member_name<'a>(group: &SettingGroup, element: &'a SettingElement) -> &'a str {
    element
        .key
        .strip_prefix(group.key.as_str())
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(&element.key)
}
