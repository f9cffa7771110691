//! Settings schema loading.
use std::path::Path;

use super::element::{SettingElement, SettingEntry, SettingGroup, invalid};
use super::source::{Deprecation, GroupSource};
use crate::collate;
use crate::config::toml_loader;
use crate::error::{DocgenError, SchemaError};

/// Load the settings schema at `path`, sorted by key.
///
/// # Errors
///
/// Returns a [`DocgenError::Load`] if the file cannot be read or parsed and
/// a [`DocgenError::Schema`] for any authoring error in the schema.
pub fn load(path: &Path) -> Result<Vec<SettingEntry>, DocgenError> {
    let doc = toml_loader::load_table(path)?;
    Ok(build_entries(&doc)?)
}

/// Build every entry of a parsed settings document, sorted by key.
///
/// A top-level table with a `type` field is a leaf; any other table is a
/// group whose table-valued children are its member settings.
///
/// # Errors
///
/// Returns the first authoring error encountered.
pub fn build_entries(doc: &toml::Table) -> Result<Vec<SettingEntry>, SchemaError> {
    let mut entries = doc
        .iter()
        .map(|(key, value)| {
            let props = value
                .as_table()
                .ok_or_else(|| invalid(key, "expected a table"))?;
            if props.contains_key("type") {
                SettingElement::build(key, props).map(SettingEntry::Element)
            } else {
                build_group(key, props).map(SettingEntry::Group)
            }
        })
        .collect::<Result<Vec<_>, _>>()?;
    collate::sort_by_key(&mut entries, SettingEntry::key);
    Ok(entries)
}

fn build_group(key: &str, props: &toml::Table) -> Result<SettingGroup, SchemaError> {
    let source = GroupSource::from_table(key, props)?;
    let mut group = SettingGroup::new(key);
    group.description = source.description;
    group.deprecated = source.deprecated.as_ref().is_some_and(Deprecation::is_set);
    group.hide = source.hide;
    group.settings = source
        .members
        .iter()
        .map(|(subkey, value)| {
            let dotted = format!("{key}.{subkey}");
            let member = value
                .as_table()
                .ok_or_else(|| invalid(&dotted, "expected a table"))?;
            SettingElement::build(&dotted, member)
        })
        .collect::<Result<_, _>>()?;
    Ok(group)
}

/// Drop hidden settings (and hidden or emptied groups) for the
/// documentation listing.
#[must_use]
pub fn visible(entries: Vec<SettingEntry>) -> Vec<SettingEntry> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            SettingEntry::Element(e) if e.hide => None,
            SettingEntry::Element(e) => Some(SettingEntry::Element(e)),
            SettingEntry::Group(g) if g.hide => None,
            SettingEntry::Group(mut g) => {
                g.settings.retain(|s| !s.hide);
                (!g.settings.is_empty()).then_some(SettingEntry::Group(g))
            }
        })
        .collect()
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

    fn entries(src: &str) -> Result<Vec<SettingEntry>, SchemaError> {
        build_entries(&src.parse::<toml::Table>().unwrap())
    }

    const SAMPLE: &str = r#"
[verbose]
type = "Bool"
description = "Show more output"

[node]
description = "Node settings"

[node.mirror_url]
type = "Url"
optional = true
description = "Mirror to download node from"

[node.compile]
type = "Bool"
description = "Compile from source"

[aqua]
[aqua.cosign]
type = "Bool"
default = true
description = "Verify with cosign"

[all_compile]
type = "Bool"
description = "Compile everything"
"#;

    #[test]
    fn entries_sorted_by_key() {
        let list = entries(SAMPLE).unwrap();
        let keys: Vec<&str> = list.iter().map(SettingEntry::key).collect();
        assert_eq!(keys, vec!["all_compile", "aqua", "node", "verbose"]);
    }

    #[test]
    fn groups_keep_member_order_and_dotted_keys() {
        let list = entries(SAMPLE).unwrap();
        let SettingEntry::Group(node) = &list[2] else {
            panic!("node should be a group");
        };
        assert_eq!(node.description.as_deref(), Some("Node settings"));
        let keys: Vec<&str> = node.settings.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["node.mirror_url", "node.compile"]);
        assert!(!node.additional_properties());
    }

    #[test]
    fn unknown_type_in_group_fails_the_load() {
        let err = entries("[status]\n[status.color]\ntype = \"Frobnicate\"\ndescription = \"d\"\n")
            .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownType { ref key, .. } if key == "status.color"));
    }

    #[test]
    fn scalar_top_level_value_is_invalid() {
        assert!(matches!(
            entries("jobs = 4\n").unwrap_err(),
            SchemaError::InvalidEntry { .. }
        ));
    }

    #[test]
    fn scalar_group_member_is_invalid() {
        assert!(matches!(
            entries("[node]\nflavor = \"x\"\n").unwrap_err(),
            SchemaError::InvalidEntry { ref key, .. } if key == "node.flavor"
        ));
    }

    #[test]
    fn mistyped_group_member_field_fails_the_load() {
        let err = entries(
            "[node]\n[node.flavor]\ntype = \"String\"\ndescription = \"d\"\nhide = \"yes\"\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaError::InvalidEntry { ref key, .. } if key == "node.flavor"
        ));
    }

    #[test]
    fn visible_drops_hidden_settings_and_empty_groups() {
        let list = entries(
            r#"
[shown]
type = "Bool"
description = "d"

[secret]
type = "Bool"
description = "d"
hide = true

[grp]
[grp.a]
type = "String"
description = "d"
hide = true

[grp2]
[grp2.a]
type = "String"
description = "d"
[grp2.b]
type = "String"
description = "d"
hide = true
"#,
        )
        .unwrap();
        let shown = visible(list);
        let keys: Vec<&str> = shown.iter().map(SettingEntry::key).collect();
        assert_eq!(keys, vec!["grp2", "shown"]);
        assert_eq!(shown[0].elements().len(), 1);
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        assert_eq!(load(&path).unwrap().len(), 4);
    }

    #[test]
    fn load_surfaces_schema_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "[x]\ntype = \"String\"\n").unwrap();
        assert!(matches!(load(&path).unwrap_err(), DocgenError::Schema(_)));
    }
}
