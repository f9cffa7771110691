#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for the `settings` and `schema` commands.
//!
//! These tests run both commands over isolated temporary roots, verifying
//! that:
//! - documentation data is sorted, hidden settings are dropped, and
//!   defaults are computed for display
//! - the JSON schema keeps hidden settings and only authored defaults
//! - the early-init schema carries only `rc` settings
//! - authoring errors abort the command

mod common;

use docgen::cli::OutputOpts;
use docgen::commands;
use docgen::logging::Logger;
use serde_json::json;

const SETTINGS: &str = r#"
[verbose]
type = "Bool"
description = "Show more output"
env = "MISE_VERBOSE"
rc = true

[node]
description = "Node settings"

[node.mirror_url]
type = "Option<Url>"
description = "Mirror to download node from"
env = "MISE_NODE_MIRROR_URL"

[node.flavor]
type = "String"
description = "Flavor"
hide = true

[disable_tools]
type = "SetString"
description = "Tools to disable"
env = "MISE_DISABLE_TOOLS"
parse_env = "list_by_comma"

[cache_dir]
type = "PathBuf"
default = "/tmp/cache"
docs_default = "~/.cache/mise"
description = "Cache directory"
docs = "Where mise keeps **downloads**."

[status]
[status.show_env]
type = "String"
description = "Show env"
enum = [["always", "Always"], { value = "never", description = "Never" }]
"#;

fn settings_data(ctx: &common::IntegrationTestContext) -> serde_json::Value {
    let opts = OutputOpts {
        output: Some(ctx.out("settings.json")),
    };
    commands::settings::run(&ctx.global(), &opts, &Logger::new()).unwrap();
    ctx.read_json("out/settings.json")
}

// ---------------------------------------------------------------------------
// settings
// ---------------------------------------------------------------------------

/// Entries are sorted and groups keep their members in authored order.
#[test]
fn settings_are_sorted() {
    let ctx = common::TestContextBuilder::new()
        .with_settings(SETTINGS)
        .build();
    let data = settings_data(&ctx);
    let keys: Vec<&str> = data
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["key"].as_str().unwrap())
        .collect();
    assert_eq!(
        keys,
        vec!["cache_dir", "disable_tools", "node", "status", "verbose"]
    );
}

/// Display defaults follow the documented precedence.
#[test]
fn display_defaults() {
    let ctx = common::TestContextBuilder::new()
        .with_settings(SETTINGS)
        .build();
    let data = settings_data(&ctx);

    let cache_dir = &data[0];
    assert_eq!(cache_dir["default"], "~/.cache/mise");
    assert_eq!(cache_dir["optional"], false);
    assert_eq!(cache_dir["docs"], "Where mise keeps **downloads**.");

    let disable_tools = &data[1];
    assert_eq!(disable_tools["type"], "string[]");
    assert_eq!(disable_tools["default"], json!([]));
    assert_eq!(disable_tools["items"], json!({ "type": "string" }));
    assert_eq!(
        disable_tools["env"],
        json!({ "name": "MISE_DISABLE_TOOLS", "parse": "comma" })
    );

    let verbose = &data[4];
    assert_eq!(verbose["default"], false);
}

/// Hidden members are dropped from their group.
#[test]
fn hidden_settings_are_dropped() {
    let ctx = common::TestContextBuilder::new()
        .with_settings(SETTINGS)
        .build();
    let data = settings_data(&ctx);
    let node = &data[2];
    assert_eq!(node["description"], "Node settings");
    assert_eq!(node["additionalProperties"], false);
    let members = node["settings"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["key"], "node.mirror_url");
    assert_eq!(members[0]["default"], "None");
    assert_eq!(members[0]["optional"], true);
}

/// Enum pairs and tables collapse to their values.
#[test]
fn enum_values_are_extracted() {
    let ctx = common::TestContextBuilder::new()
        .with_settings(SETTINGS)
        .build();
    let data = settings_data(&ctx);
    assert_eq!(
        data[3]["settings"][0]["enum"],
        json!(["always", "never"])
    );
}

/// An unknown type fails the whole command.
#[test]
fn unknown_type_aborts() {
    let ctx = common::TestContextBuilder::new()
        .with_settings("[x]\ntype = \"Vec<u8>\"\ndescription = \"d\"\n")
        .build();
    let opts = OutputOpts {
        output: Some(ctx.out("settings.json")),
    };
    let err = commands::settings::run(&ctx.global(), &opts, &Logger::new()).unwrap_err();
    assert!(format!("{err:#}").contains("Vec<u8>"));
    assert!(!ctx.out("settings.json").exists());
}

// ---------------------------------------------------------------------------
// schema
// ---------------------------------------------------------------------------

/// The main schema gets every setting, hidden ones included, with only
/// authored defaults.
#[test]
fn schema_merges_settings() {
    let ctx = common::TestContextBuilder::new()
        .with_settings(SETTINGS)
        .build();
    commands::schema::run(&ctx.global(), &Logger::new()).unwrap();

    let main = ctx.read_json("schema/mise.json");
    let settings = &main["$defs"]["settings"];
    assert_eq!(settings["additionalProperties"], false);
    let props = &settings["properties"];
    assert_eq!(props["cache_dir"]["default"], "/tmp/cache");
    assert!(props["verbose"].get("default").is_none());
    assert_eq!(props["disable_tools"]["type"], "array");
    assert_eq!(props["node"]["properties"]["flavor"]["type"], "string");
    assert_eq!(
        props["status"]["properties"]["show_env"]["enum"],
        json!(["always", "never"])
    );
}

/// The task schema mirrors shared definitions when present.
#[test]
fn schema_syncs_task_definitions() {
    let ctx = common::TestContextBuilder::new()
        .with_settings(SETTINGS)
        .with_file("schema/mise-task.json", "{\"$defs\": {\"task\": {}}}")
        .build();
    commands::schema::run(&ctx.global(), &Logger::new()).unwrap();

    let task = ctx.read_json("schema/mise-task.json");
    assert_eq!(task["$defs"]["task"], json!({ "type": "object" }));
    assert_eq!(task["$defs"]["env"], json!({ "type": "object" }));
}

/// The early-init schema carries only `rc` settings.
#[test]
fn rc_schema_is_written() {
    let ctx = common::TestContextBuilder::new()
        .with_settings(SETTINGS)
        .build();
    commands::schema::run(&ctx.global(), &Logger::new()).unwrap();

    let rc = ctx.read_json("schema/miserc.json");
    assert_eq!(rc["additionalProperties"], false);
    assert_eq!(
        rc["properties"],
        json!({ "verbose": { "type": "boolean", "description": "Show more output" } })
    );
}

/// The schema command requires the main schema file.
#[test]
fn schema_requires_main_schema() {
    let ctx = common::TestContextBuilder::new()
        .with_settings(SETTINGS)
        .build();
    std::fs::remove_file(ctx.root_path().join("schema/mise.json")).unwrap();
    assert!(commands::schema::run(&ctx.global(), &Logger::new()).is_err());
}
