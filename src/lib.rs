//! Documentation data generator for mise.
//!
//! Normalizes the hand-maintained tool registry and settings catalog into
//! the JSON, Markdown and JSON-Schema artifacts the documentation site
//! renders, and scrapes the `mise` binary for shell-completion suggestions.
//!
//! The public API is organised into layers:
//!
//! - **[`config`]**: source locations, TOML/JSON loading, data validators
//! - **[`registry`]**: backend descriptors, URL resolution, tool records
//! - **[`settings`]**: type mapping, defaults, JSON-Schema rendering
//! - **[`suggest`]**: completion generators over an [`exec::Executor`]
//! - **[`commands`]**: top-level subcommand orchestration
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod collate;
pub mod commands;
pub mod config;
pub mod error;
pub mod exec;
pub mod logging;
pub mod registry;
pub mod settings;
pub mod suggest;
