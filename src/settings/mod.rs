//! Settings schema normalization.
//!
//! Unlike the registry, the settings source is maintained alongside the
//! code, so authoring errors fail the load instead of degrading.
pub mod element;
pub mod load;
pub mod schema;
pub mod source;
pub mod types;

pub use element::{DefaultValue, EnvBinding, EnvParse, SettingElement, SettingEntry, SettingGroup};
pub use load::{build_entries, load, visible};
pub use source::{Deprecation, EnumItem, GroupSource, SettingSource};
pub use types::{RenderType, SettingType};
