//! Tool registry normalization.
//!
//! Registry data is user-authored, so every stage here is permissive: an
//! unparseable descriptor or unknown backend still yields a record, and
//! only unreadable files fail a load.
pub mod identifier;
pub mod load;
pub mod table;
pub mod tool;
pub mod url;

pub use identifier::BackendSpec;
pub use load::load;
pub use tool::{BackendEntry, BackendLink, StructuredBackend, ToolRecord, ToolSource};
pub use url::{BackendKind, resolve};
