//! Content domain types shared across the plugin.

pub mod content;

pub use content::{ContentKind, ContentObject, SaveOperation};
