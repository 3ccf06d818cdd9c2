//! Event contexts the host hands to after-save and after-delete hooks.
//!
//! Contexts are owned and destroyed by the host's event dispatcher; hooks
//! only read them.

use std::fmt;

use crate::domain::content::{ContentObject, SaveOperation};

/// Identifier of a tenant site within the multi-site host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SiteId(String);

impl SiteId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SiteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Context for an object that was just persisted.
#[derive(Debug, Clone)]
pub struct SaveContext {
    pub site: SiteId,
    /// Hostname the site is served under, e.g. `news.example.org`.
    pub hostname: String,
    pub object: ContentObject,
    pub operation: SaveOperation,
    /// Validation errors accumulated by the persistence pipeline. A
    /// non-empty list means the save did not produce a clean object.
    pub validation_errors: Vec<String>,
}

impl SaveContext {
    pub fn is_create(&self) -> bool {
        matches!(self.operation, SaveOperation::Create)
    }

    pub fn is_clean(&self) -> bool {
        self.validation_errors.is_empty()
    }
}

/// Context for an object that was just removed.
#[derive(Debug, Clone)]
pub struct DeleteContext {
    pub site: SiteId,
    pub hostname: String,
    pub object: ContentObject,
}
