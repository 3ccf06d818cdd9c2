//! Content objects as the host hands them to plugin hooks.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

/// Content kinds routed to the purge hooks.
///
/// Registration is per kind; objects from other collections never reach
/// this plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Article,
    Page,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Page => "page",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a save created the object or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOperation {
    Create,
    Update,
}

/// A persisted content object as seen by the hooks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentObject {
    /// Collection the object belongs to.
    #[serde(rename = "object_type")]
    pub kind: ContentKind,
    /// Site-relative URL of the object, e.g. `/2026/hello-world`.
    pub url: String,
    /// Draft state. Hosts encode this loosely on the wire (`0`, `"1"`,
    /// booleans); the deserializer normalizes those at the boundary so the
    /// rest of the plugin only sees a `bool`.
    #[serde(deserialize_with = "deserialize_draft")]
    pub draft: bool,
}

impl ContentObject {
    pub fn new(kind: ContentKind, url: impl Into<String>, draft: bool) -> Self {
        Self {
            kind,
            url: url.into(),
            draft,
        }
    }

    /// Only published objects have cache entries worth purging.
    pub fn is_published(&self) -> bool {
        !self.draft
    }
}

fn deserialize_draft<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct DraftVisitor;

    impl de::Visitor<'_> for DraftVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean, an integer, or a numeric string")
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<bool, E> {
            Ok(value != 0)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
            Ok(value != 0)
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<bool, E> {
            Ok(value != 0.0)
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<bool, E> {
            match value.trim() {
                "" | "false" => Ok(false),
                "true" => Ok(true),
                other => other
                    .parse::<i64>()
                    .map(|n| n != 0)
                    .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self)),
            }
        }
    }

    deserializer.deserialize_any(DraftVisitor)
}
