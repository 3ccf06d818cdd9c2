//! Per-site plugin settings as stored by the host.
//!
//! Settings are owned by the host's settings store. The plugin fetches them
//! on demand and never caches or mutates them, so a credential change takes
//! effect on the next content event.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use super::context::SiteId;

/// Settings namespace the CloudFlare credentials live under.
pub const CLOUDFLARE_NAMESPACE: &str = "cloudflare";

const API_KEY_SETTING: &str = "cloudflare_api_key";
const EMAIL_SETTING: &str = "cloudflare_email_address";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings store unavailable: {message}")]
    Unavailable { message: String },
    #[error("settings for site `{site}` are corrupt: {message}")]
    Corrupt { site: String, message: String },
}

impl SettingsError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn corrupt(site: &SiteId, message: impl Into<String>) -> Self {
        Self::Corrupt {
            site: site.as_str().to_string(),
            message: message.into(),
        }
    }
}

/// Read access to the host's per-site settings store.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Fetch the key-value settings for `site` under `namespace`.
    ///
    /// `Ok(None)` means the namespace was never configured for the site,
    /// which is not an error.
    async fn fetch(
        &self,
        site: &SiteId,
        namespace: &str,
    ) -> Result<Option<HashMap<String, String>>, SettingsError>;
}

/// Validated CloudFlare credentials for one site.
#[derive(Debug, Clone)]
pub struct CdnCredentials {
    pub api_key: String,
    pub email: String,
}

impl CdnCredentials {
    /// Extract credentials from a raw settings mapping.
    ///
    /// Returns `None` unless both the API key and the email address are
    /// present and non-empty. A purge request must never be built from a
    /// partial credential pair.
    pub fn from_settings(settings: &HashMap<String, String>) -> Option<Self> {
        let api_key = non_empty(settings.get(API_KEY_SETTING))?;
        let email = non_empty(settings.get(EMAIL_SETTING))?;
        Some(Self { api_key, email })
    }
}

fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}

/// In-memory settings store for embedding hosts and tests.
#[derive(Default)]
pub struct MemorySettingsStore {
    entries: RwLock<HashMap<(SiteId, String), HashMap<String, String>>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the settings for `site` under `namespace`.
    pub fn insert(&self, site: SiteId, namespace: &str, settings: HashMap<String, String>) {
        self.write_entries()
            .insert((site, namespace.to_string()), settings);
    }

    fn write_entries(
        &self,
    ) -> std::sync::RwLockWriteGuard<'_, HashMap<(SiteId, String), HashMap<String, String>>> {
        match self.entries.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    lock_kind = "rwlock.write",
                    result = "poisoned_recovered",
                    "Recovered from poisoned settings lock"
                );
                poisoned.into_inner()
            }
        }
    }

    fn read_entries(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<(SiteId, String), HashMap<String, String>>> {
        match self.entries.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                warn!(
                    lock_kind = "rwlock.read",
                    result = "poisoned_recovered",
                    "Recovered from poisoned settings lock"
                );
                poisoned.into_inner()
            }
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn fetch(
        &self,
        site: &SiteId,
        namespace: &str,
    ) -> Result<Option<HashMap<String, String>>, SettingsError> {
        let key = (site.clone(), namespace.to_string());
        Ok(self.read_entries().get(&key).cloned())
    }
}
