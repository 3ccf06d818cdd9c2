//! Purge delivery configuration.

use std::time::Duration;

use url::Url;

use crate::config::PurgeSettings;

const DEFAULT_ENDPOINT: &str = "https://www.cloudflare.com/api_json.html";
const DEFAULT_ZONE: &str = "example.com";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Runtime configuration for the purge pipeline.
#[derive(Debug, Clone)]
pub struct PurgeConfig {
    /// CloudFlare purge API endpoint.
    pub endpoint: Url,
    /// Zone identifier sent with every purge request.
    pub zone: String,
    /// Master switch; a disabled pipeline publishes no purges.
    pub enabled: bool,
    /// Deliver purges on a spawned task instead of awaiting them inside
    /// the event hook.
    pub detached: bool,
    /// Outbound HTTP timeout.
    pub http_timeout: Duration,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            zone: DEFAULT_ZONE.to_string(),
            enabled: true,
            detached: true,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
        }
    }
}

impl From<&PurgeSettings> for PurgeConfig {
    fn from(settings: &PurgeSettings) -> Self {
        Self {
            endpoint: settings.endpoint.clone(),
            zone: settings.zone.clone(),
            enabled: settings.enabled,
            detached: settings.detached,
            http_timeout: settings.http_timeout,
        }
    }
}

impl PurgeConfig {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
