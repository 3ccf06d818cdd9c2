//! Purge delivery to the CloudFlare API.

use std::sync::Arc;

use metrics::counter;
use reqwest::Client;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::host::context::SiteId;
use crate::host::settings::{CLOUDFLARE_NAMESPACE, CdnCredentials, SettingsStore};

use super::config::PurgeConfig;
use super::request::PurgeRequest;

const METRIC_PURGE_REQUEST_TOTAL: &str = "folata_purge_request_total";
const METRIC_PURGE_SKIPPED_TOTAL: &str = "folata_purge_skipped_total";
const METRIC_PURGE_ERROR_TOTAL: &str = "folata_purge_error_total";

/// Failure to construct the underlying HTTP client.
#[derive(Debug, Error)]
#[error("failed to build purge HTTP client: {0}")]
pub struct ClientBuildError(#[from] reqwest::Error);

/// Sends purge requests to the CloudFlare API.
///
/// Delivery is best-effort: missing configuration, store failures,
/// transport failures, and every response status all end at a log line and
/// a counter. Nothing is returned to the caller, so the content pipeline
/// can never be blocked from here.
pub struct PurgeClient {
    config: PurgeConfig,
    store: Arc<dyn SettingsStore>,
    http: Client,
}

impl PurgeClient {
    pub fn new(
        config: PurgeConfig,
        store: Arc<dyn SettingsStore>,
    ) -> Result<Self, ClientBuildError> {
        let http = Client::builder()
            .user_agent(concat!("folata/", env!("CARGO_PKG_VERSION")))
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            config,
            store,
            http,
        })
    }

    /// Purge `target` for `site`, resolving credentials from the settings
    /// store on every call so credential changes apply immediately.
    pub async fn purge(&self, site: &SiteId, hostname: &str, target: &str) {
        let settings = match self.store.fetch(site, CLOUDFLARE_NAMESPACE).await {
            Ok(settings) => settings,
            Err(err) => {
                error!(site = %site, error = %err, "Failed to load CloudFlare settings");
                counter!(METRIC_PURGE_ERROR_TOTAL, "reason" => "settings_fetch").increment(1);
                return;
            }
        };

        // Sites that never configured the integration must not error on
        // every content change.
        let Some(credentials) = settings.as_ref().and_then(CdnCredentials::from_settings) else {
            warn!(site = %site, "CloudFlare settings have not been initialized");
            counter!(METRIC_PURGE_SKIPPED_TOTAL, "reason" => "unconfigured").increment(1);
            return;
        };

        let request = PurgeRequest {
            hostname: hostname.to_string(),
            target: target.to_string(),
            api_key: credentials.api_key,
            email: credentials.email,
            zone: self.config.zone.clone(),
        };

        self.send(request).await;
    }

    async fn send(&self, request: PurgeRequest) {
        let url = request.to_url(&self.config.endpoint);
        counter!(METRIC_PURGE_REQUEST_TOTAL).increment(1);

        match self.http.get(url).send().await {
            Ok(response) => {
                // Any status is merely recorded; the API's success
                // semantics are not inspected.
                info!(
                    hostname = %request.hostname,
                    target = %request.target,
                    status = response.status().as_u16(),
                    "CloudFlare API response"
                );
            }
            Err(err) => {
                error!(
                    hostname = %request.hostname,
                    target = %request.target,
                    error = %err,
                    "CloudFlare API request failed"
                );
                counter!(METRIC_PURGE_ERROR_TOTAL, "reason" => "transport").increment(1);
            }
        }
    }
}
