//! Purge request value object.

use url::Url;

/// Fixed action parameter of the CloudFlare file-purge call.
pub const PURGE_ACTION: &str = "zone_file_purge";

/// One outbound purge, synthesized per invalidation.
///
/// Lives for exactly one delivery attempt; never persisted.
#[derive(Debug, Clone)]
pub struct PurgeRequest {
    /// Hostname of the site whose cache is being cleared, for logging.
    pub hostname: String,
    /// URL to evict from the CDN cache.
    pub target: String,
    pub api_key: String,
    pub email: String,
    pub zone: String,
}

impl PurgeRequest {
    /// Render the request against the API endpoint.
    ///
    /// Any query string already present on the endpoint is replaced.
    pub fn to_url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        url.set_query(None);
        url.query_pairs_mut()
            .append_pair("tkn", &self.api_key)
            .append_pair("a", PURGE_ACTION)
            .append_pair("email", &self.email)
            .append_pair("z", &self.zone)
            .append_pair("url", &self.target);
        url
    }
}
