//! Purge trigger hooks.
//!
//! Decides, per content event, whether a purge is warranted and which URL
//! to clear, then hands delivery to the purge client. Hook methods never
//! fail from the host's perspective.

use std::sync::Arc;

use async_trait::async_trait;
use metrics::counter;
use tracing::{debug, info};

use crate::host::context::{DeleteContext, SaveContext, SiteId};
use crate::host::registry::{AfterDeleteHook, AfterSaveHook};
use crate::host::url::url_join;

use super::client::PurgeClient;
use super::config::PurgeConfig;

const METRIC_PURGE_DISPATCH_TOTAL: &str = "folata_purge_dispatch_total";

/// Invalidation trigger for article and page lifecycle events.
pub struct PurgeTrigger {
    config: PurgeConfig,
    client: Arc<PurgeClient>,
}

impl PurgeTrigger {
    pub fn new(config: PurgeConfig, client: Arc<PurgeClient>) -> Self {
        Self { config, client }
    }

    /// Hand one purge target to the client.
    ///
    /// Detached dispatch spawns the delivery so the caller's event
    /// completes independently of purge outcome; nothing downstream ever
    /// depends on completion.
    async fn dispatch(&self, site: &SiteId, hostname: &str, target: String) {
        counter!(METRIC_PURGE_DISPATCH_TOTAL).increment(1);

        if self.config.detached {
            let client = Arc::clone(&self.client);
            let site = site.clone();
            let hostname = hostname.to_string();
            tokio::spawn(async move {
                client.purge(&site, &hostname, &target).await;
            });
        } else {
            self.client.purge(site, hostname, &target).await;
        }
    }
}

/// Purge target for a save event, or `None` when no purge is warranted.
///
/// A creation invalidates the homepage listing rather than the object's
/// own URL, since the new item changes what the homepage shows.
fn save_target(ctx: &SaveContext) -> Option<String> {
    if !ctx.is_clean() || !ctx.object.is_published() {
        return None;
    }

    if ctx.is_create() {
        Some(ctx.hostname.clone())
    } else {
        Some(object_url(ctx.hostname.as_str(), ctx))
    }
}

/// Purge target for a delete event, or `None` for drafts.
fn delete_target(ctx: &DeleteContext) -> Option<String> {
    if !ctx.object.is_published() {
        return None;
    }
    Some(url_join(
        &ctx.hostname,
        &[ctx.object.kind.as_str(), &ctx.object.url],
    ))
}

fn object_url(hostname: &str, ctx: &SaveContext) -> String {
    url_join(hostname, &[ctx.object.kind.as_str(), &ctx.object.url])
}

#[async_trait]
impl AfterSaveHook for PurgeTrigger {
    async fn after_save(&self, ctx: &SaveContext) {
        if !self.config.is_enabled() {
            debug!(kind = %ctx.object.kind, "Purge skipped: purging disabled");
            return;
        }

        let Some(target) = save_target(ctx) else {
            return;
        };

        let url = object_url(&ctx.hostname, ctx);
        if ctx.is_create() {
            info!(
                kind = %ctx.object.kind,
                url = %url,
                "New object created, clearing cache for homepage"
            );
        } else {
            info!(kind = %ctx.object.kind, url = %url, "Clearing cache");
        }

        self.dispatch(&ctx.site, &ctx.hostname, target).await;
    }
}

#[async_trait]
impl AfterDeleteHook for PurgeTrigger {
    async fn after_delete(&self, ctx: &DeleteContext) {
        if !self.config.is_enabled() {
            debug!(kind = %ctx.object.kind, "Purge skipped: purging disabled");
            return;
        }

        let Some(target) = delete_target(ctx) else {
            return;
        };

        info!(kind = %ctx.object.kind, url = %target, "Clearing cache for deleted object");
        self.dispatch(&ctx.site, &ctx.hostname, target).await;
    }
}
