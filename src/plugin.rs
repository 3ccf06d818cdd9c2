//! Plugin wiring for the embedding host.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::content::ContentKind;
use crate::host::lifecycle::{LifecycleContext, LifecycleError, PluginLifecycle};
use crate::host::registry::HookRegistry;
use crate::host::settings::SettingsStore;
use crate::purge::{ClientBuildError, PurgeClient, PurgeConfig, PurgeTrigger};

/// The CloudFlare purge plugin.
///
/// Construction builds the purge client and trigger; [`register`] attaches
/// the trigger to article and page lifecycle events. The plugin keeps no
/// state of its own beyond the shared trigger, so install and uninstall
/// have nothing to set up or tear down.
///
/// [`register`]: CloudflarePlugin::register
pub struct CloudflarePlugin {
    trigger: Arc<PurgeTrigger>,
}

impl CloudflarePlugin {
    /// Handle the host registers this service under. Must not collide with
    /// other plugin services.
    pub const NAME: &'static str = "CloudflarePurge";

    pub fn new(
        config: PurgeConfig,
        store: Arc<dyn SettingsStore>,
    ) -> Result<Self, ClientBuildError> {
        let client = Arc::new(PurgeClient::new(config.clone(), store)?);
        let trigger = Arc::new(PurgeTrigger::new(config, client));
        Ok(Self { trigger })
    }

    /// Attach purge hooks for every content kind the plugin watches.
    pub fn register(&self, registry: &mut HookRegistry) {
        for kind in [ContentKind::Article, ContentKind::Page] {
            registry.on_after_save(kind, self.trigger.clone());
            registry.on_after_delete(kind, self.trigger.clone());
        }
    }

    /// Called once while the host assembles its service table.
    pub fn init(&self) {
        debug!(service = Self::NAME, "Initialized");
    }
}

#[async_trait]
impl PluginLifecycle for CloudflarePlugin {
    async fn on_install(&self) -> Result<bool, LifecycleError> {
        Ok(true)
    }

    async fn on_uninstall(&self, ctx: &LifecycleContext) -> Result<bool, LifecycleError> {
        // Credentials live in the host's settings store; nothing of ours
        // to remove per site.
        debug!(site = %ctx.site, "Uninstall requested");
        Ok(true)
    }

    async fn on_startup(&self, _ctx: &LifecycleContext) -> Result<bool, LifecycleError> {
        Ok(true)
    }

    async fn on_shutdown(&self) -> Result<bool, LifecycleError> {
        Ok(true)
    }
}
