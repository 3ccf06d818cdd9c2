//! Plugin lifecycle hooks exposed to the host.
//!
//! The host drives install, uninstall, startup, and shutdown. Each hook
//! reports `true` on success; hosts treat `false` or an error as a failed
//! step.

use async_trait::async_trait;
use thiserror::Error;

use super::context::SiteId;

/// Context handed to the site-scoped lifecycle hooks.
#[derive(Debug, Clone)]
pub struct LifecycleContext {
    /// Site the operation is scoped to.
    pub site: SiteId,
}

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("lifecycle step failed: {message}")]
    Failed { message: String },
}

impl LifecycleError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }
}

#[async_trait]
pub trait PluginLifecycle: Send + Sync {
    /// Called when the plugin is installed for the first time.
    async fn on_install(&self) -> Result<bool, LifecycleError>;

    /// Called when the host uninstalls the plugin from a site.
    async fn on_uninstall(&self, ctx: &LifecycleContext) -> Result<bool, LifecycleError>;

    /// Called when the host starts up, and at the end of a successful
    /// install. Core host services are available at this point.
    async fn on_startup(&self, ctx: &LifecycleContext) -> Result<bool, LifecycleError>;

    /// Called on graceful shutdown. No time guarantees are provided.
    async fn on_shutdown(&self) -> Result<bool, LifecycleError>;
}
