//! Host collaborator surface.
//!
//! The embedding CMS owns event dispatch, settings storage, and plugin
//! lifecycle. This module models those collaborators as explicit traits and
//! values handed to the plugin at construction time, instead of an ambient
//! service bundle.

pub mod context;
pub mod lifecycle;
pub mod registry;
pub mod settings;
pub mod url;

pub use context::{DeleteContext, SaveContext, SiteId};
pub use lifecycle::{LifecycleContext, LifecycleError, PluginLifecycle};
pub use registry::{AfterDeleteHook, AfterSaveHook, HookRegistry};
pub use settings::{
    CLOUDFLARE_NAMESPACE, CdnCredentials, MemorySettingsStore, SettingsError, SettingsStore,
};
pub use url::url_join;
