//! Typed hook registration for content lifecycle events.
//!
//! Replaces string-built event names with a registration table keyed by
//! content kind. Handlers are invoked in registration order and are treated
//! as infallible by the dispatcher, so a misbehaving hook cannot fail the
//! host's save or delete pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::content::ContentKind;

use super::context::{DeleteContext, SaveContext};

/// Handler invoked after an object is persisted.
///
/// Implementations must absorb their own failures.
#[async_trait]
pub trait AfterSaveHook: Send + Sync {
    async fn after_save(&self, ctx: &SaveContext);
}

/// Handler invoked after an object is deleted.
#[async_trait]
pub trait AfterDeleteHook: Send + Sync {
    async fn after_delete(&self, ctx: &DeleteContext);
}

/// Registration table mapping content kinds to lifecycle handlers.
#[derive(Default)]
pub struct HookRegistry {
    save_hooks: Vec<(ContentKind, Arc<dyn AfterSaveHook>)>,
    delete_hooks: Vec<(ContentKind, Arc<dyn AfterDeleteHook>)>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_after_save(&mut self, kind: ContentKind, hook: Arc<dyn AfterSaveHook>) {
        debug!(content_kind = %kind, hook = "after_save", "Hook registered");
        self.save_hooks.push((kind, hook));
    }

    pub fn on_after_delete(&mut self, kind: ContentKind, hook: Arc<dyn AfterDeleteHook>) {
        debug!(content_kind = %kind, hook = "after_delete", "Hook registered");
        self.delete_hooks.push((kind, hook));
    }

    /// Invoke every after-save handler registered for the object's kind.
    pub async fn dispatch_after_save(&self, ctx: &SaveContext) {
        for (kind, hook) in &self.save_hooks {
            if *kind == ctx.object.kind {
                hook.after_save(ctx).await;
            }
        }
    }

    /// Invoke every after-delete handler registered for the object's kind.
    pub async fn dispatch_after_delete(&self, ctx: &DeleteContext) {
        for (kind, hook) in &self.delete_hooks {
            if *kind == ctx.object.kind {
                hook.after_delete(ctx).await;
            }
        }
    }

    pub fn save_hook_count(&self) -> usize {
        self.save_hooks.len()
    }

    pub fn delete_hook_count(&self) -> usize {
        self.delete_hooks.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::domain::content::{ContentObject, SaveOperation};
    use crate::host::context::SiteId;

    #[derive(Default)]
    struct RecordingHook {
        saves: AtomicUsize,
        deletes: AtomicUsize,
    }

    #[async_trait]
    impl AfterSaveHook for RecordingHook {
        async fn after_save(&self, _ctx: &SaveContext) {
            self.saves.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl AfterDeleteHook for RecordingHook {
        async fn after_delete(&self, _ctx: &DeleteContext) {
            self.deletes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn save_ctx(kind: ContentKind) -> SaveContext {
        SaveContext {
            site: SiteId::new("global"),
            hostname: "demo.example.org".to_string(),
            object: ContentObject::new(kind, "/x", false),
            operation: SaveOperation::Update,
            validation_errors: Vec::new(),
        }
    }

    #[tokio::test]
    async fn dispatch_routes_by_content_kind() {
        let article_hook = Arc::new(RecordingHook::default());
        let page_hook = Arc::new(RecordingHook::default());

        let mut registry = HookRegistry::new();
        registry.on_after_save(ContentKind::Article, article_hook.clone());
        registry.on_after_save(ContentKind::Page, page_hook.clone());

        registry.dispatch_after_save(&save_ctx(ContentKind::Article)).await;
        registry.dispatch_after_save(&save_ctx(ContentKind::Article)).await;
        registry.dispatch_after_save(&save_ctx(ContentKind::Page)).await;

        assert_eq!(article_hook.saves.load(Ordering::SeqCst), 2);
        assert_eq!(page_hook.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn one_hook_may_watch_multiple_kinds() {
        let hook = Arc::new(RecordingHook::default());

        let mut registry = HookRegistry::new();
        for kind in [ContentKind::Article, ContentKind::Page] {
            registry.on_after_save(kind, hook.clone());
            registry.on_after_delete(kind, hook.clone());
        }
        assert_eq!(registry.save_hook_count(), 2);
        assert_eq!(registry.delete_hook_count(), 2);

        registry.dispatch_after_save(&save_ctx(ContentKind::Page)).await;
        let delete = DeleteContext {
            site: SiteId::new("global"),
            hostname: "demo.example.org".to_string(),
            object: ContentObject::new(ContentKind::Article, "/x", false),
        };
        registry.dispatch_after_delete(&delete).await;

        assert_eq!(hook.saves.load(Ordering::SeqCst), 1);
        assert_eq!(hook.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn dispatch_with_no_matching_hook_is_a_no_op() {
        let registry = HookRegistry::new();
        registry.dispatch_after_save(&save_ctx(ContentKind::Article)).await;
    }
}
