//! End-to-end purge flow against a local mock CloudFlare endpoint.
//!
//! Drives content events through the hook registry exactly as an embedding
//! host would, and asserts on the HTTP requests the mock endpoint receives.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};
use folata::CloudflarePlugin;
use folata::domain::content::{ContentKind, ContentObject, SaveOperation};
use folata::host::{
    DeleteContext, HookRegistry, MemorySettingsStore, SaveContext, SettingsError, SettingsStore,
    SiteId,
};
use folata::purge::{PURGE_ACTION, PurgeConfig};
use url::Url;

type QueryParams = HashMap<String, String>;

#[derive(Clone, Default)]
struct MockEndpoint {
    requests: Arc<Mutex<Vec<QueryParams>>>,
}

impl MockEndpoint {
    fn received(&self) -> Vec<QueryParams> {
        self.requests.lock().expect("mock lock").clone()
    }
}

async fn record(
    State(endpoint): State<MockEndpoint>,
    Query(params): Query<QueryParams>,
) -> StatusCode {
    endpoint.requests.lock().expect("mock lock").push(params);
    StatusCode::OK
}

async fn start_mock() -> (MockEndpoint, SocketAddr) {
    let endpoint = MockEndpoint::default();
    let app = Router::new()
        .route("/api_json.html", get(record))
        .with_state(endpoint.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("mock endpoint should bind");
    let addr = listener.local_addr().expect("mock endpoint address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock endpoint serve");
    });

    (endpoint, addr)
}

fn config_for(addr: SocketAddr) -> PurgeConfig {
    PurgeConfig {
        endpoint: Url::parse(&format!("http://{addr}/api_json.html")).expect("mock endpoint URL"),
        zone: "demo.example.org".to_string(),
        detached: false,
        http_timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

fn configured_store() -> Arc<MemorySettingsStore> {
    let store = MemorySettingsStore::new();
    store.insert(
        SiteId::new("global"),
        "cloudflare",
        HashMap::from([
            ("cloudflare_api_key".to_string(), "tok-123".to_string()),
            (
                "cloudflare_email_address".to_string(),
                "ops@example.org".to_string(),
            ),
        ]),
    );
    Arc::new(store)
}

fn registry_with(config: PurgeConfig, store: Arc<dyn SettingsStore>) -> HookRegistry {
    let plugin = CloudflarePlugin::new(config, store).expect("plugin should build");
    let mut registry = HookRegistry::new();
    plugin.register(&mut registry);
    registry
}

fn save_ctx(operation: SaveOperation, kind: ContentKind, url: &str, draft: bool) -> SaveContext {
    SaveContext {
        site: SiteId::new("global"),
        hostname: "demo.example.org".to_string(),
        object: ContentObject::new(kind, url, draft),
        operation,
        validation_errors: Vec::new(),
    }
}

fn delete_ctx(kind: ContentKind, url: &str, draft: bool) -> DeleteContext {
    DeleteContext {
        site: SiteId::new("global"),
        hostname: "demo.example.org".to_string(),
        object: ContentObject::new(kind, url, draft),
    }
}

#[tokio::test]
async fn update_of_published_page_purges_its_url() {
    let (endpoint, addr) = start_mock().await;
    let registry = registry_with(config_for(addr), configured_store());

    let ctx = save_ctx(SaveOperation::Update, ContentKind::Page, "/bar", false);
    registry.dispatch_after_save(&ctx).await;

    let received = endpoint.received();
    assert_eq!(received.len(), 1);

    let params = &received[0];
    assert_eq!(params.get("tkn").map(String::as_str), Some("tok-123"));
    assert_eq!(params.get("a").map(String::as_str), Some(PURGE_ACTION));
    assert_eq!(
        params.get("email").map(String::as_str),
        Some("ops@example.org")
    );
    assert_eq!(params.get("z").map(String::as_str), Some("demo.example.org"));
    assert_eq!(
        params.get("url").map(String::as_str),
        Some("demo.example.org/page/bar")
    );
}

#[tokio::test]
async fn create_of_published_article_purges_the_homepage() {
    let (endpoint, addr) = start_mock().await;
    let registry = registry_with(config_for(addr), configured_store());

    let ctx = save_ctx(SaveOperation::Create, ContentKind::Article, "/foo", false);
    registry.dispatch_after_save(&ctx).await;

    let received = endpoint.received();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0].get("url").map(String::as_str),
        Some("demo.example.org")
    );
}

#[tokio::test]
async fn delete_of_published_article_purges_its_url() {
    let (endpoint, addr) = start_mock().await;
    let registry = registry_with(config_for(addr), configured_store());

    registry
        .dispatch_after_delete(&delete_ctx(ContentKind::Article, "/baz", false))
        .await;

    let received = endpoint.received();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0].get("url").map(String::as_str),
        Some("demo.example.org/article/baz")
    );
}

#[tokio::test]
async fn drafts_and_invalid_saves_produce_no_requests() {
    let (endpoint, addr) = start_mock().await;
    let registry = registry_with(config_for(addr), configured_store());

    let draft_save = save_ctx(SaveOperation::Update, ContentKind::Article, "/foo", true);
    registry.dispatch_after_save(&draft_save).await;

    let mut invalid_save = save_ctx(SaveOperation::Create, ContentKind::Article, "/foo", false);
    invalid_save
        .validation_errors
        .push("headline too long".to_string());
    registry.dispatch_after_save(&invalid_save).await;

    registry
        .dispatch_after_delete(&delete_ctx(ContentKind::Page, "/foo", true))
        .await;

    assert!(endpoint.received().is_empty());
}

#[tokio::test]
async fn skipped_saves_never_touch_the_settings_store() {
    struct CountingStore {
        inner: Arc<MemorySettingsStore>,
        fetches: Arc<Mutex<usize>>,
    }

    #[async_trait]
    impl SettingsStore for CountingStore {
        async fn fetch(
            &self,
            site: &SiteId,
            namespace: &str,
        ) -> Result<Option<HashMap<String, String>>, SettingsError> {
            *self.fetches.lock().expect("fetch counter lock") += 1;
            self.inner.fetch(site, namespace).await
        }
    }

    let (_endpoint, addr) = start_mock().await;
    let fetches = Arc::new(Mutex::new(0));
    let store = Arc::new(CountingStore {
        inner: configured_store(),
        fetches: fetches.clone(),
    });
    let registry = registry_with(config_for(addr), store);

    let draft_save = save_ctx(SaveOperation::Update, ContentKind::Article, "/foo", true);
    registry.dispatch_after_save(&draft_save).await;

    assert_eq!(*fetches.lock().expect("fetch counter lock"), 0);
}

#[tokio::test]
async fn unconfigured_site_makes_no_request() {
    let (endpoint, addr) = start_mock().await;

    // No settings at all.
    let empty = Arc::new(MemorySettingsStore::new());
    let registry = registry_with(config_for(addr), empty);
    let ctx = save_ctx(SaveOperation::Update, ContentKind::Page, "/bar", false);
    registry.dispatch_after_save(&ctx).await;
    assert!(endpoint.received().is_empty());

    // API key present but email missing.
    let partial = MemorySettingsStore::new();
    partial.insert(
        SiteId::new("global"),
        "cloudflare",
        HashMap::from([("cloudflare_api_key".to_string(), "tok-123".to_string())]),
    );
    let registry = registry_with(config_for(addr), Arc::new(partial));
    registry.dispatch_after_save(&ctx).await;
    assert!(endpoint.received().is_empty());

    // Both present but empty strings.
    let blank = MemorySettingsStore::new();
    blank.insert(
        SiteId::new("global"),
        "cloudflare",
        HashMap::from([
            ("cloudflare_api_key".to_string(), String::new()),
            ("cloudflare_email_address".to_string(), String::new()),
        ]),
    );
    let registry = registry_with(config_for(addr), Arc::new(blank));
    registry.dispatch_after_save(&ctx).await;
    assert!(endpoint.received().is_empty());
}

#[tokio::test]
async fn transport_failure_is_absorbed() {
    // Bind to grab a free port, then drop the listener so connections are
    // refused.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("listener should bind");
    let addr = listener.local_addr().expect("listener address");
    drop(listener);

    let registry = registry_with(config_for(addr), configured_store());

    // The dispatch completes normally despite the unreachable endpoint.
    let ctx = save_ctx(SaveOperation::Update, ContentKind::Page, "/bar", false);
    registry.dispatch_after_save(&ctx).await;
    registry
        .dispatch_after_delete(&delete_ctx(ContentKind::Article, "/baz", false))
        .await;
}

#[tokio::test]
async fn repeated_saves_issue_independent_requests() {
    let (endpoint, addr) = start_mock().await;
    let registry = registry_with(config_for(addr), configured_store());

    let ctx = save_ctx(SaveOperation::Update, ContentKind::Page, "/bar", false);
    registry.dispatch_after_save(&ctx).await;
    registry.dispatch_after_save(&ctx).await;

    // No deduplication: same context twice means two purge attempts.
    assert_eq!(endpoint.received().len(), 2);
}

#[tokio::test]
async fn detached_dispatch_delivers_without_being_awaited() {
    let (endpoint, addr) = start_mock().await;
    let config = PurgeConfig {
        detached: true,
        ..config_for(addr)
    };
    let registry = registry_with(config, configured_store());

    let ctx = save_ctx(SaveOperation::Update, ContentKind::Page, "/bar", false);
    registry.dispatch_after_save(&ctx).await;

    // The hook returned before delivery; poll the mock until the spawned
    // request lands.
    for _ in 0..50 {
        if !endpoint.received().is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert_eq!(endpoint.received().len(), 1);
}
