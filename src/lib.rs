//! Folata: event-driven CloudFlare cache purging for publishing hosts.
//!
//! Folata attaches to a content-management host's after-save and
//! after-delete events for articles and pages, decides whether a CDN purge
//! is warranted, and delivers the purge request to the CloudFlare API.
//!
//! Purging is best-effort by design: a CDN outage must never block content
//! publishing, so every failure along the purge path ends at a log line and
//! a counter instead of propagating back into the host's save pipeline.
//!
//! ## Wiring
//!
//! ```ignore
//! let settings = folata::config::load(None)?;
//! folata::infra::telemetry::init(&settings.logging)?;
//!
//! let plugin = CloudflarePlugin::new((&settings.purge).into(), store)?;
//! plugin.register(&mut registry);
//! ```

pub mod config;
pub mod domain;
pub mod host;
pub mod infra;
pub mod plugin;
pub mod purge;

pub use plugin::CloudflarePlugin;
