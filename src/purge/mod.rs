//! Purge pipeline.
//!
//! Content events flow in through [`PurgeTrigger`], which decides whether a
//! purge is warranted and which URL to clear, then hands the work to
//! [`PurgeClient`] for delivery to the CloudFlare API.
//!
//! ## Configuration
//!
//! Delivery behavior is controlled via `folata.toml`:
//!
//! ```toml
//! [purge]
//! zone = "news.example.org"
//! detached = true
//! # ... see config.rs for all options
//! ```

mod client;
mod config;
mod request;
mod trigger;

pub use client::{ClientBuildError, PurgeClient};
pub use config::PurgeConfig;
pub use request::{PURGE_ACTION, PurgeRequest};
pub use trigger::PurgeTrigger;
