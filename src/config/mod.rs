//! Configuration layer: typed settings with layered precedence (file → env).

use std::{path::Path, str::FromStr, time::Duration};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "folata";
const DEFAULT_PURGE_ENDPOINT: &str = "https://www.cloudflare.com/api_json.html";
const DEFAULT_PURGE_ZONE: &str = "example.com";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Fully-resolved plugin settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub purge: PurgeSettings,
    pub logging: LoggingSettings,
}

/// Purge delivery settings.
#[derive(Debug, Clone)]
pub struct PurgeSettings {
    /// CloudFlare purge API endpoint.
    pub endpoint: Url,
    /// Zone identifier sent with every purge request.
    pub zone: String,
    /// Master switch; disabled plugins publish no purges at all.
    pub enabled: bool,
    /// Detached dispatch: deliver purges on a spawned task instead of
    /// awaiting them inside the event hook.
    pub detached: bool,
    /// Outbound HTTP timeout.
    pub http_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment).
///
/// `config_file` points at an explicit configuration file supplied by the
/// embedding host; the `config/default` and `folata` basenames are always
/// consulted first when present.
pub fn load(config_file: Option<&Path>) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = config_file {
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("FOLATA").separator("__"));

    let raw: RawSettings = builder.build()?.try_deserialize()?;
    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    purge: RawPurgeSettings,
    logging: RawLoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawPurgeSettings {
    endpoint: Option<String>,
    zone: Option<String>,
    enabled: Option<bool>,
    detached: Option<bool>,
    http_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings { purge, logging } = raw;

        Ok(Self {
            purge: build_purge_settings(purge)?,
            logging: build_logging_settings(logging)?,
        })
    }
}

fn build_purge_settings(purge: RawPurgeSettings) -> Result<PurgeSettings, LoadError> {
    let endpoint_value = purge
        .endpoint
        .unwrap_or_else(|| DEFAULT_PURGE_ENDPOINT.to_string());
    let endpoint = Url::parse(&endpoint_value)
        .map_err(|err| LoadError::invalid("purge.endpoint", format!("failed to parse: {err}")))?;

    let zone = purge.zone.unwrap_or_else(|| DEFAULT_PURGE_ZONE.to_string());
    if zone.trim().is_empty() {
        return Err(LoadError::invalid("purge.zone", "zone must not be empty"));
    }

    let timeout_secs = purge
        .http_timeout_seconds
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(LoadError::invalid(
            "purge.http_timeout_seconds",
            "must be greater than zero",
        ));
    }

    Ok(PurgeSettings {
        endpoint,
        zone,
        enabled: purge.enabled.unwrap_or(true),
        detached: purge.detached.unwrap_or(true),
        http_timeout: Duration::from_secs(timeout_secs),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}
