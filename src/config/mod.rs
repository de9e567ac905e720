//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{num::NonZeroU32, str::FromStr, time::Duration};

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

mod cli;

pub use cli::SettingsOverrides;

use crate::infra::http::API_BASE_PATH;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "postdash";
const DEFAULT_API_ORIGIN: &str = "http://127.0.0.1:5173";
const DEFAULT_API_TIMEOUT_SECS: u64 = 10;
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 10;
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
const DEFAULT_CACHE_POST_LIST_LIMIT: usize = 50;
const DEFAULT_CACHE_COMMENT_LIST_LIMIT: usize = 100;
const DEFAULT_CACHE_USER_LIMIT: usize = 500;
const DEFAULT_CACHE_LIST_STALE_SECS: u64 = 60;
const DEFAULT_CACHE_USER_STALE_SECS: u64 = 300;
const DEFAULT_CACHE_EVENT_CAPACITY: usize = 256;

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub logging: LoggingSettings,
    pub cache: CacheSettings,
    pub dashboard: DashboardSettings,
}

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// `{origin}/api/`, always ending in a slash.
    pub base_url: Url,
    pub timeout: Duration,
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

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub post_list_limit: usize,
    pub comment_list_limit: usize,
    pub user_limit: usize,
    pub list_stale: Duration,
    pub user_stale: Duration,
    pub event_capacity: usize,
}

#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub page_size: NonZeroU32,
    pub search_debounce: Duration,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }
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

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(overrides: &SettingsOverrides) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = overrides.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("POSTDASH").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(overrides);

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    api: RawApiSettings,
    logging: RawLoggingSettings,
    cache: RawCacheSettings,
    dashboard: RawDashboardSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &SettingsOverrides) {
        if let Some(origin) = overrides.api_origin.as_ref() {
            self.api.origin = Some(origin.clone());
        }
        if let Some(seconds) = overrides.api_timeout_seconds {
            self.api.timeout_seconds = Some(seconds);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(size) = overrides.page_size {
            self.dashboard.page_size = Some(size);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            api,
            logging,
            cache,
            dashboard,
        } = raw;

        Ok(Self {
            api: build_api_settings(api)?,
            logging: build_logging_settings(logging)?,
            cache: build_cache_settings(cache)?,
            dashboard: build_dashboard_settings(dashboard)?,
        })
    }
}

fn build_api_settings(api: RawApiSettings) -> Result<ApiSettings, LoadError> {
    let origin = api
        .origin
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_API_ORIGIN.to_string());

    let origin = Url::parse(&origin)
        .map_err(|err| LoadError::invalid("api.origin", format!("failed to parse: {err}")))?;
    if origin.cannot_be_a_base() {
        return Err(LoadError::invalid("api.origin", "must be an absolute URL"));
    }
    let base_url = origin
        .join(API_BASE_PATH)
        .map_err(|err| LoadError::invalid("api.origin", format!("failed to join: {err}")))?;

    let timeout_secs = api.timeout_seconds.unwrap_or(DEFAULT_API_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(LoadError::invalid(
            "api.timeout_seconds",
            "must be greater than zero",
        ));
    }

    Ok(ApiSettings {
        base_url,
        timeout: Duration::from_secs(timeout_secs),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_cache_settings(cache: RawCacheSettings) -> Result<CacheSettings, LoadError> {
    let post_list_limit = non_zero(
        cache.post_list_limit.unwrap_or(DEFAULT_CACHE_POST_LIST_LIMIT),
        "cache.post_list_limit",
    )?;
    let comment_list_limit = non_zero(
        cache
            .comment_list_limit
            .unwrap_or(DEFAULT_CACHE_COMMENT_LIST_LIMIT),
        "cache.comment_list_limit",
    )?;
    let user_limit = non_zero(
        cache.user_limit.unwrap_or(DEFAULT_CACHE_USER_LIMIT),
        "cache.user_limit",
    )?;
    let event_capacity = non_zero(
        cache.event_capacity.unwrap_or(DEFAULT_CACHE_EVENT_CAPACITY),
        "cache.event_capacity",
    )?;

    Ok(CacheSettings {
        post_list_limit,
        comment_list_limit,
        user_limit,
        list_stale: Duration::from_secs(
            cache.list_stale_seconds.unwrap_or(DEFAULT_CACHE_LIST_STALE_SECS),
        ),
        user_stale: Duration::from_secs(
            cache.user_stale_seconds.unwrap_or(DEFAULT_CACHE_USER_STALE_SECS),
        ),
        event_capacity,
    })
}

fn build_dashboard_settings(
    dashboard: RawDashboardSettings,
) -> Result<DashboardSettings, LoadError> {
    let page_size = dashboard.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    let page_size = NonZeroU32::new(page_size)
        .ok_or_else(|| LoadError::invalid("dashboard.page_size", "must be greater than zero"))?;

    Ok(DashboardSettings {
        page_size,
        search_debounce: Duration::from_millis(
            dashboard
                .search_debounce_ms
                .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS),
        ),
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawApiSettings {
    origin: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    post_list_limit: Option<usize>,
    comment_list_limit: Option<usize>,
    user_limit: Option<usize>,
    list_stale_seconds: Option<u64>,
    user_stale_seconds: Option<u64>,
    event_capacity: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDashboardSettings {
    page_size: Option<u32>,
    search_debounce_ms: Option<u64>,
}

fn non_zero(value: usize, key: &'static str) -> Result<usize, LoadError> {
    if value == 0 {
        return Err(LoadError::invalid(key, "must be greater than zero"));
    }
    Ok(value)
}
