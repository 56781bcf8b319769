//! Environment configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use chat_api::retry::{MAX_ATTEMPTS, RETRY_DELAY_MS};
use chat_api::url::DEFAULT_ORIGIN;
use chat_api::{validate_origin, ChatApiConfig, RetryPolicy};
use thiserror::Error;

pub const ENV_ORIGIN: &str = "CHAT_WIDGET_ORIGIN";
pub const ENV_MAX_ATTEMPTS: &str = "CHAT_WIDGET_MAX_ATTEMPTS";
pub const ENV_RETRY_DELAY_MS: &str = "CHAT_WIDGET_RETRY_DELAY_MS";
pub const ENV_THINKING_INTERVAL_MS: &str = "CHAT_WIDGET_THINKING_INTERVAL_MS";
pub const ENV_TIMEOUT_SEC: &str = "CHAT_WIDGET_TIMEOUT_SEC";
pub const ENV_STATE_DIR: &str = "CHAT_WIDGET_STATE_DIR";
pub const ENV_TAB_ID: &str = "CHAT_WIDGET_TAB_ID";
pub const ENV_LOG: &str = "CHAT_WIDGET_LOG";

/// Ellipsis step of the thinking indicator.
pub const THINKING_INTERVAL_MS: u64 = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be a whole number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must be at least {min}, got {value}")]
    OutOfRange {
        key: &'static str,
        min: u64,
        value: u64,
    },

    #[error("{key} is not an absolute http(s) URL: '{value}'")]
    InvalidOrigin { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    pub origin: String,
    pub retry: RetryPolicy,
    pub thinking_interval: Duration,
    pub request_timeout: Option<Duration>,
    pub state_root: Option<PathBuf>,
    pub tab_key: Option<String>,
    pub log_path: Option<PathBuf>,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            retry: RetryPolicy::default(),
            thinking_interval: Duration::from_millis(THINKING_INTERVAL_MS),
            request_timeout: None,
            state_root: None,
            tab_key: None,
            log_path: None,
        }
    }
}

impl WidgetConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let origin = env_string_opt(ENV_ORIGIN).unwrap_or_else(|| DEFAULT_ORIGIN.to_string());
        if validate_origin(&origin).is_err() {
            return Err(ConfigError::InvalidOrigin {
                key: ENV_ORIGIN,
                value: origin,
            });
        }

        let max_attempts = env_u64(ENV_MAX_ATTEMPTS, 1)?.unwrap_or(u64::from(MAX_ATTEMPTS));
        let retry_delay = env_u64(ENV_RETRY_DELAY_MS, 0)?.unwrap_or(RETRY_DELAY_MS);
        let thinking_interval =
            env_u64(ENV_THINKING_INTERVAL_MS, 1)?.unwrap_or(THINKING_INTERVAL_MS);
        let request_timeout = env_u64(ENV_TIMEOUT_SEC, 1)?.map(Duration::from_secs);

        Ok(Self {
            origin,
            retry: RetryPolicy::new(
                u32::try_from(max_attempts).unwrap_or(u32::MAX),
                Duration::from_millis(retry_delay),
            ),
            thinking_interval: Duration::from_millis(thinking_interval),
            request_timeout,
            state_root: env_string_opt(ENV_STATE_DIR).map(PathBuf::from),
            tab_key: env_string_opt(ENV_TAB_ID),
            log_path: env_string_opt(ENV_LOG).map(PathBuf::from),
        })
    }

    /// Transport settings for the chat client.
    pub fn api_config(&self) -> ChatApiConfig {
        let config = ChatApiConfig::new(self.origin.clone());
        match self.request_timeout {
            Some(timeout) => config.with_timeout(timeout),
            None => config,
        }
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn env_u64(key: &'static str, min: u64) -> Result<Option<u64>, ConfigError> {
    let Some(raw) = env_string_opt(key) else {
        return Ok(None);
    };
    let value = raw
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidNumber { key, value: raw })?;
    if value < min {
        return Err(ConfigError::OutOfRange { key, min, value });
    }
    Ok(Some(value))
}
