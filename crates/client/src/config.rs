//! Viewer configuration from environment variables.

use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::ws::ReconnectPolicy;

pub const DEFAULT_WS_URL: &str = "ws://localhost:8080/ws";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("LEADERBOARD_WS_URL is not a valid URL ({value}): {reason}")]
    InvalidUrl { value: String, reason: String },
    #[error("LEADERBOARD_WS_URL must use ws:// or wss://, got {0}://")]
    UnsupportedScheme(String),
    #[error("LEADERBOARD_RECONNECT_DELAY_MS must be a positive number of milliseconds, got {0:?}")]
    InvalidDelay(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Stream endpoint; every reconnect targets this same URL.
    pub ws_url: String,
    pub reconnect: ReconnectPolicy,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            ws_url: DEFAULT_WS_URL.to_string(),
            reconnect: ReconnectPolicy::default(),
        }
    }
}

impl ViewerConfig {
    /// Parse configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LEADERBOARD_WS_URL`: stream endpoint (default: "ws://localhost:8080/ws")
    /// - `LEADERBOARD_RECONNECT_DELAY_MS`: fixed reconnect delay (default: 1000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("LEADERBOARD_WS_URL") {
            let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl {
                value: raw.clone(),
                reason: e.to_string(),
            })?;
            if !matches!(url.scheme(), "ws" | "wss") {
                return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
            }
            config.ws_url = url.to_string();
        }

        if let Some(raw) = lookup("LEADERBOARD_RECONNECT_DELAY_MS") {
            let millis = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or_else(|| ConfigError::InvalidDelay(raw.clone()))?;
            config.reconnect = ReconnectPolicy::fixed(Duration::from_millis(millis));
        }

        Ok(config)
    }
}
