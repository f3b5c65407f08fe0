//! Client configuration parsed from environment variables.

use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://blogi-36jo.onrender.com";
pub const VERIFY_TOKEN_PATH: &str = "/api/verify-token";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid number for {var}: {value:?}")]
    InvalidNumber { var: String, value: String },

    #[error("api base url is empty")]
    EmptyBaseUrl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl HttpTimeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the blog API, without a trailing slash. The user list is
    /// served from this URL directly.
    pub api_base_url: String,
    pub timeouts: HttpTimeouts,
}

impl ClientConfig {
    /// Build a config pointing at `base_url` with default timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyBaseUrl`] if `base_url` is blank.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { api_base_url: normalize_base_url(base_url)?, timeouts: HttpTimeouts::default() })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `BLOGI_API_BASE_URL`: default `https://blogi-36jo.onrender.com`
    /// - `BLOGI_REQUEST_TIMEOUT_SECS`: default 30
    /// - `BLOGI_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error if a timeout is not a number or the base URL is blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_base = std::env::var("BLOGI_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        let api_base_url = normalize_base_url(&raw_base)?;
        let timeouts = HttpTimeouts {
            request_secs: env_parse_u64("BLOGI_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            connect_secs: env_parse_u64("BLOGI_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS)?,
        };
        Ok(Self { api_base_url, timeouts })
    }

    #[must_use]
    pub fn verify_token_url(&self) -> String {
        format!("{}{VERIFY_TOKEN_PATH}", self.api_base_url)
    }

    #[must_use]
    pub fn users_url(&self) -> String {
        self.api_base_url.clone()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base_url: DEFAULT_API_BASE_URL.to_string(), timeouts: HttpTimeouts::default() }
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }
    Ok(trimmed.to_string())
}

fn env_parse_u64(key: &str, default: u64) -> Result<u64, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidNumber { var: key.to_string(), value: raw }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
