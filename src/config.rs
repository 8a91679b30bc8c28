//! Client configuration parsed from environment variables.
//!
//! DESIGN
//! ======
//! Every setting has a default so a bare `ClientConfig::from_env()` always
//! yields a usable config; only malformed base URLs are rejected.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

const FALLBACK_STATE_DIR: &str = ".chat-client";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Timeouts {
    #[must_use]
    pub fn request(&self) -> Duration {
        Duration::from_secs(self.request_secs)
    }

    #[must_use]
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend origin, without a trailing slash.
    pub base_url: String,
    /// Directory holding the durable key-value store.
    pub state_dir: PathBuf,
    pub timeouts: Timeouts,
}

impl ClientConfig {
    /// Build a config for `base_url` with default state dir and timeouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] unless the URL is `http(s)://`.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self { base_url: normalize_base_url(base_url)?, state_dir: default_state_dir(), timeouts: Timeouts::default() })
    }

    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `CHAT_BASE_URL`: default `http://127.0.0.1:8000`
    /// - `CHAT_STATE_DIR`: default platform data dir
    /// - `CHAT_REQUEST_TIMEOUT_SECS`: default 30
    /// - `CHAT_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for a malformed `CHAT_BASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("CHAT_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned());
        Self::from_env_with_base_url(&base_url)
    }

    /// Like [`Self::from_env`], but with `base_url` supplied by the caller.
    /// `CHAT_BASE_URL` is not read.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] for a malformed `base_url`.
    pub fn from_env_with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = normalize_base_url(base_url)?;
        let state_dir = std::env::var("CHAT_STATE_DIR").map_or_else(|_| default_state_dir(), PathBuf::from);
        let timeouts = Timeouts {
            request_secs: env_parse_u64("CHAT_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse_u64("CHAT_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { base_url, state_dir, timeouts })
    }

    /// Absolute URL for a backend path such as `/auth/token`.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

pub(crate) fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let rest = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .ok_or_else(|| ConfigError::InvalidBaseUrl(raw.to_owned()))?;
    if rest.is_empty() {
        return Err(ConfigError::InvalidBaseUrl(raw.to_owned()));
    }
    Ok(trimmed.to_owned())
}

fn env_parse_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<u64>().unwrap_or(default),
        Err(_) => default,
    }
}

fn default_state_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "chat-client")
        .map_or_else(|| PathBuf::from(FALLBACK_STATE_DIR), |dirs| dirs.data_dir().to_path_buf())
}
