//! Runtime configuration read from the environment.
//!
//! # Responsibility
//! - Resolve the profile API base URL and logging options.
//! - Validate values before any client or logger is built.
//!
//! # Invariants
//! - Base URLs are `http(s)://host[:port][/path]` without a trailing slash.
//! - Missing variables fall back to defaults; present but invalid ones fail.

use crate::logging::default_log_level;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

pub const ENV_API_BASE_URL: &str = "PROFILEDESK_API_BASE_URL";
pub const ENV_LOG_LEVEL: &str = "PROFILEDESK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "PROFILEDESK_LOG_DIR";
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";

static BASE_URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://[A-Za-z0-9.\-]+(:[0-9]{1,5})?(/[^\s?#]*)?$").expect("valid base url regex")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Base URL is not an absolute http(s) URL.
    InvalidBaseUrl(String),
    /// Log directory is set but not absolute.
    InvalidLogDir(String),
    /// HTTP client construction failed.
    HttpClient(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => {
                write!(f, "invalid profile API base url `{value}`; expected http(s)://host[:port]")
            }
            Self::InvalidLogDir(value) => {
                write!(f, "log dir must be an absolute path, got `{value}`")
            }
            Self::HttpClient(message) => write!(f, "failed to build http client: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDeskConfig {
    pub api_base_url: String,
    pub log_level: String,
    /// File logging is disabled when `None`.
    pub log_dir: Option<PathBuf>,
}

impl Default for ProfileDeskConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl ProfileDeskConfig {
    /// Reads configuration from process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let api_base_url = match read(ENV_API_BASE_URL) {
            Some(value) => normalize_base_url(&value)?,
            None => defaults.api_base_url,
        };
        let log_level = read(ENV_LOG_LEVEL)
            .map(|value| value.trim().to_ascii_lowercase())
            .unwrap_or(defaults.log_level);
        let log_dir = match read(ENV_LOG_DIR) {
            Some(value) => {
                let path = PathBuf::from(value.trim());
                if !path.is_absolute() {
                    return Err(ConfigError::InvalidLogDir(value));
                }
                Some(path)
            }
            None => None,
        };

        Ok(Self {
            api_base_url,
            log_level,
            log_dir,
        })
    }
}

/// Validates a base URL and strips trailing slashes.
pub fn normalize_base_url(value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    if !BASE_URL_RE.is_match(trimmed) {
        return Err(ConfigError::InvalidBaseUrl(value.to_string()));
    }
    Ok(trimmed.to_string())
}
