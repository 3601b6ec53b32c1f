//! Server configuration read from the environment.
//!
//! ```bash
//! PACKLIST_AUTH_HEADER=x-auth-subject   # header carrying the caller's identity
//! PACKLIST_MAX_BODY_BYTES=1048576       # request body limit
//! PACKLIST_LOG_FORMAT=pretty            # or `json`
//! ```
//!
//! The database URL and listen addresses come from the command line (see `main.rs`).

use axum::http::HeaderName;
use std::env;
use thiserror::Error;

pub const DEFAULT_AUTH_HEADER: &str = "x-auth-subject";
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Header the upstream auth layer puts the authenticated subject in
    pub auth_header: HeaderName,
    pub max_body_bytes: usize,
    pub log_format: LogFormat,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            auth_header: HeaderName::from_static(DEFAULT_AUTH_HEADER),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            log_format: LogFormat::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid header name in PACKLIST_AUTH_HEADER: {0}")]
    InvalidHeader(String),

    #[error("Invalid body limit in PACKLIST_MAX_BODY_BYTES: {0}")]
    InvalidBodyLimit(String),

    #[error("Invalid log format: {0}. Expected 'json' or 'pretty'")]
    InvalidLogFormat(String),
}

impl ServerConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = env::var("PACKLIST_AUTH_HEADER") {
            config.auth_header = HeaderName::try_from(raw.trim().to_lowercase())
                .map_err(|_| ConfigError::InvalidHeader(raw.clone()))?;
        }

        if let Ok(raw) = env::var("PACKLIST_MAX_BODY_BYTES") {
            config.max_body_bytes = raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| ConfigError::InvalidBodyLimit(raw.clone()))?;
        }

        if let Ok(raw) = env::var("PACKLIST_LOG_FORMAT") {
            config.log_format = match raw.trim().to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" | "text" => LogFormat::Pretty,
                _ => return Err(ConfigError::InvalidLogFormat(raw)),
            };
        }

        Ok(config)
    }
}
