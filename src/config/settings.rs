//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use serde::{Deserialize, Serialize};

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub api: ApiConfig,
    pub throttle: ThrottleConfig,
    pub logging: LoggingConfig,
}

/// Portal REST API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the portal backend, e.g. `https://portal.example.com/api/`
    pub base_url: String,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

/// Backend self-throttling configuration.
///
/// The backend has no independent rate limiting, so bulk loads are paced
/// client-side: sequential feeds with spacing between requests, and a
/// bounded number of concurrent requests for collection refreshes.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThrottleConfig {
    pub request_spacing_ms: u64,
    pub max_concurrent_requests: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file_path: String,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("CLUBPORTAL").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::PortalError> {
        super::validation::validate_settings(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:5000/api/".to_string(),
                timeout_seconds: 15,
                user_agent: format!("clubportal/{}", env!("CARGO_PKG_VERSION")),
            },
            throttle: ThrottleConfig {
                request_spacing_ms: 150,
                max_concurrent_requests: 1,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: "./logs".to_string(),
            },
        }
    }
}
