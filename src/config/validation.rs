//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use super::Settings;
use crate::utils::errors::{PortalError, Result};

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_api_config(&settings.api)?;
    validate_throttle_config(&settings.throttle)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate portal API configuration
fn validate_api_config(config: &super::ApiConfig) -> Result<()> {
    if config.base_url.is_empty() {
        return Err(PortalError::Config("API base URL is required".to_string()));
    }

    let parsed = url::Url::parse(&config.base_url)
        .map_err(|e| PortalError::Config(format!("Invalid API base URL: {}", e)))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(PortalError::Config(format!(
            "API base URL must use http or https, got {}",
            parsed.scheme()
        )));
    }

    if config.timeout_seconds == 0 {
        return Err(PortalError::Config(
            "API timeout must be greater than 0".to_string(),
        ));
    }

    Ok(())
}

/// Validate throttling configuration
fn validate_throttle_config(config: &super::ThrottleConfig) -> Result<()> {
    if config.max_concurrent_requests == 0 {
        return Err(PortalError::Config(
            "Max concurrent requests must be at least 1".to_string(),
        ));
    }

    // Spacing above 10s would make the sequenced dashboard load unusable.
    if config.request_spacing_ms > 10_000 {
        return Err(PortalError::Config(
            "Request spacing must be 10000ms or less".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(PortalError::Config("Log level is required".to_string()));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(PortalError::Config(format!(
            "Invalid log level: {}. Valid levels: {:?}",
            config.level, valid_levels
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let mut settings = Settings::default();
        settings.api.base_url = "not a url".to_string();
        assert!(validate_settings(&settings).is_err());

        settings.api.base_url = "ftp://example.com/".to_string();
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut settings = Settings::default();
        settings.api.timeout_seconds = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let mut settings = Settings::default();
        settings.throttle.max_concurrent_requests = 0;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
