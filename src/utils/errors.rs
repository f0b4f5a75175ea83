//! Error handling for clubportal
//!
//! This module defines the main error types used throughout the client core
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for clubportal operations
#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Server error (HTTP {status}): {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("A request for {resource} {id} is already in flight")]
    RequestInFlight { resource: &'static str, id: String },

    #[error("Operation cancelled: view no longer active")]
    Cancelled,
}

/// Result type alias for clubportal operations
pub type Result<T> = std::result::Result<T, PortalError>;

impl PortalError {
    /// Human-readable message for user-facing notices.
    ///
    /// Priority order: server-provided message, HTTP-status-derived generic
    /// message, exception message, generic fallback. Network failures get a
    /// distinct "check your connection" message.
    pub fn user_message(&self) -> String {
        match self {
            PortalError::Validation(msg) => msg.clone(),
            PortalError::NotFound(msg) if !msg.is_empty() => msg.clone(),
            PortalError::NotFound(_) => "The requested record was not found".to_string(),
            PortalError::Rejected(msg) if !msg.is_empty() => msg.clone(),
            PortalError::Rejected(_) => "The server declined the request".to_string(),
            PortalError::Server { message, status } => {
                if message.is_empty() {
                    format!("The server reported an error (HTTP {})", status)
                } else {
                    message.clone()
                }
            }
            PortalError::Network(_) => {
                "Could not reach the server. Please check your connection and try again".to_string()
            }
            PortalError::Http(e) if e.is_timeout() || e.is_connect() => {
                "Could not reach the server. Please check your connection and try again".to_string()
            }
            PortalError::Auth(msg) => msg.clone(),
            PortalError::InvalidStateTransition { from, to } => {
                format!("Cannot change status from {} to {}", from, to)
            }
            other => {
                let msg = other.to_string();
                if msg.is_empty() {
                    "Something went wrong. Please try again".to_string()
                } else {
                    msg
                }
            }
        }
    }

    /// Check if the error is recoverable by retrying later
    pub fn is_recoverable(&self) -> bool {
        match self {
            PortalError::Validation(_) => false,
            PortalError::NotFound(_) => false,
            PortalError::Rejected(_) => false,
            PortalError::Server { .. } => true,
            PortalError::Network(_) => true,
            PortalError::Http(_) => true,
            PortalError::Serialization(_) => false,
            PortalError::UrlParse(_) => false,
            PortalError::Config(_) => false,
            PortalError::Auth(_) => false,
            PortalError::InvalidStateTransition { .. } => false,
            PortalError::RequestInFlight { .. } => true,
            PortalError::Cancelled => false,
        }
    }

    /// Errors that must not produce a user-facing notice.
    ///
    /// A cancelled view has no surface to show a notice on, and an
    /// in-flight refusal corresponds to a control the UI keeps disabled.
    pub fn is_silent(&self) -> bool {
        matches!(
            self,
            PortalError::Cancelled | PortalError::RequestInFlight { .. }
        )
    }
}
