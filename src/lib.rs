//! Clubportal client core
//!
//! The client-side core of a club-management web portal: typed entities
//! with per-entity status machines, an async admin action layer over the
//! portal's REST backend with an optimistic local cache mirror, and pure
//! derived views (deadline gating, search, aggregates) for the UI.

pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod state;
pub mod utils;
pub mod views;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{PortalError, Result};

// Re-export main components for easy access
pub use api::ApiClient;
pub use services::ServiceFactory;
pub use state::{Notifier, ViewScope};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
