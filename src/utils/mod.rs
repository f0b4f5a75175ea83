//! Utility modules
//!
//! Common error types, logging setup and helper functions.

pub mod errors;
pub mod helpers;
pub mod logging;

pub use errors::{PortalError, Result};
