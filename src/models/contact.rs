//! Contact message model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::Keyed;
use crate::utils::errors::{PortalError, Result};
use crate::utils::helpers;

/// Inbox state of a contact message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContactStatus {
    New,
    Read,
    Replied,
    Archived,
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ContactStatus::New => "new",
            ContactStatus::Read => "read",
            ContactStatus::Replied => "replied",
            ContactStatus::Archived => "archived",
        };
        write!(f, "{}", s)
    }
}

/// A message sent through the public contact form
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Keyed for Contact {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Payload for sending a contact message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

impl CreateContactRequest {
    /// Client-side form validation; runs before any network call
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PortalError::Validation("Name is required".to_string()));
        }
        if !helpers::is_valid_email(&self.email) {
            return Err(PortalError::Validation(format!(
                "Invalid email address: {}",
                self.email
            )));
        }
        if self.message.trim().is_empty() {
            return Err(PortalError::Validation("Message is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_request_validation() {
        let mut request = CreateContactRequest {
            name: "Visitor".to_string(),
            email: "visitor@example.com".to_string(),
            subject: None,
            message: "When is the next exhibition?".to_string(),
        };
        assert!(request.validate().is_ok());

        request.message = "   ".to_string();
        assert!(request.validate().is_err());
    }
}
