//! Registration model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::Keyed;
use crate::utils::errors::{PortalError, Result};
use crate::utils::helpers;

/// Registration lifecycle state.
///
/// Flat and fully connected: administrators may correct a registration in
/// either direction, so every state is reachable from every other. There
/// are no automatic transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
    Waitlist,
    Cancelled,
}

impl RegistrationStatus {
    /// A registration counts as "registered" unless it was cancelled
    pub fn is_active(self) -> bool {
        !matches!(self, RegistrationStatus::Cancelled)
    }
}

impl std::fmt::Display for RegistrationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RegistrationStatus::Pending => "pending",
            RegistrationStatus::Confirmed => "confirmed",
            RegistrationStatus::Waitlist => "waitlist",
            RegistrationStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Participant details captured at registration time.
///
/// A snapshot on purpose: later profile edits do not rewrite who signed up.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantSnapshot {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: Option<String>,
    pub year: Option<String>,
}

/// One additional team member on a team registration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    pub email: Option<String>,
}

/// A signup for one event by one user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub participant: ParticipantSnapshot,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    pub motivation: Option<String>,
    pub expectations: Option<String>,
    pub status: RegistrationStatus,
    pub registered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Keyed for Registration {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Payload for registering for an event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    pub user_id: String,
    pub participant: ParticipantSnapshot,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    pub motivation: Option<String>,
    pub expectations: Option<String>,
}

impl CreateRegistrationRequest {
    /// Client-side form validation; runs before any network call
    pub fn validate(&self) -> Result<()> {
        if self.participant.name.trim().is_empty() {
            return Err(PortalError::Validation("Participant name is required".to_string()));
        }

        if !helpers::is_valid_email(&self.participant.email) {
            return Err(PortalError::Validation(format!(
                "Invalid email address: {}",
                self.participant.email
            )));
        }

        if let Some(ref phone) = self.participant.phone {
            if !helpers::is_valid_phone(phone) {
                return Err(PortalError::Validation(format!("Invalid phone number: {}", phone)));
            }
        }

        for member in &self.team_members {
            if member.name.trim().is_empty() {
                return Err(PortalError::Validation(
                    "Team member names cannot be empty".to_string(),
                ));
            }
            if let Some(ref email) = member.email {
                if !helpers::is_valid_email(email) {
                    return Err(PortalError::Validation(format!(
                        "Invalid team member email: {}",
                        email
                    )));
                }
            }
        }

        Ok(())
    }
}
