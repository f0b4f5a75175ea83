//! Member model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::Keyed;
use crate::utils::errors::{PortalError, Result};
use crate::utils::helpers;

/// Membership track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MembershipType {
    Core,
    Alumni,
}

/// Member standing within the club
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberStatus {
    Active,
    Inactive,
    Alumni,
    Graduated,
}

/// Role held within a position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PositionRole {
    Secretary,
    JointSecretary,
    CoreMember,
}

impl std::fmt::Display for PositionRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PositionRole::Secretary => "secretary",
            PositionRole::JointSecretary => "joint-secretary",
            PositionRole::CoreMember => "core-member",
        };
        write!(f, "{}", s)
    }
}

/// Organizational department a position belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Department {
    Leadership,
    General,
}

/// The position a member currently holds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub title: String,
    pub role: PositionRole,
    pub department: Department,
    #[serde(default)]
    pub responsibilities: Vec<String>,
}

/// One completed stint in a member's position history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    pub title: String,
    pub role: PositionRole,
    pub department: Department,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub period: Option<String>,
}

/// Public-facing profile details
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfile {
    pub bio: Option<String>,
    pub mobile: Option<String>,
    pub profile_image: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A club member as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub membership_type: MembershipType,
    pub status: MemberStatus,
    pub current_position: Position,
    /// Append-only: promotions push the prior current position here.
    #[serde(default)]
    pub position_history: Vec<PositionRecord>,
    #[serde(default)]
    pub profile: MemberProfile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Keyed for Member {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Member {
    /// The history a promotion is expected to produce: the prior current
    /// position is appended (closed out at `effective`) before the new one
    /// is installed. The backend performs the append; this mirror of the
    /// rule backs the client-side append-only check and the tests.
    pub fn expected_history_after_promotion(&self, effective: DateTime<Utc>) -> Vec<PositionRecord> {
        let mut history = self.position_history.clone();
        history.push(PositionRecord {
            title: self.current_position.title.clone(),
            role: self.current_position.role,
            department: self.current_position.department,
            responsibilities: self.current_position.responsibilities.clone(),
            start_date: None,
            end_date: Some(effective),
            period: None,
        });
        history
    }
}

/// Payload for adding a member.
///
/// "Add Legacy Member" uses the same payload with `position_history`
/// pre-seeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemberRequest {
    pub name: String,
    pub email: String,
    pub membership_type: MembershipType,
    pub status: MemberStatus,
    pub current_position: Position,
    #[serde(default)]
    pub position_history: Vec<PositionRecord>,
    #[serde(default)]
    pub profile: MemberProfile,
}

impl CreateMemberRequest {
    /// Client-side form validation; runs before any network call
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PortalError::Validation("Member name is required".to_string()));
        }

        if !helpers::is_valid_email(&self.email) {
            return Err(PortalError::Validation(format!(
                "Invalid email address: {}",
                self.email
            )));
        }

        if self.current_position.title.trim().is_empty() {
            return Err(PortalError::Validation("Position title is required".to_string()));
        }

        if let Some(ref mobile) = self.profile.mobile {
            if !helpers::is_valid_phone(mobile) {
                return Err(PortalError::Validation(format!("Invalid mobile number: {}", mobile)));
            }
        }

        Ok(())
    }
}

/// Payload for editing a member; absent fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemberRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub membership_type: Option<MembershipType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MemberStatus>,
}

impl UpdateMemberRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref name) = self.name {
            if name.trim().is_empty() {
                return Err(PortalError::Validation("Member name cannot be blank".to_string()));
            }
        }
        if let Some(ref email) = self.email {
            if !helpers::is_valid_email(email) {
                return Err(PortalError::Validation(format!("Invalid email address: {}", email)));
            }
        }
        Ok(())
    }
}

/// Payload for editing a member's profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref mobile) = self.mobile {
            if !helpers::is_valid_phone(mobile) {
                return Err(PortalError::Validation(format!("Invalid mobile number: {}", mobile)));
            }
        }
        if let Some(ref image) = self.profile_image {
            if !helpers::is_valid_url(image) {
                return Err(PortalError::Validation(format!(
                    "Profile image URL is not valid: {}",
                    image
                )));
            }
        }
        Ok(())
    }
}

/// Payload for promoting a member to a new position
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionRequest {
    pub new_position: Position,
    pub reason: String,
}

impl PromotionRequest {
    pub fn validate(&self) -> Result<()> {
        if self.new_position.title.trim().is_empty() {
            return Err(PortalError::Validation("New position title is required".to_string()));
        }
        if self.reason.trim().is_empty() {
            return Err(PortalError::Validation("Promotion reason is required".to_string()));
        }
        Ok(())
    }
}
