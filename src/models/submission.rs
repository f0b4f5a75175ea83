//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::Keyed;
use crate::utils::errors::{PortalError, Result};
use crate::utils::helpers;

/// Submission review state.
///
/// Flat and fully connected, same rationale as registrations: admins may
/// correct a review decision in either direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionStatus {
    Submitted,
    UnderReview,
    Approved,
    Rejected,
    Winner,
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::UnderReview => "under-review",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
            SubmissionStatus::Winner => "winner",
        };
        write!(f, "{}", s)
    }
}

/// Award placement. `None` clears any previously assigned award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AwardPosition {
    None,
    First,
    Second,
    Third,
    HonorableMention,
    SpecialRecognition,
}

impl std::fmt::Display for AwardPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AwardPosition::None => "none",
            AwardPosition::First => "first",
            AwardPosition::Second => "second",
            AwardPosition::Third => "third",
            AwardPosition::HonorableMention => "honorable-mention",
            AwardPosition::SpecialRecognition => "special-recognition",
        };
        write!(f, "{}", s)
    }
}

/// An award assigned to a submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub position: AwardPosition,
    pub prize: Option<String>,
    pub certificate_url: Option<String>,
}

/// Reference to an uploaded file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRef {
    pub url: String,
    pub label: Option<String>,
}

/// A work submitted for an event by one user or team
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub duration: Option<String>,
    #[serde(default)]
    pub techniques: Vec<String>,
    #[serde(default)]
    pub software: Vec<String>,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub additional_files: Vec<FileRef>,
    pub status: SubmissionStatus,
    #[serde(default)]
    pub award: Option<Award>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Keyed for Submission {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Payload for submitting a work to an event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub duration: Option<String>,
    #[serde(default)]
    pub techniques: Vec<String>,
    #[serde(default)]
    pub software: Vec<String>,
    pub file_url: String,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub additional_files: Vec<FileRef>,
}

impl CreateSubmissionRequest {
    /// Client-side form validation; runs before any network call
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PortalError::Validation("Submission title is required".to_string()));
        }

        if !helpers::is_valid_url(&self.file_url) {
            return Err(PortalError::Validation(format!(
                "Submission file URL is not valid: {}",
                self.file_url
            )));
        }

        if let Some(ref thumb) = self.thumbnail_url {
            if !helpers::is_valid_url(thumb) {
                return Err(PortalError::Validation(format!(
                    "Thumbnail URL is not valid: {}",
                    thumb
                )));
            }
        }

        for file in &self.additional_files {
            if !helpers::is_valid_url(&file.url) {
                return Err(PortalError::Validation(format!(
                    "Additional file URL is not valid: {}",
                    file.url
                )));
            }
        }

        Ok(())
    }
}

/// Payload for assigning or clearing an award
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwardUpdate {
    pub position: AwardPosition,
    pub prize: Option<String>,
    pub certificate_url: Option<String>,
}

impl AwardUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(ref url) = self.certificate_url {
            if !helpers::is_valid_url(url) {
                return Err(PortalError::Validation(format!(
                    "Certificate URL is not valid: {}",
                    url
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_spellings() {
        assert_eq!(
            serde_json::to_string(&SubmissionStatus::UnderReview).unwrap(),
            "\"under-review\""
        );
        assert_eq!(
            serde_json::to_string(&AwardPosition::HonorableMention).unwrap(),
            "\"honorable-mention\""
        );
        assert_eq!(
            serde_json::to_string(&AwardPosition::SpecialRecognition).unwrap(),
            "\"special-recognition\""
        );

        let parsed: SubmissionStatus = serde_json::from_str("\"winner\"").unwrap();
        assert_eq!(parsed, SubmissionStatus::Winner);
    }

    #[test]
    fn test_create_request_requires_valid_file_url() {
        let mut request = CreateSubmissionRequest {
            user_id: "u1".to_string(),
            title: "Monsoon Study".to_string(),
            description: None,
            category: Some("watercolor".to_string()),
            duration: None,
            techniques: vec!["wet-on-wet".to_string()],
            software: vec![],
            file_url: "https://cdn.example.com/works/monsoon.png".to_string(),
            thumbnail_url: None,
            additional_files: vec![],
        };
        assert!(request.validate().is_ok());

        request.file_url = "not a url".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_award_update_validates_certificate_url() {
        let mut update = AwardUpdate {
            position: AwardPosition::First,
            prize: Some("Drawing tablet".to_string()),
            certificate_url: Some("https://certs.example.com/1.pdf".to_string()),
        };
        assert!(update.validate().is_ok());

        update.certificate_url = Some("certs/1.pdf".to_string());
        assert!(update.validate().is_err());
    }
}
