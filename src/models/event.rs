//! Event model and lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::Keyed;
use crate::utils::errors::{PortalError, Result};

/// Event lifecycle state.
///
/// `Upcoming -> Ongoing -> Completed`, with `Cancelled` reachable from
/// `Upcoming` or `Ongoing`. `Completed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventStatus {
    Upcoming,
    Ongoing,
    Completed,
    Cancelled,
}

impl EventStatus {
    /// Check whether `target` is reachable from this state
    pub fn can_transition_to(self, target: EventStatus) -> bool {
        use EventStatus::*;
        matches!(
            (self, target),
            (Upcoming, Ongoing) | (Upcoming, Cancelled) | (Ongoing, Completed) | (Ongoing, Cancelled)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, EventStatus::Completed | EventStatus::Cancelled)
    }
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Ongoing => "ongoing",
            EventStatus::Completed => "completed",
            EventStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Kind of event the club runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    Workshop,
    Competition,
    Seminar,
    Exhibition,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventType::Workshop => "workshop",
            EventType::Competition => "competition",
            EventType::Seminar => "seminar",
            EventType::Exhibition => "exhibition",
        };
        write!(f, "{}", s)
    }
}

/// One placed winner in a completed event's results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Winner {
    pub rank: u32,
    pub participant: String,
    pub prize: Option<String>,
}

/// Results payload attached when an event completes.
///
/// Server-computed once accepted; the client only validates shape before
/// dispatch and otherwise treats the server copy as authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventResults {
    pub winners: Vec<Winner>,
}

impl EventResults {
    /// Ranks must be 1-based, strictly increasing and gap-free
    pub fn validate(&self) -> Result<()> {
        for (index, winner) in self.winners.iter().enumerate() {
            let expected = (index + 1) as u32;
            if winner.rank != expected {
                return Err(PortalError::Validation(format!(
                    "Winner ranks must be consecutive starting at 1; position {} has rank {}",
                    index + 1,
                    winner.rank
                )));
            }
            if winner.participant.trim().is_empty() {
                return Err(PortalError::Validation(format!(
                    "Winner at rank {} is missing a participant name",
                    winner.rank
                )));
            }
        }
        Ok(())
    }
}

/// A club event as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub status: EventStatus,
    pub event_type: EventType,
    pub registration_required: bool,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub submission_required: bool,
    pub submission_deadline: Option<DateTime<Utc>>,
    pub is_active: bool,
    #[serde(default)]
    pub results: Option<EventResults>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Keyed for Event {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Payload for creating a new event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    pub title: String,
    pub description: Option<String>,
    pub event_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub event_type: EventType,
    pub registration_required: bool,
    pub registration_deadline: Option<DateTime<Utc>>,
    pub submission_required: bool,
    pub submission_deadline: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl CreateEventRequest {
    /// Client-side form validation; runs before any network call
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(PortalError::Validation("Event title is required".to_string()));
        }

        validate_event_config(
            EventStatus::Upcoming,
            self.event_date,
            self.end_date,
            self.registration_required,
            self.registration_deadline,
            self.submission_required,
        )
    }
}

/// Payload for updating an existing event; absent fields stay unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UpdateEventRequest {
    /// Validate the update against the event it applies to.
    ///
    /// Invariants are checked on the merged view of current + updated
    /// fields, so an update cannot sneak an event into an invalid shape.
    pub fn validate_against(&self, current: &Event) -> Result<()> {
        if let Some(ref title) = self.title {
            if title.trim().is_empty() {
                return Err(PortalError::Validation("Event title is required".to_string()));
            }
        }

        validate_event_config(
            current.status,
            self.event_date.unwrap_or(current.event_date),
            self.end_date.or(current.end_date),
            self.registration_required.unwrap_or(current.registration_required),
            self.registration_deadline.or(current.registration_deadline),
            self.submission_required.unwrap_or(current.submission_required),
        )
    }
}

/// Shared invariant checks for create and update payloads
fn validate_event_config(
    status: EventStatus,
    event_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    registration_required: bool,
    registration_deadline: Option<DateTime<Utc>>,
    submission_required: bool,
) -> Result<()> {
    if submission_required && !registration_required {
        return Err(PortalError::Validation(
            "Submissions require registration: enable registration or disable submissions"
                .to_string(),
        ));
    }

    if let Some(end) = end_date {
        if end < event_date {
            return Err(PortalError::Validation(
                "End date cannot be before the event date".to_string(),
            ));
        }
    }

    if registration_required && !status.is_terminal() {
        match registration_deadline {
            None => {
                return Err(PortalError::Validation(
                    "Registration deadline is required when registration is enabled".to_string(),
                ));
            }
            Some(deadline) if deadline >= event_date => {
                return Err(PortalError::Validation(
                    "Registration deadline must be before the event date".to_string(),
                ));
            }
            Some(_) => {}
        }
    }

    Ok(())
}
