//! Shared test infrastructure
//!
//! A wiremock-backed portal backend plus entity fixtures and a service
//! factory wired at the mock server.

#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use clubportal::config::Settings;
use clubportal::models::*;
use clubportal::services::ServiceFactory;

/// Mock portal backend for integration tests
pub struct PortalMockServer {
    pub server: MockServer,
}

impl PortalMockServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Settings pointing the client at this mock backend
    pub fn settings(&self) -> Settings {
        let mut settings = Settings::default();
        settings.api.base_url = format!("{}/api/", self.server.uri());
        settings.api.timeout_seconds = 5;
        // Keep sequenced loads fast in tests.
        settings.throttle.request_spacing_ms = 5;
        settings
    }

    /// Service factory wired at this mock backend
    pub fn services(&self) -> ServiceFactory {
        ServiceFactory::new(self.settings()).expect("service factory")
    }

    /// Mount a successful JSON response for a route
    pub async fn mock_ok(&self, http_method: &str, route: &str, body: Value) {
        Mock::given(method(http_method))
            .and(path(format!("/api/{}", route)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mount an error response carrying the portal envelope
    pub async fn mock_error(&self, http_method: &str, route: &str, status: u16, message: &str) {
        Mock::given(method(http_method))
            .and(path(format!("/api/{}", route)))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(json!({"success": false, "message": message})),
            )
            .mount(&self.server)
            .await;
    }
}

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 10, 0, 0).unwrap()
}

pub fn days_from_now(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

pub fn sample_event(id: &str, status: EventStatus) -> Event {
    Event {
        id: id.to_string(),
        title: format!("Event {}", id),
        description: Some("Annual club event".to_string()),
        event_date: days_from_now(30),
        end_date: None,
        status,
        event_type: EventType::Competition,
        registration_required: true,
        registration_deadline: Some(days_from_now(15)),
        submission_required: true,
        submission_deadline: Some(days_from_now(20)),
        is_active: true,
        results: None,
        created_at: at(2025, 6, 1),
        updated_at: at(2025, 6, 1),
    }
}

pub fn sample_registration(
    id: &str,
    event_id: &str,
    user_id: &str,
    status: RegistrationStatus,
) -> Registration {
    Registration {
        id: id.to_string(),
        event_id: event_id.to_string(),
        user_id: user_id.to_string(),
        participant: ParticipantSnapshot {
            name: format!("Participant {}", id),
            email: format!("{}@campus.edu", id),
            phone: Some("+91 98765 43210".to_string()),
            department: Some("Design".to_string()),
            year: Some("2".to_string()),
        },
        team_members: vec![],
        motivation: None,
        expectations: None,
        status,
        registered_at: at(2025, 7, 1),
        updated_at: at(2025, 7, 1),
    }
}

pub fn sample_submission(
    id: &str,
    event_id: &str,
    user_id: &str,
    status: SubmissionStatus,
) -> Submission {
    Submission {
        id: id.to_string(),
        event_id: event_id.to_string(),
        user_id: user_id.to_string(),
        title: format!("Work {}", id),
        description: None,
        category: Some("digital".to_string()),
        duration: None,
        techniques: vec!["ink".to_string()],
        software: vec![],
        file_url: format!("https://cdn.example.com/{}.png", id),
        thumbnail_url: None,
        additional_files: vec![],
        status,
        award: None,
        submitted_at: at(2025, 7, 5),
        updated_at: at(2025, 7, 5),
    }
}

pub fn sample_member(id: &str, name: &str) -> Member {
    Member {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@campus.edu", id),
        membership_type: MembershipType::Core,
        status: MemberStatus::Active,
        current_position: Position {
            title: "Core Member".to_string(),
            role: PositionRole::CoreMember,
            department: Department::General,
            responsibilities: vec!["events".to_string()],
        },
        position_history: vec![],
        profile: MemberProfile::default(),
        created_at: at(2024, 8, 1),
        updated_at: at(2024, 8, 1),
    }
}

pub fn sample_contact(id: &str) -> Contact {
    Contact {
        id: id.to_string(),
        name: "Visitor".to_string(),
        email: "visitor@example.com".to_string(),
        subject: Some("Gallery hours".to_string()),
        message: "When is the gallery open?".to_string(),
        status: ContactStatus::New,
        created_at: at(2025, 7, 2),
        updated_at: at(2025, 7, 2),
    }
}

/// Envelope for a list response, e.g. `list_body("events", &events)`
pub fn list_body<T: serde::Serialize>(key: &str, items: &[T]) -> Value {
    json!({"success": true, key: items})
}

/// Envelope for a single-entity response
pub fn entity_body<T: serde::Serialize>(key: &str, item: &T, message: Option<&str>) -> Value {
    match message {
        Some(message) => json!({"success": true, "message": message, key: item}),
        None => json!({"success": true, key: item}),
    }
}
