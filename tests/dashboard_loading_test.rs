//! Integration tests for dashboard loading, cancellation and auth
//!
//! Sequenced feed loading with partial-failure tolerance, view-scope
//! cancellation, and bearer-token replay after login.

mod helpers;

use std::time::Duration;

use assert_matches::assert_matches;
use helpers::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

use clubportal::models::*;
use clubportal::state::ViewScope;
use clubportal::utils::errors::PortalError;

async fn mount_all_feeds(portal: &PortalMockServer) {
    portal
        .mock_ok(
            "GET",
            "admin/events",
            list_body("events", &[sample_event("ev1", EventStatus::Upcoming)]),
        )
        .await;
    portal
        .mock_ok(
            "GET",
            "admin/members",
            list_body("members", &[sample_member("m1", "Meera Iyer")]),
        )
        .await;
    portal
        .mock_ok(
            "GET",
            "admin/registrations",
            list_body(
                "registrations",
                &[
                    sample_registration("r1", "ev1", "u1", RegistrationStatus::Pending),
                    sample_registration("r2", "ev1", "u2", RegistrationStatus::Confirmed),
                ],
            ),
        )
        .await;
    portal
        .mock_ok(
            "GET",
            "admin/submissions",
            list_body(
                "submissions",
                &[sample_submission("s1", "ev1", "u1", SubmissionStatus::UnderReview)],
            ),
        )
        .await;
    portal
        .mock_ok(
            "GET",
            "admin/contacts",
            list_body("contacts", &[sample_contact("c1")]),
        )
        .await;
}

#[tokio::test]
async fn test_load_all_aggregates_every_feed() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();
    let scope = ViewScope::new();

    mount_all_feeds(&portal).await;

    let snapshot = services.dashboard.load_all(&scope).await.unwrap();
    assert!(snapshot.failed_feeds.is_empty());
    assert_eq!(snapshot.events.total, 1);
    assert_eq!(snapshot.events.upcoming, 1);
    assert_eq!(snapshot.members.active, 1);
    assert_eq!(snapshot.registrations.total, 2);
    assert_eq!(snapshot.registrations.pending, 1);
    assert_eq!(snapshot.submissions.under_review, 1);
    assert_eq!(snapshot.contacts.unread, 1);

    // Background loads never raise user-facing notices.
    assert!(services.notices.is_empty());
}

#[tokio::test]
async fn test_failing_feed_does_not_sink_the_dashboard() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();
    let scope = ViewScope::new();

    // Members feed is down; everything else still renders.
    portal
        .mock_ok(
            "GET",
            "admin/events",
            list_body("events", &[sample_event("ev1", EventStatus::Upcoming)]),
        )
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/members"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&portal.server)
        .await;
    portal
        .mock_ok(
            "GET",
            "admin/registrations",
            list_body(
                "registrations",
                &[
                    sample_registration("r1", "ev1", "u1", RegistrationStatus::Pending),
                    sample_registration("r2", "ev1", "u2", RegistrationStatus::Confirmed),
                ],
            ),
        )
        .await;
    portal
        .mock_ok(
            "GET",
            "admin/submissions",
            list_body(
                "submissions",
                &[sample_submission("s1", "ev1", "u1", SubmissionStatus::UnderReview)],
            ),
        )
        .await;
    portal
        .mock_ok(
            "GET",
            "admin/contacts",
            list_body("contacts", &[sample_contact("c1")]),
        )
        .await;

    let snapshot = services.dashboard.load_all(&scope).await.unwrap();
    assert_eq!(snapshot.failed_feeds, vec!["members"]);
    assert_eq!(snapshot.events.total, 1);
    assert_eq!(snapshot.members.total, 0);
    assert_eq!(snapshot.registrations.total, 2);

    // Expected partial failures stay quiet.
    assert!(services.notices.is_empty());
}

#[tokio::test]
async fn test_cancelled_scope_aborts_load() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();

    mount_all_feeds(&portal).await;

    let scope = ViewScope::new();
    scope.cancel();

    let result = services.dashboard.load_all(&scope).await;
    assert_matches!(result, Err(PortalError::Cancelled));
    assert!(portal.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_cancellation_mid_flight_discards_results() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();

    // The events feed answers slowly; the user navigates away meanwhile.
    Mock::given(method("GET"))
        .and(path("/api/admin/events"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(list_body("events", &[sample_event("ev1", EventStatus::Upcoming)]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&portal.server)
        .await;

    let scope = ViewScope::new();
    let load = {
        let dashboard = services.dashboard.clone();
        let scope = scope.clone();
        tokio::spawn(async move { dashboard.load_all(&scope).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    scope.cancel();

    let result = load.await.unwrap();
    assert_matches!(result, Err(PortalError::Cancelled));

    // The response that arrived after cancellation was never applied.
    assert!(services.events.snapshot().is_empty());
    assert!(services.members.snapshot().is_empty());
}

#[tokio::test]
async fn test_login_installs_token_replayed_on_requests() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();
    let scope = ViewScope::new();

    portal
        .mock_ok(
            "POST",
            "auth/login",
            serde_json::json!({
                "success": true,
                "message": "Welcome back",
                "token": "tok-123",
                "user": {"id": "a1", "name": "Admin", "email": "admin@artclub.edu"}
            }),
        )
        .await;

    // The members route only answers when the bearer token is replayed.
    Mock::given(method("GET"))
        .and(path("/api/admin/members"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(list_body("members", &[sample_member("m1", "Meera Iyer")])),
        )
        .mount(&portal.server)
        .await;

    assert!(!services.auth.is_authenticated());
    let admin = services.auth.login("admin@artclub.edu", "hunter2").await.unwrap();
    assert_eq!(admin.name, "Admin");
    assert!(services.auth.is_authenticated());

    let members = services.members.fetch(&scope).await.unwrap();
    assert_eq!(members.len(), 1);
}

#[tokio::test]
async fn test_logout_drops_token_even_on_backend_failure() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();

    portal
        .mock_ok(
            "POST",
            "auth/login",
            serde_json::json!({
                "success": true,
                "token": "tok-123",
                "user": {"id": "a1", "name": "Admin", "email": "admin@artclub.edu"}
            }),
        )
        .await;
    portal
        .mock_error("POST", "auth/logout", 500, "Session store down")
        .await;

    services.auth.login("admin@artclub.edu", "hunter2").await.unwrap();
    assert!(services.auth.is_authenticated());

    let result = services.auth.logout().await;
    assert!(result.is_err());
    // A dead session must not keep replaying credentials.
    assert!(!services.auth.is_authenticated());
}

#[tokio::test]
async fn test_refresh_collections_repopulates_fast_moving_feeds() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();
    let scope = ViewScope::new();

    portal
        .mock_ok(
            "GET",
            "admin/registrations",
            list_body(
                "registrations",
                &[sample_registration("r1", "ev1", "u1", RegistrationStatus::Pending)],
            ),
        )
        .await;
    portal
        .mock_ok(
            "GET",
            "admin/submissions",
            list_body(
                "submissions",
                &[sample_submission("s1", "ev1", "u1", SubmissionStatus::Submitted)],
            ),
        )
        .await;

    services.dashboard.refresh_collections(&scope).await.unwrap();
    assert_eq!(services.registrations.snapshot().len(), 1);
    assert_eq!(services.submissions.snapshot().len(), 1);
}

#[tokio::test]
async fn test_contact_status_update_touches_single_entry() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();
    let scope = ViewScope::new();

    let c1 = sample_contact("c1");
    let c2 = sample_contact("c2");
    portal
        .mock_ok("GET", "admin/contacts", list_body("contacts", &[c1, c2]))
        .await;
    services.contacts.fetch(&scope).await.unwrap();

    let mut replied = sample_contact("c1");
    replied.status = ContactStatus::Replied;
    replied.updated_at = at(2025, 7, 22);
    portal
        .mock_ok(
            "PATCH",
            "admin/contacts/c1/status",
            entity_body("contact", &replied, Some("Message marked replied")),
        )
        .await;

    services
        .contacts
        .update_status("c1", ContactStatus::Replied)
        .await
        .unwrap();

    let snapshot = services.contacts.snapshot();
    let updated = snapshot.iter().find(|c| c.id == "c1").unwrap();
    assert_eq!(updated.status, ContactStatus::Replied);
    let sibling = snapshot.iter().find(|c| c.id == "c2").unwrap();
    assert_eq!(sibling.status, ContactStatus::New);
}
