//! Integration tests for submission administration
//!
//! Submission gating, review status transitions, award assignment
//! semantics and confirmed hard deletion.

mod helpers;

use assert_matches::assert_matches;
use helpers::*;

use clubportal::models::*;
use clubportal::state::ViewScope;
use clubportal::utils::errors::PortalError;
use clubportal::views;

fn work(user_id: &str) -> CreateSubmissionRequest {
    CreateSubmissionRequest {
        user_id: user_id.to_string(),
        title: "Monsoon Study".to_string(),
        description: Some("Ink and wash".to_string()),
        category: Some("traditional".to_string()),
        duration: Some("2 weeks".to_string()),
        techniques: vec!["wet-on-wet".to_string()],
        software: vec![],
        file_url: "https://cdn.example.com/works/monsoon.png".to_string(),
        thumbnail_url: None,
        additional_files: vec![],
    }
}

#[tokio::test]
async fn test_submit_requires_active_registration() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();

    let event = sample_event("ev1", EventStatus::Ongoing);
    let result = services.submissions.submit(&event, work("u1")).await;
    assert_matches!(result, Err(PortalError::Validation(_)));
    assert!(portal.server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_succeeds_for_registered_user() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();
    let scope = ViewScope::new();

    let r1 = sample_registration("r1", "ev1", "u1", RegistrationStatus::Confirmed);
    portal
        .mock_ok("GET", "admin/registrations", list_body("registrations", &[r1]))
        .await;
    services.registrations.fetch(&scope, None).await.unwrap();

    let created = sample_submission("s1", "ev1", "u1", SubmissionStatus::Submitted);
    portal
        .mock_ok(
            "POST",
            "events/ev1/submissions",
            entity_body("submission", &created, Some("Work submitted")),
        )
        .await;

    let event = sample_event("ev1", EventStatus::Ongoing);
    let submission = services.submissions.submit(&event, work("u1")).await.unwrap();
    assert_eq!(submission.status, SubmissionStatus::Submitted);
    assert_eq!(services.submissions.snapshot().len(), 1);
}

#[tokio::test]
async fn test_award_update_replaces_only_award_field() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();
    let scope = ViewScope::new();

    let approved = sample_submission("s1", "ev1", "u1", SubmissionStatus::Approved);
    portal
        .mock_ok("GET", "admin/submissions", list_body("submissions", &[approved]))
        .await;
    services.submissions.fetch(&scope, None).await.unwrap();

    // The server normalizes the award (adds the certificate); the cache
    // must take the server's object, not the locally-submitted one.
    let server_award = Award {
        position: AwardPosition::First,
        prize: Some("Drawing tablet".to_string()),
        certificate_url: Some("https://certs.example.com/s1.pdf".to_string()),
    };
    portal
        .mock_ok(
            "PATCH",
            "admin/submissions/s1/award",
            serde_json::json!({"success": true, "message": "Award assigned", "award": server_award}),
        )
        .await;

    services
        .submissions
        .update_award(
            "s1",
            AwardUpdate {
                position: AwardPosition::First,
                prize: Some("Drawing tablet".to_string()),
                certificate_url: None,
            },
        )
        .await
        .unwrap();

    let cached = services.submissions.get("s1").unwrap();
    let award = cached.award.expect("award assigned");
    assert_eq!(award.position, AwardPosition::First);
    assert_eq!(
        award.certificate_url.as_deref(),
        Some("https://certs.example.com/s1.pdf")
    );

    // The award call alone never moves the review status; the winner
    // transition is a separate explicit action.
    assert_eq!(cached.status, SubmissionStatus::Approved);
}

#[tokio::test]
async fn test_clearing_award_removes_it() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();
    let scope = ViewScope::new();

    let mut awarded = sample_submission("s1", "ev1", "u1", SubmissionStatus::Winner);
    awarded.award = Some(Award {
        position: AwardPosition::Second,
        prize: None,
        certificate_url: None,
    });
    portal
        .mock_ok("GET", "admin/submissions", list_body("submissions", &[awarded]))
        .await;
    services.submissions.fetch(&scope, None).await.unwrap();

    portal
        .mock_ok(
            "PATCH",
            "admin/submissions/s1/award",
            serde_json::json!({"success": true, "award": null}),
        )
        .await;

    services
        .submissions
        .update_award(
            "s1",
            AwardUpdate {
                position: AwardPosition::None,
                prize: None,
                certificate_url: None,
            },
        )
        .await
        .unwrap();

    assert!(services.submissions.get("s1").unwrap().award.is_none());
}

#[tokio::test]
async fn test_status_update_replaces_entity_when_returned() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();
    let scope = ViewScope::new();

    let submitted = sample_submission("s1", "ev1", "u1", SubmissionStatus::Submitted);
    portal
        .mock_ok("GET", "admin/submissions", list_body("submissions", &[submitted]))
        .await;
    services.submissions.fetch(&scope, None).await.unwrap();

    let mut reviewed = sample_submission("s1", "ev1", "u1", SubmissionStatus::UnderReview);
    reviewed.updated_at = at(2025, 7, 21);
    portal
        .mock_ok(
            "PATCH",
            "admin/submissions/s1/status",
            entity_body("submission", &reviewed, None),
        )
        .await;

    services
        .submissions
        .update_status("s1", SubmissionStatus::UnderReview)
        .await
        .unwrap();

    let cached = services.submissions.get("s1").unwrap();
    assert_eq!(cached.status, SubmissionStatus::UnderReview);
    assert_eq!(cached.updated_at, at(2025, 7, 21));
}

#[tokio::test]
async fn test_confirmed_delete_removes_from_every_view() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();
    let scope = ViewScope::new();

    let s1 = sample_submission("s1", "ev1", "u1", SubmissionStatus::Approved);
    let s2 = sample_submission("s2", "ev1", "u2", SubmissionStatus::Approved);
    portal
        .mock_ok("GET", "admin/submissions", list_body("submissions", &[s1, s2]))
        .await;
    services.submissions.fetch(&scope, None).await.unwrap();

    portal
        .mock_ok(
            "DELETE",
            "admin/submissions/s1",
            serde_json::json!({"success": true, "message": "Submission deleted"}),
        )
        .await;

    services.submissions.delete("s1").confirm().await.unwrap();

    // Gone from the collection and every derived view in the same cycle.
    let snapshot = services.submissions.snapshot();
    assert_eq!(snapshot.len(), 1);
    assert!(views::filter_submissions(&snapshot, Some(SubmissionStatus::Approved), None, "")
        .iter()
        .all(|s| s.id != "s1"));
    assert!(views::filter_submissions(&snapshot, None, Some("ev1"), "")
        .iter()
        .all(|s| s.id != "s1"));
    assert!(views::search(&snapshot, "Work s1").is_empty());
}

#[tokio::test]
async fn test_failed_delete_leaves_collection_untouched() {
    let portal = PortalMockServer::start().await;
    let services = portal.services();
    let scope = ViewScope::new();

    let s1 = sample_submission("s1", "ev1", "u1", SubmissionStatus::Approved);
    portal
        .mock_ok("GET", "admin/submissions", list_body("submissions", &[s1]))
        .await;
    services.submissions.fetch(&scope, None).await.unwrap();

    portal
        .mock_error("DELETE", "admin/submissions/s1", 500, "Storage backend unavailable")
        .await;

    let result = services.submissions.delete("s1").confirm().await;
    assert_matches!(result, Err(PortalError::Server { status: 500, .. }));

    assert_eq!(services.submissions.snapshot().len(), 1);
    let notices = services.notices.drain();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].message, "Storage backend unavailable");

    // The row lock was released despite the failure.
    assert!(!services.submissions.is_busy("s1"));
}
