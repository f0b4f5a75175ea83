//! Deadline and action gating
//!
//! Pure derivations the UI uses to decide which affordance to show for an
//! event. Advisory only: the backend stays authoritative and re-validates
//! every action.

use chrono::{DateTime, Utc};

use crate::models::{Event, Registration};

/// Whether a deadline has passed, comparing calendar dates only.
///
/// Both sides are reduced to their date before comparing, so a deadline is
/// passed only when "now" is strictly after the deadline's day: last-day
/// registrants stay eligible regardless of time of day.
pub fn deadline_passed(now: DateTime<Utc>, deadline: DateTime<Utc>) -> bool {
    now.date_naive() > deadline.date_naive()
}

/// Deadline check for optional deadlines; absent means never passed
pub fn deadline_passed_opt(now: DateTime<Utc>, deadline: Option<DateTime<Utc>>) -> bool {
    deadline.map(|d| deadline_passed(now, d)).unwrap_or(false)
}

/// Whether `user_id` currently counts as registered for `event_id`.
///
/// True iff a registration for the pair exists whose status is pending,
/// confirmed or waitlist; a cancelled registration does not count.
/// Recomputed from the cache after every refresh.
pub fn is_registered(registrations: &[Registration], event_id: &str, user_id: &str) -> bool {
    registrations
        .iter()
        .any(|r| r.event_id == event_id && r.user_id == user_id && r.status.is_active())
}

/// The call-to-action an event page shows a given user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCta {
    /// Offer the registration form
    Register,
    /// Already registered; offer the submission form
    SubmitWork,
    /// Registration window closed before the user signed up
    RegistrationClosed,
    /// No action applies (no registration needed, terminal event, done)
    None,
}

impl EventCta {
    /// Label rendered when the action is disabled
    pub fn label(self) -> Option<&'static str> {
        match self {
            EventCta::RegistrationClosed => Some("Registration Closed"),
            _ => None,
        }
    }
}

/// Derive the registration/submission affordance for one event and user
pub fn event_cta(
    event: &Event,
    registrations: &[Registration],
    user_id: &str,
    now: DateTime<Utc>,
) -> EventCta {
    if !event.is_active || event.status.is_terminal() || !event.registration_required {
        return EventCta::None;
    }

    if is_registered(registrations, &event.id, user_id) {
        if event.submission_required && !deadline_passed_opt(now, event.submission_deadline) {
            return EventCta::SubmitWork;
        }
        return EventCta::None;
    }

    if deadline_passed_opt(now, event.registration_deadline) {
        EventCta::RegistrationClosed
    } else {
        EventCta::Register
    }
}
