//! Status aggregates
//!
//! Counts-by-status recomputed from the current in-memory collections on
//! demand; never persisted or cached.

use serde::Serialize;

use crate::models::{
    Contact, ContactStatus, Event, EventStatus, Member, MemberStatus, Registration,
    RegistrationStatus, Submission, SubmissionStatus,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventStats {
    pub total: usize,
    pub upcoming: usize,
    pub ongoing: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl EventStats {
    pub fn from_events(events: &[Event]) -> Self {
        let mut stats = Self { total: events.len(), ..Self::default() };
        for event in events {
            match event.status {
                EventStatus::Upcoming => stats.upcoming += 1,
                EventStatus::Ongoing => stats.ongoing += 1,
                EventStatus::Completed => stats.completed += 1,
                EventStatus::Cancelled => stats.cancelled += 1,
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegistrationStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub waitlist: usize,
    pub cancelled: usize,
}

impl RegistrationStats {
    pub fn from_registrations(registrations: &[Registration]) -> Self {
        let mut stats = Self { total: registrations.len(), ..Self::default() };
        for registration in registrations {
            match registration.status {
                RegistrationStatus::Pending => stats.pending += 1,
                RegistrationStatus::Confirmed => stats.confirmed += 1,
                RegistrationStatus::Waitlist => stats.waitlist += 1,
                RegistrationStatus::Cancelled => stats.cancelled += 1,
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionStats {
    pub total: usize,
    pub submitted: usize,
    pub under_review: usize,
    pub approved: usize,
    pub rejected: usize,
    pub winners: usize,
    /// Entries holding any award position
    pub awarded: usize,
}

impl SubmissionStats {
    pub fn from_submissions(submissions: &[Submission]) -> Self {
        let mut stats = Self { total: submissions.len(), ..Self::default() };
        for submission in submissions {
            match submission.status {
                SubmissionStatus::Submitted => stats.submitted += 1,
                SubmissionStatus::UnderReview => stats.under_review += 1,
                SubmissionStatus::Approved => stats.approved += 1,
                SubmissionStatus::Rejected => stats.rejected += 1,
                SubmissionStatus::Winner => stats.winners += 1,
            }
            if submission.award.is_some() {
                stats.awarded += 1;
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub alumni: usize,
    pub graduated: usize,
}

impl MemberStats {
    pub fn from_members(members: &[Member]) -> Self {
        let mut stats = Self { total: members.len(), ..Self::default() };
        for member in members {
            match member.status {
                MemberStatus::Active => stats.active += 1,
                MemberStatus::Inactive => stats.inactive += 1,
                MemberStatus::Alumni => stats.alumni += 1,
                MemberStatus::Graduated => stats.graduated += 1,
            }
        }
        stats
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactStats {
    pub total: usize,
    pub unread: usize,
    pub read: usize,
    pub replied: usize,
    pub archived: usize,
}

impl ContactStats {
    pub fn from_contacts(contacts: &[Contact]) -> Self {
        let mut stats = Self { total: contacts.len(), ..Self::default() };
        for contact in contacts {
            match contact.status {
                ContactStatus::New => stats.unread += 1,
                ContactStatus::Read => stats.read += 1,
                ContactStatus::Replied => stats.replied += 1,
                ContactStatus::Archived => stats.archived += 1,
            }
        }
        stats
    }
}
