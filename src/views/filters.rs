//! List filtering, search and ordering
//!
//! Pure predicate combinations over already-fetched collections. Search is
//! a case-insensitive substring match across a small fixed set of fields
//! per entity.

use crate::models::{
    Contact, Event, EventStatus, EventType, Member, Registration, RegistrationStatus, Submission,
    SubmissionStatus,
};

/// Fields an entity exposes to the search box
pub trait SearchIndex {
    fn search_fields(&self) -> Vec<&str>;
}

impl SearchIndex for Event {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.id.as_str(), self.title.as_str()]
    }
}

impl SearchIndex for Registration {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.id.as_str(),
            self.participant.name.as_str(),
            self.participant.email.as_str(),
        ];
        if let Some(ref department) = self.participant.department {
            fields.push(department.as_str());
        }
        fields
    }
}

impl SearchIndex for Submission {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str(), self.title.as_str()];
        if let Some(ref category) = self.category {
            fields.push(category.as_str());
        }
        fields
    }
}

impl SearchIndex for Member {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.id.as_str(),
            self.name.as_str(),
            self.email.as_str(),
            self.current_position.title.as_str(),
        ]
    }
}

impl SearchIndex for Contact {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.id.as_str(), self.name.as_str(), self.email.as_str()];
        if let Some(ref subject) = self.subject {
            fields.push(subject.as_str());
        }
        fields
    }
}

/// Case-insensitive substring match; a blank term matches everything
pub fn matches_search<T: SearchIndex>(item: &T, term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    item.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Filter any searchable collection by term
pub fn search<'a, T: SearchIndex>(items: &'a [T], term: &str) -> Vec<&'a T> {
    items.iter().filter(|item| matches_search(*item, term)).collect()
}

/// Admin event list filter
pub fn filter_events<'a>(
    events: &'a [Event],
    status: Option<EventStatus>,
    event_type: Option<EventType>,
    term: &str,
) -> Vec<&'a Event> {
    events
        .iter()
        .filter(|e| status.map_or(true, |s| e.status == s))
        .filter(|e| event_type.map_or(true, |t| e.event_type == t))
        .filter(|e| matches_search(*e, term))
        .collect()
}

/// Admin registration list filter
pub fn filter_registrations<'a>(
    registrations: &'a [Registration],
    status: Option<RegistrationStatus>,
    event_id: Option<&str>,
    term: &str,
) -> Vec<&'a Registration> {
    registrations
        .iter()
        .filter(|r| status.map_or(true, |s| r.status == s))
        .filter(|r| event_id.map_or(true, |id| r.event_id == id))
        .filter(|r| matches_search(*r, term))
        .collect()
}

/// Admin submission list filter
pub fn filter_submissions<'a>(
    submissions: &'a [Submission],
    status: Option<SubmissionStatus>,
    event_id: Option<&str>,
    term: &str,
) -> Vec<&'a Submission> {
    submissions
        .iter()
        .filter(|s| status.map_or(true, |want| s.status == want))
        .filter(|s| event_id.map_or(true, |id| s.event_id == id))
        .filter(|s| matches_search(*s, term))
        .collect()
}

/// Events ordered soonest-first
pub fn events_by_date<'a>(events: &'a [Event]) -> Vec<&'a Event> {
    let mut sorted: Vec<&Event> = events.iter().collect();
    sorted.sort_by_key(|e| e.event_date);
    sorted
}

/// Registrations ordered newest-first
pub fn registrations_newest_first<'a>(registrations: &'a [Registration]) -> Vec<&'a Registration> {
    let mut sorted: Vec<&Registration> = registrations.iter().collect();
    sorted.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
    sorted
}

/// Submissions ordered newest-first
pub fn submissions_newest_first<'a>(submissions: &'a [Submission]) -> Vec<&'a Submission> {
    let mut sorted: Vec<&Submission> = submissions.iter().collect();
    sorted.sort_by(|a, b| b.submitted_at.cmp(&a.submitted_at));
    sorted
}
