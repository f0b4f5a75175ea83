//! Client derivation layer
//!
//! Pure, side-effect-free functions computing UI-facing derived state from
//! the fetched collections: deadline gating, search/filter/sort, and
//! status aggregates.

pub mod filters;
pub mod gating;
pub mod stats;

pub use filters::{
    filter_events, filter_registrations, filter_submissions, matches_search, search, SearchIndex,
};
pub use gating::{deadline_passed, deadline_passed_opt, event_cta, is_registered, EventCta};
pub use stats::{ContactStats, EventStats, MemberStats, RegistrationStats, SubmissionStats};
