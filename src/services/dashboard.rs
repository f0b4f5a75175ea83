//! Admin dashboard loading
//!
//! The dashboard pulls every collection on entry. The backend has no
//! independent rate limiting, so the load is sequenced feed by feed with
//! spacing between requests, and a failing feed never sinks the page:
//! the snapshot renders whatever subset loaded.

use std::time::Duration;

use futures::future::BoxFuture;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::ThrottleConfig;
use crate::state::ViewScope;
use crate::utils::errors::{PortalError, Result};
use crate::views::{ContactStats, EventStats, MemberStats, RegistrationStats, SubmissionStats};

use super::contacts::ContactService;
use super::events::EventService;
use super::members::MemberService;
use super::registrations::RegistrationService;
use super::submissions::SubmissionService;

/// Aggregates over whatever collections loaded, plus the feeds that failed
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub events: EventStats,
    pub members: MemberStats,
    pub registrations: RegistrationStats,
    pub submissions: SubmissionStats,
    pub contacts: ContactStats,
    pub failed_feeds: Vec<&'static str>,
}

/// Sequenced loader for the admin dashboard
#[derive(Clone)]
pub struct DashboardService {
    events: EventService,
    members: MemberService,
    registrations: RegistrationService,
    submissions: SubmissionService,
    contacts: ContactService,
    throttle: ThrottleConfig,
}

impl DashboardService {
    /// Create a new DashboardService instance
    pub fn new(
        events: EventService,
        members: MemberService,
        registrations: RegistrationService,
        submissions: SubmissionService,
        contacts: ContactService,
        throttle: ThrottleConfig,
    ) -> Self {
        Self {
            events,
            members,
            registrations,
            submissions,
            contacts,
            throttle,
        }
    }

    /// Load every admin collection, one feed at a time with spacing.
    ///
    /// Feed failures are expected partial failures: they are logged at
    /// debug (no user-facing notice, no console noise) and recorded in
    /// the snapshot, while the remaining feeds still load. Only a
    /// cancelled scope aborts the whole load.
    pub async fn load_all(&self, scope: &ViewScope) -> Result<DashboardSnapshot> {
        let spacing = Duration::from_millis(self.throttle.request_spacing_ms);
        let mut failed_feeds = Vec::new();

        let feeds: Vec<(&'static str, BoxFuture<'_, Result<()>>)> = vec![
            (
                "events",
                Box::pin(async { self.events.fetch_admin(scope, None).await.map(|_| ()) }),
            ),
            (
                "members",
                Box::pin(async { self.members.fetch(scope).await.map(|_| ()) }),
            ),
            (
                "registrations",
                Box::pin(async { self.registrations.fetch(scope, None).await.map(|_| ()) }),
            ),
            (
                "submissions",
                Box::pin(async { self.submissions.fetch(scope, None).await.map(|_| ()) }),
            ),
            (
                "contacts",
                Box::pin(async { self.contacts.fetch(scope).await.map(|_| ()) }),
            ),
        ];

        for (index, (name, feed)) in feeds.into_iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(spacing).await;
            }
            scope.ensure_active()?;

            match feed.await {
                Ok(()) => debug!(feed = name, "Dashboard feed loaded"),
                Err(PortalError::Cancelled) => return Err(PortalError::Cancelled),
                Err(e) => {
                    debug!(feed = name, error = %e, recoverable = e.is_recoverable(),
                           "Dashboard feed failed; rendering without it");
                    failed_feeds.push(name);
                }
            }
        }

        scope.ensure_active()?;
        let snapshot = self.snapshot(failed_feeds);
        info!(
            events = snapshot.events.total,
            members = snapshot.members.total,
            registrations = snapshot.registrations.total,
            submissions = snapshot.submissions.total,
            failed = snapshot.failed_feeds.len(),
            "Dashboard loaded"
        );
        Ok(snapshot)
    }

    /// Re-fetch the fast-moving collections (registrations, submissions).
    ///
    /// The host UI triggers this on window-focus and visibility-change.
    /// Requests run with bounded concurrency per the throttle config
    /// (default 1, i.e. sequential).
    pub async fn refresh_collections(&self, scope: &ViewScope) -> Result<()> {
        let tasks: Vec<BoxFuture<'_, (&'static str, Result<()>)>> = vec![
            Box::pin(async {
                (
                    "registrations",
                    self.registrations.refresh(scope).await.map(|_| ()),
                )
            }),
            Box::pin(async {
                (
                    "submissions",
                    self.submissions.fetch(scope, None).await.map(|_| ()),
                )
            }),
        ];

        let results = stream::iter(tasks)
            .buffered(self.throttle.max_concurrent_requests)
            .collect::<Vec<_>>()
            .await;

        for (name, result) in results {
            match result {
                Ok(()) => debug!(feed = name, "Collection refreshed"),
                Err(PortalError::Cancelled) => return Err(PortalError::Cancelled),
                Err(e) => debug!(feed = name, error = %e, "Collection refresh failed"),
            }
        }

        Ok(())
    }

    /// Aggregates recomputed from the current in-memory collections
    pub fn snapshot(&self, failed_feeds: Vec<&'static str>) -> DashboardSnapshot {
        DashboardSnapshot {
            events: EventStats::from_events(&self.events.snapshot()),
            members: MemberStats::from_members(&self.members.snapshot()),
            registrations: RegistrationStats::from_registrations(&self.registrations.snapshot()),
            submissions: SubmissionStats::from_submissions(&self.submissions.snapshot()),
            contacts: ContactStats::from_contacts(&self.contacts.snapshot()),
            failed_feeds,
        }
    }
}
