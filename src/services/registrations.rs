//! Registration service implementation
//!
//! Signup against registration-gated events and the admin-side status
//! transitions over existing registrations.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::{ApiClient, Reply};
use crate::models::{CreateRegistrationRequest, Event, Registration, RegistrationStatus};
use crate::state::{EntityCache, Notifier, ViewScope};
use crate::utils::errors::{PortalError, Result};
use crate::views;

#[derive(Debug, Deserialize)]
struct RegistrationsBody {
    #[serde(default)]
    registrations: Vec<Registration>,
}

#[derive(Debug, Deserialize)]
struct RegistrationBody {
    #[serde(default)]
    registration: Option<Registration>,
}

#[derive(Debug, Serialize)]
struct SetStatusRequest {
    status: RegistrationStatus,
}

/// Service for registration operations
#[derive(Clone)]
pub struct RegistrationService {
    client: Arc<ApiClient>,
    cache: EntityCache<Registration>,
    notices: Notifier,
}

impl RegistrationService {
    /// Create a new RegistrationService instance
    pub fn new(
        client: Arc<ApiClient>,
        cache: EntityCache<Registration>,
        notices: Notifier,
    ) -> Self {
        Self { client, cache, notices }
    }

    /// Current local mirror of the registration collection
    pub fn snapshot(&self) -> Vec<Registration> {
        self.cache.snapshot()
    }

    pub fn get(&self, registration_id: &str) -> Option<Registration> {
        self.cache.get(registration_id)
    }

    /// Whether a mutating request is in flight for this registration row
    pub fn is_busy(&self, registration_id: &str) -> bool {
        self.cache.is_busy(registration_id)
    }

    /// Fetch registrations, optionally scoped to one event
    pub async fn fetch(
        &self,
        scope: &ViewScope,
        event_id: Option<&str>,
    ) -> Result<Vec<Registration>> {
        debug!(event_id = ?event_id, "Fetching registrations");
        let mut query = Vec::new();
        if let Some(event_id) = event_id {
            query.push(("event", event_id.to_string()));
        }
        let reply: Reply<RegistrationsBody> =
            self.client.get("admin/registrations", &query).await?;
        scope.ensure_active()?;
        self.cache.replace_all(reply.body.registrations.clone());
        Ok(reply.body.registrations)
    }

    /// Re-fetch the collection.
    ///
    /// The host UI calls this on window-focus and visibility-change so a
    /// registration made in another tab is reflected here; the
    /// "is registered" derivation is recomputed from the refreshed cache.
    pub async fn refresh(&self, scope: &ViewScope) -> Result<Vec<Registration>> {
        self.fetch(scope, None).await
    }

    /// Register the requesting user for an event.
    ///
    /// Advisory gating runs first: the event must require registration,
    /// the deadline must not have passed (date-only comparison, same-day
    /// stays open), and a user with an active registration is refused
    /// before any network call. The backend remains authoritative for all
    /// of these and for pair uniqueness.
    pub async fn register(
        &self,
        event: &Event,
        request: CreateRegistrationRequest,
    ) -> Result<Registration> {
        self.register_inner(event, request)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn register_inner(
        &self,
        event: &Event,
        request: CreateRegistrationRequest,
    ) -> Result<Registration> {
        request.validate()?;

        if !event.registration_required {
            return Err(PortalError::Validation(format!(
                "Event \"{}\" does not take registrations",
                event.title
            )));
        }

        if views::deadline_passed_opt(Utc::now(), event.registration_deadline) {
            return Err(PortalError::Validation("Registration Closed".to_string()));
        }

        let existing = self.cache.snapshot();
        if views::is_registered(&existing, &event.id, &request.user_id) {
            return Err(PortalError::Validation(
                "You are already registered for this event".to_string(),
            ));
        }

        let reply: Reply<RegistrationBody> = self
            .client
            .post(&format!("events/{}/register", event.id), &request)
            .await?;
        let registration = reply.body.registration.ok_or_else(|| PortalError::Server {
            status: 200,
            message: "Server response did not include the registration".to_string(),
        })?;

        self.cache.insert(registration.clone());
        info!(registration_id = %registration.id, event_id = %event.id, "Registration created");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| format!("Registered for \"{}\"", event.title)),
        );
        Ok(registration)
    }

    /// Transition one registration's status (admin action).
    ///
    /// The status graph is flat and fully connected, so any target is
    /// legal; unknown ids surface the backend's NotFound. On success only
    /// the matching entry's status and update timestamp change; no other
    /// entry is touched. Calling twice with the same target is idempotent.
    pub async fn update_status(
        &self,
        registration_id: &str,
        status: RegistrationStatus,
    ) -> Result<()> {
        self.update_status_inner(registration_id, status)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn update_status_inner(
        &self,
        registration_id: &str,
        status: RegistrationStatus,
    ) -> Result<()> {
        let _busy = self.cache.begin_mutation(registration_id)?;

        let reply: Reply<RegistrationBody> = self
            .client
            .patch(
                &format!("admin/registrations/{}/status", registration_id),
                &SetStatusRequest { status },
            )
            .await?;

        let updated_at = reply
            .body
            .registration
            .map(|r| r.updated_at)
            .unwrap_or_else(Utc::now);
        self.cache.update(registration_id, |registration| {
            registration.status = status;
            registration.updated_at = updated_at;
        });

        info!(registration_id = registration_id, status = %status, "Registration status updated");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| format!("Registration marked {}", status)),
        );
        Ok(())
    }
}
