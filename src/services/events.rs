//! Event service implementation
//!
//! Fetching and admin lifecycle operations for events: creation, edits,
//! status transitions with client-side legality checks, and deletion.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::api::{ApiClient, EmptyBody, Reply};
use crate::models::{CreateEventRequest, Event, EventResults, EventStatus, UpdateEventRequest};
use crate::state::{EntityCache, Notifier, ViewScope};
use crate::utils::errors::{PortalError, Result};

#[derive(Debug, Deserialize)]
struct EventsBody {
    #[serde(default)]
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
struct EventBody {
    #[serde(default)]
    event: Option<Event>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetStatusRequest<'a> {
    status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<&'a EventResults>,
}

/// Service for event operations
#[derive(Clone)]
pub struct EventService {
    client: Arc<ApiClient>,
    cache: EntityCache<Event>,
    notices: Notifier,
}

impl EventService {
    /// Create a new EventService instance
    pub fn new(client: Arc<ApiClient>, cache: EntityCache<Event>, notices: Notifier) -> Self {
        Self { client, cache, notices }
    }

    /// Current local mirror of the event collection
    pub fn snapshot(&self) -> Vec<Event> {
        self.cache.snapshot()
    }

    pub fn get(&self, event_id: &str) -> Option<Event> {
        self.cache.get(event_id)
    }

    /// Whether a mutating request is in flight for this event row
    pub fn is_busy(&self, event_id: &str) -> bool {
        self.cache.is_busy(event_id)
    }

    /// Fetch the public event listing
    pub async fn fetch_public(&self, scope: &ViewScope) -> Result<Vec<Event>> {
        debug!("Fetching public events");
        let reply: Reply<EventsBody> = self.client.get("events", &[]).await?;
        scope.ensure_active()?;
        self.cache.replace_all(reply.body.events.clone());
        Ok(reply.body.events)
    }

    /// Fetch the admin event listing, optionally filtered by status
    pub async fn fetch_admin(
        &self,
        scope: &ViewScope,
        status: Option<EventStatus>,
    ) -> Result<Vec<Event>> {
        debug!(status = ?status, "Fetching admin events");
        let mut query = Vec::new();
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        let reply: Reply<EventsBody> = self.client.get("admin/events", &query).await?;
        scope.ensure_active()?;
        self.cache.replace_all(reply.body.events.clone());
        Ok(reply.body.events)
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event> {
        self.create_inner(request)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn create_inner(&self, request: CreateEventRequest) -> Result<Event> {
        request.validate()?;

        let reply: Reply<EventBody> = self.client.post("admin/events", &request).await?;
        let event = reply.body.event.ok_or_else(|| PortalError::Server {
            status: 200,
            message: "Server response did not include the created event".to_string(),
        })?;

        self.cache.insert(event.clone());
        info!(event_id = %event.id, title = %event.title, "Event created");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| format!("Event \"{}\" created", event.title)),
        );
        Ok(event)
    }

    /// Update an existing event
    pub async fn update(&self, event_id: &str, request: UpdateEventRequest) -> Result<Event> {
        self.update_inner(event_id, request)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn update_inner(&self, event_id: &str, request: UpdateEventRequest) -> Result<Event> {
        let current = self
            .cache
            .get(event_id)
            .ok_or_else(|| PortalError::NotFound(format!("Event {} is not loaded", event_id)))?;
        request.validate_against(&current)?;

        let _busy = self.cache.begin_mutation(event_id)?;

        // Event updates use POST, matching the backend's route table.
        let reply: Reply<EventBody> = self
            .client
            .post(&format!("admin/events/{}", event_id), &request)
            .await?;
        let event = reply.body.event.ok_or_else(|| PortalError::Server {
            status: 200,
            message: "Server response did not include the updated event".to_string(),
        })?;

        self.cache.replace(event.clone());
        info!(event_id = %event.id, "Event updated");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| format!("Event \"{}\" updated", event.title)),
        );
        Ok(event)
    }

    /// Transition an event's lifecycle status.
    ///
    /// Rejected locally, with no network call and no cache mutation, when
    /// the target is not reachable from the current state. A results
    /// payload may accompany only the transition into `completed` and is
    /// shape-checked before dispatch. On success the cache entry is
    /// replaced wholesale by the server's representation; server-computed
    /// fields are never synthesized locally.
    pub async fn set_status(
        &self,
        event_id: &str,
        target: EventStatus,
        results: Option<EventResults>,
    ) -> Result<Event> {
        self.set_status_inner(event_id, target, results)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn set_status_inner(
        &self,
        event_id: &str,
        target: EventStatus,
        results: Option<EventResults>,
    ) -> Result<Event> {
        let current = self
            .cache
            .get(event_id)
            .ok_or_else(|| PortalError::NotFound(format!("Event {} is not loaded", event_id)))?;

        if !current.status.can_transition_to(target) {
            warn!(event_id = event_id, from = %current.status, to = %target,
                  "Refusing illegal event transition");
            return Err(PortalError::InvalidStateTransition {
                from: current.status.to_string(),
                to: target.to_string(),
            });
        }

        if let Some(ref results) = results {
            if target != EventStatus::Completed {
                return Err(PortalError::Validation(
                    "Results can only be attached when completing an event".to_string(),
                ));
            }
            results.validate()?;
        }

        let _busy = self.cache.begin_mutation(event_id)?;

        let payload = SetStatusRequest {
            status: target,
            results: results.as_ref(),
        };
        let reply: Reply<EventBody> = self
            .client
            .post(&format!("admin/events/{}", event_id), &payload)
            .await?;
        let event = reply.body.event.ok_or_else(|| PortalError::Server {
            status: 200,
            message: "Server response did not include the updated event".to_string(),
        })?;

        self.cache.replace(event.clone());
        info!(event_id = %event.id, from = %current.status, to = %target, "Event status changed");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| format!("Event \"{}\" is now {}", event.title, target)),
        );
        Ok(event)
    }

    /// Request deletion of an event.
    ///
    /// Destructive actions require explicit confirmation: nothing is
    /// dispatched until [`PendingEventDeletion::confirm`] is called, and
    /// dropping the token aborts the deletion.
    pub fn delete(&self, event_id: &str) -> PendingEventDeletion<'_> {
        debug!(event_id = event_id, "Event deletion requested, awaiting confirmation");
        PendingEventDeletion {
            service: self,
            event_id: event_id.to_string(),
        }
    }

    async fn delete_confirmed(&self, event_id: &str) -> Result<()> {
        let _busy = self.cache.begin_mutation(event_id)?;

        let reply: Reply<EmptyBody> = self
            .client
            .delete(&format!("admin/events/{}", event_id))
            .await?;

        self.cache.remove(event_id);
        info!(event_id = event_id, "Event deleted");
        self.notices
            .success(reply.message.unwrap_or_else(|| "Event deleted".to_string()));
        Ok(())
    }
}

/// Confirmation token for an event deletion
pub struct PendingEventDeletion<'a> {
    service: &'a EventService,
    event_id: String,
}

impl PendingEventDeletion<'_> {
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    /// Confirm and dispatch the deletion
    pub async fn confirm(self) -> Result<()> {
        self.service
            .delete_confirmed(&self.event_id)
            .await
            .map_err(|e| {
                self.service.notices.report(&e);
                e
            })
    }
}
