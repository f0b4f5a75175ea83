//! Services module
//!
//! This module contains the admin action layer: one service per entity
//! collection plus authentication and the sequenced dashboard loader.

pub mod auth;
pub mod contacts;
pub mod dashboard;
pub mod events;
pub mod members;
pub mod registrations;
pub mod submissions;

// Re-export commonly used services
pub use auth::{AdminUser, AuthService};
pub use contacts::ContactService;
pub use dashboard::{DashboardService, DashboardSnapshot};
pub use events::{EventService, PendingEventDeletion};
pub use members::{MemberService, PendingMemberDeletion};
pub use registrations::RegistrationService;
pub use submissions::{PendingSubmissionDeletion, SubmissionService};

use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::state::{EntityCache, Notifier};
use crate::utils::errors::Result;

/// Service factory for creating and managing all services.
///
/// Constructed once per session and dropped on logout; every service
/// shares one API client (connection pool + token store) and one notice
/// queue.
#[derive(Clone)]
pub struct ServiceFactory {
    pub auth: AuthService,
    pub events: EventService,
    pub registrations: RegistrationService,
    pub submissions: SubmissionService,
    pub members: MemberService,
    pub contacts: ContactService,
    pub dashboard: DashboardService,
    pub notices: Notifier,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(settings: Settings) -> Result<Self> {
        let client = Arc::new(ApiClient::new(&settings.api)?);
        let notices = Notifier::new();

        let registration_cache = EntityCache::new("registration");

        let auth = AuthService::new(client.clone(), notices.clone());
        let events = EventService::new(client.clone(), EntityCache::new("event"), notices.clone());
        let registrations = RegistrationService::new(
            client.clone(),
            registration_cache.clone(),
            notices.clone(),
        );
        let submissions = SubmissionService::new(
            client.clone(),
            EntityCache::new("submission"),
            registration_cache,
            notices.clone(),
        );
        let members =
            MemberService::new(client.clone(), EntityCache::new("member"), notices.clone());
        let contacts =
            ContactService::new(client, EntityCache::new("contact"), notices.clone());

        let dashboard = DashboardService::new(
            events.clone(),
            members.clone(),
            registrations.clone(),
            submissions.clone(),
            contacts.clone(),
            settings.throttle.clone(),
        );

        Ok(Self {
            auth,
            events,
            registrations,
            submissions,
            members,
            contacts,
            dashboard,
            notices,
        })
    }
}
