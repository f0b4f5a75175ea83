//! Contact service implementation
//!
//! The public contact form and the admin inbox status flow.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::{ApiClient, Reply};
use crate::models::{Contact, ContactStatus, CreateContactRequest};
use crate::state::{EntityCache, Notifier, ViewScope};
use crate::utils::errors::Result;

#[derive(Debug, Deserialize)]
struct ContactsBody {
    #[serde(default)]
    contacts: Vec<Contact>,
}

#[derive(Debug, Deserialize)]
struct ContactBody {
    #[serde(default)]
    contact: Option<Contact>,
}

#[derive(Debug, Serialize)]
struct SetStatusRequest {
    status: ContactStatus,
}

/// Service for contact message operations
#[derive(Clone)]
pub struct ContactService {
    client: Arc<ApiClient>,
    cache: EntityCache<Contact>,
    notices: Notifier,
}

impl ContactService {
    /// Create a new ContactService instance
    pub fn new(client: Arc<ApiClient>, cache: EntityCache<Contact>, notices: Notifier) -> Self {
        Self { client, cache, notices }
    }

    /// Current local mirror of the contact inbox
    pub fn snapshot(&self) -> Vec<Contact> {
        self.cache.snapshot()
    }

    /// Whether a mutating request is in flight for this contact row
    pub fn is_busy(&self, contact_id: &str) -> bool {
        self.cache.is_busy(contact_id)
    }

    /// Fetch the admin contact inbox
    pub async fn fetch(&self, scope: &ViewScope) -> Result<Vec<Contact>> {
        debug!("Fetching contact inbox");
        let reply: Reply<ContactsBody> = self.client.get("admin/contacts", &[]).await?;
        scope.ensure_active()?;
        self.cache.replace_all(reply.body.contacts.clone());
        Ok(reply.body.contacts)
    }

    /// Send a message through the public contact form
    pub async fn send(&self, request: CreateContactRequest) -> Result<()> {
        self.send_inner(request)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn send_inner(&self, request: CreateContactRequest) -> Result<()> {
        request.validate()?;

        let reply: Reply<ContactBody> = self.client.post("contact", &request).await?;

        if let Some(contact) = reply.body.contact {
            self.cache.insert(contact);
        }

        info!("Contact message sent");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| "Thanks for reaching out. We'll get back to you".to_string()),
        );
        Ok(())
    }

    /// Transition one contact message's inbox status (admin action)
    pub async fn update_status(&self, contact_id: &str, status: ContactStatus) -> Result<()> {
        self.update_status_inner(contact_id, status)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn update_status_inner(&self, contact_id: &str, status: ContactStatus) -> Result<()> {
        let _busy = self.cache.begin_mutation(contact_id)?;

        let reply: Reply<ContactBody> = self
            .client
            .patch(
                &format!("admin/contacts/{}/status", contact_id),
                &SetStatusRequest { status },
            )
            .await?;

        let updated_at = reply
            .body
            .contact
            .map(|c| c.updated_at)
            .unwrap_or_else(Utc::now);
        self.cache.update(contact_id, |contact| {
            contact.status = status;
            contact.updated_at = updated_at;
        });

        info!(contact_id = contact_id, status = %status, "Contact status updated");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| format!("Message marked {}", status)),
        );
        Ok(())
    }
}
