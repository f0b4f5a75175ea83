//! Submission service implementation
//!
//! Work submission against submission-gated events, admin review status
//! transitions, award assignment and confirmed hard deletion.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::{ApiClient, EmptyBody, Reply};
use crate::models::{
    Award, AwardUpdate, CreateSubmissionRequest, Event, Registration, Submission, SubmissionStatus,
};
use crate::state::{EntityCache, Notifier, ViewScope};
use crate::utils::errors::{PortalError, Result};
use crate::views;

#[derive(Debug, Deserialize)]
struct SubmissionsBody {
    #[serde(default)]
    submissions: Vec<Submission>,
}

#[derive(Debug, Deserialize)]
struct SubmissionBody {
    #[serde(default)]
    submission: Option<Submission>,
}

#[derive(Debug, Deserialize)]
struct AwardBody {
    #[serde(default)]
    award: Option<Award>,
}

#[derive(Debug, Serialize)]
struct SetStatusRequest {
    status: SubmissionStatus,
}

/// Service for submission operations
#[derive(Clone)]
pub struct SubmissionService {
    client: Arc<ApiClient>,
    cache: EntityCache<Submission>,
    /// Shared handle to the registration mirror; submission eligibility
    /// depends on an active registration for the same event.
    registrations: EntityCache<Registration>,
    notices: Notifier,
}

impl SubmissionService {
    /// Create a new SubmissionService instance
    pub fn new(
        client: Arc<ApiClient>,
        cache: EntityCache<Submission>,
        registrations: EntityCache<Registration>,
        notices: Notifier,
    ) -> Self {
        Self {
            client,
            cache,
            registrations,
            notices,
        }
    }

    /// Current local mirror of the submission collection
    pub fn snapshot(&self) -> Vec<Submission> {
        self.cache.snapshot()
    }

    pub fn get(&self, submission_id: &str) -> Option<Submission> {
        self.cache.get(submission_id)
    }

    /// Whether a mutating request is in flight for this submission row
    pub fn is_busy(&self, submission_id: &str) -> bool {
        self.cache.is_busy(submission_id)
    }

    /// Fetch submissions, optionally scoped to one event
    pub async fn fetch(
        &self,
        scope: &ViewScope,
        event_id: Option<&str>,
    ) -> Result<Vec<Submission>> {
        debug!(event_id = ?event_id, "Fetching submissions");
        let mut query = Vec::new();
        if let Some(event_id) = event_id {
            query.push(("event", event_id.to_string()));
        }
        let reply: Reply<SubmissionsBody> = self.client.get("admin/submissions", &query).await?;
        scope.ensure_active()?;
        self.cache.replace_all(reply.body.submissions.clone());
        Ok(reply.body.submissions)
    }

    /// Submit a work for an event.
    ///
    /// A submission may exist only for an event that requires submissions,
    /// which in turn requires registration: the requesting user must hold
    /// an active registration for the event, and the submission deadline
    /// must not have passed. All checks run before any network call.
    pub async fn submit(
        &self,
        event: &Event,
        request: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.submit_inner(event, request)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn submit_inner(
        &self,
        event: &Event,
        request: CreateSubmissionRequest,
    ) -> Result<Submission> {
        request.validate()?;

        if !event.submission_required {
            return Err(PortalError::Validation(format!(
                "Event \"{}\" does not take submissions",
                event.title
            )));
        }

        if views::deadline_passed_opt(Utc::now(), event.submission_deadline) {
            return Err(PortalError::Validation("Submissions Closed".to_string()));
        }

        let registrations = self.registrations.snapshot();
        if !views::is_registered(&registrations, &event.id, &request.user_id) {
            return Err(PortalError::Validation(
                "Register for the event before submitting work".to_string(),
            ));
        }

        let reply: Reply<SubmissionBody> = self
            .client
            .post(&format!("events/{}/submissions", event.id), &request)
            .await?;
        let submission = reply.body.submission.ok_or_else(|| PortalError::Server {
            status: 200,
            message: "Server response did not include the submission".to_string(),
        })?;

        self.cache.insert(submission.clone());
        info!(submission_id = %submission.id, event_id = %event.id, "Submission created");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| format!("\"{}\" submitted", submission.title)),
        );
        Ok(submission)
    }

    /// Transition one submission's review status (admin action).
    ///
    /// Flat, fully connected graph; the `winner` transition is an explicit
    /// action and is never chained onto an award assignment.
    pub async fn update_status(
        &self,
        submission_id: &str,
        status: SubmissionStatus,
    ) -> Result<()> {
        self.update_status_inner(submission_id, status)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn update_status_inner(
        &self,
        submission_id: &str,
        status: SubmissionStatus,
    ) -> Result<()> {
        let _busy = self.cache.begin_mutation(submission_id)?;

        let reply: Reply<SubmissionBody> = self
            .client
            .patch(
                &format!("admin/submissions/{}/status", submission_id),
                &SetStatusRequest { status },
            )
            .await?;

        match reply.body.submission {
            Some(submission) => self.cache.replace(submission),
            None => {
                let updated_at = Utc::now();
                self.cache.update(submission_id, |submission| {
                    submission.status = status;
                    submission.updated_at = updated_at;
                });
            }
        }

        info!(submission_id = submission_id, status = %status, "Submission status updated");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| format!("Submission marked {}", status)),
        );
        Ok(())
    }

    /// Assign or clear a submission's award (admin action).
    ///
    /// On success only the `award` field of the matching entry is
    /// replaced, and with the server's returned award object rather than
    /// the locally-submitted one, in case the server normalizes it. The
    /// review status is deliberately untouched.
    pub async fn update_award(&self, submission_id: &str, update: AwardUpdate) -> Result<()> {
        self.update_award_inner(submission_id, update)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn update_award_inner(&self, submission_id: &str, update: AwardUpdate) -> Result<()> {
        update.validate()?;

        let _busy = self.cache.begin_mutation(submission_id)?;

        let reply: Reply<AwardBody> = self
            .client
            .patch(
                &format!("admin/submissions/{}/award", submission_id),
                &update,
            )
            .await?;

        let award = reply.body.award;
        self.cache.update(submission_id, |submission| {
            submission.award = award.clone();
        });

        info!(submission_id = submission_id, position = %update.position, "Submission award updated");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| "Award updated".to_string()),
        );
        Ok(())
    }

    /// Request deletion of a submission.
    ///
    /// Irreversible, so nothing is dispatched until
    /// [`PendingSubmissionDeletion::confirm`] is called; dropping the
    /// token aborts. On failure the collection is left untouched.
    pub fn delete(&self, submission_id: &str) -> PendingSubmissionDeletion<'_> {
        debug!(
            submission_id = submission_id,
            "Submission deletion requested, awaiting confirmation"
        );
        PendingSubmissionDeletion {
            service: self,
            submission_id: submission_id.to_string(),
        }
    }

    async fn delete_confirmed(&self, submission_id: &str) -> Result<()> {
        let _busy = self.cache.begin_mutation(submission_id)?;

        let reply: Reply<EmptyBody> = self
            .client
            .delete(&format!("admin/submissions/{}", submission_id))
            .await?;

        self.cache.remove(submission_id);
        info!(submission_id = submission_id, "Submission deleted");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| "Submission deleted".to_string()),
        );
        Ok(())
    }
}

/// Confirmation token for a submission deletion
pub struct PendingSubmissionDeletion<'a> {
    service: &'a SubmissionService,
    submission_id: String,
}

impl PendingSubmissionDeletion<'_> {
    pub fn submission_id(&self) -> &str {
        &self.submission_id
    }

    /// Confirm and dispatch the deletion
    pub async fn confirm(self) -> Result<()> {
        self.service
            .delete_confirmed(&self.submission_id)
            .await
            .map_err(|e| {
                self.service.notices.report(&e);
                e
            })
    }
}
