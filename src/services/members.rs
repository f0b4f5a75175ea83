//! Member service implementation
//!
//! Admin roster management: adding members (including legacy members with
//! pre-seeded history), edits, profile updates, position promotion and
//! confirmed deletion.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::api::{ApiClient, EmptyBody, Reply};
use crate::models::{
    CreateMemberRequest, Member, PromotionRequest, UpdateMemberRequest, UpdateProfileRequest,
};
use crate::state::{EntityCache, Notifier, ViewScope};
use crate::utils::errors::{PortalError, Result};

#[derive(Debug, Deserialize)]
struct MembersBody {
    #[serde(default)]
    members: Vec<Member>,
}

#[derive(Debug, Deserialize)]
struct MemberBody {
    #[serde(default)]
    member: Option<Member>,
}

/// Service for member operations
#[derive(Clone)]
pub struct MemberService {
    client: Arc<ApiClient>,
    cache: EntityCache<Member>,
    notices: Notifier,
}

impl MemberService {
    /// Create a new MemberService instance
    pub fn new(client: Arc<ApiClient>, cache: EntityCache<Member>, notices: Notifier) -> Self {
        Self { client, cache, notices }
    }

    /// Current local mirror of the member roster
    pub fn snapshot(&self) -> Vec<Member> {
        self.cache.snapshot()
    }

    pub fn get(&self, member_id: &str) -> Option<Member> {
        self.cache.get(member_id)
    }

    /// Whether a mutating request is in flight for this member row
    pub fn is_busy(&self, member_id: &str) -> bool {
        self.cache.is_busy(member_id)
    }

    /// Fetch the member roster
    pub async fn fetch(&self, scope: &ViewScope) -> Result<Vec<Member>> {
        debug!("Fetching members");
        let reply: Reply<MembersBody> = self.client.get("admin/members", &[]).await?;
        scope.ensure_active()?;
        self.cache.replace_all(reply.body.members.clone());
        Ok(reply.body.members)
    }

    /// Add a member. A legacy member is the same call with
    /// `position_history` pre-seeded in the request.
    pub async fn add(&self, request: CreateMemberRequest) -> Result<Member> {
        self.add_inner(request)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn add_inner(&self, request: CreateMemberRequest) -> Result<Member> {
        request.validate()?;

        let reply: Reply<MemberBody> = self.client.post("admin/members", &request).await?;
        let member = reply.body.member.ok_or_else(|| PortalError::Server {
            status: 200,
            message: "Server response did not include the created member".to_string(),
        })?;

        self.cache.insert(member.clone());
        info!(member_id = %member.id, name = %member.name, "Member added");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| format!("{} added to the roster", member.name)),
        );
        Ok(member)
    }

    /// Edit a member's core fields
    pub async fn update(&self, member_id: &str, request: UpdateMemberRequest) -> Result<Member> {
        self.update_inner(member_id, request)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn update_inner(&self, member_id: &str, request: UpdateMemberRequest) -> Result<Member> {
        request.validate()?;

        let _busy = self.cache.begin_mutation(member_id)?;

        let reply: Reply<MemberBody> = self
            .client
            .put(&format!("admin/members/{}", member_id), &request)
            .await?;
        let member = reply.body.member.ok_or_else(|| PortalError::Server {
            status: 200,
            message: "Server response did not include the updated member".to_string(),
        })?;

        self.cache.replace(member.clone());
        info!(member_id = %member.id, "Member updated");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| format!("{} updated", member.name)),
        );
        Ok(member)
    }

    /// Edit a member's public profile
    pub async fn update_profile(
        &self,
        member_id: &str,
        request: UpdateProfileRequest,
    ) -> Result<Member> {
        self.update_profile_inner(member_id, request)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn update_profile_inner(
        &self,
        member_id: &str,
        request: UpdateProfileRequest,
    ) -> Result<Member> {
        request.validate()?;

        let _busy = self.cache.begin_mutation(member_id)?;

        let reply: Reply<MemberBody> = self
            .client
            .patch(&format!("admin/members/{}/profile", member_id), &request)
            .await?;
        let member = reply.body.member.ok_or_else(|| PortalError::Server {
            status: 200,
            message: "Server response did not include the updated member".to_string(),
        })?;

        self.cache.replace(member.clone());
        info!(member_id = %member.id, "Member profile updated");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| format!("Profile for {} updated", member.name)),
        );
        Ok(member)
    }

    /// Promote a member to a new position.
    ///
    /// The backend appends the prior current position to the member's
    /// history before installing the new one; the history is append-only.
    /// The success notice always names the member and the new title.
    pub async fn promote(&self, member_id: &str, request: PromotionRequest) -> Result<Member> {
        self.promote_inner(member_id, request)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn promote_inner(&self, member_id: &str, request: PromotionRequest) -> Result<Member> {
        request.validate()?;

        let prior = self
            .cache
            .get(member_id)
            .ok_or_else(|| PortalError::NotFound(format!("Member {} is not loaded", member_id)))?;

        let _busy = self.cache.begin_mutation(member_id)?;

        let reply: Reply<MemberBody> = self
            .client
            .patch(&format!("admin/members/{}/position", member_id), &request)
            .await?;
        let member = reply.body.member.ok_or_else(|| PortalError::Server {
            status: 200,
            message: "Server response did not include the promoted member".to_string(),
        })?;

        if member.position_history.len() <= prior.position_history.len() {
            warn!(
                member_id = member_id,
                before = prior.position_history.len(),
                after = member.position_history.len(),
                "Promotion did not grow the position history"
            );
        }

        self.cache.replace(member.clone());
        info!(member_id = %member.id, title = %member.current_position.title, "Member promoted");
        self.notices.success(format!(
            "{} promoted to {}",
            member.name, member.current_position.title
        ));
        Ok(member)
    }

    /// Request deletion of a member.
    ///
    /// Destructive, so nothing is dispatched until
    /// [`PendingMemberDeletion::confirm`] is called; dropping the token
    /// aborts.
    pub fn delete(&self, member_id: &str) -> PendingMemberDeletion<'_> {
        debug!(member_id = member_id, "Member deletion requested, awaiting confirmation");
        PendingMemberDeletion {
            service: self,
            member_id: member_id.to_string(),
        }
    }

    async fn delete_confirmed(&self, member_id: &str) -> Result<()> {
        let _busy = self.cache.begin_mutation(member_id)?;

        let reply: Reply<EmptyBody> = self
            .client
            .delete(&format!("admin/members/{}", member_id))
            .await?;

        self.cache.remove(member_id);
        info!(member_id = member_id, "Member deleted");
        self.notices
            .success(reply.message.unwrap_or_else(|| "Member removed".to_string()));
        Ok(())
    }
}

/// Confirmation token for a member deletion
pub struct PendingMemberDeletion<'a> {
    service: &'a MemberService,
    member_id: String,
}

impl PendingMemberDeletion<'_> {
    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    /// Confirm and dispatch the deletion
    pub async fn confirm(self) -> Result<()> {
        self.service
            .delete_confirmed(&self.member_id)
            .await
            .map_err(|e| {
                self.service.notices.report(&e);
                e
            })
    }
}
