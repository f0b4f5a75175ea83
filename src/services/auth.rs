//! Authentication service implementation
//!
//! Admin login/logout and session introspection. The bearer token is an
//! opaque string held by the API client and replayed on every request;
//! token refresh is not the client's concern.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::{ApiClient, EmptyBody, Reply};
use crate::state::Notifier;
use crate::utils::errors::{PortalError, Result};

/// The authenticated administrator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginBody {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    user: Option<AdminUser>,
}

#[derive(Debug, Deserialize)]
struct MeBody {
    #[serde(default)]
    user: Option<AdminUser>,
}

/// Service for authentication operations
#[derive(Clone)]
pub struct AuthService {
    client: Arc<ApiClient>,
    notices: Notifier,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(client: Arc<ApiClient>, notices: Notifier) -> Self {
        Self { client, notices }
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.has_token()
    }

    /// Log in and install the session token on the client
    pub async fn login(&self, email: &str, password: &str) -> Result<AdminUser> {
        self.login_inner(email, password)
            .await
            .map_err(|e| {
                self.notices.report(&e);
                e
            })
    }

    async fn login_inner(&self, email: &str, password: &str) -> Result<AdminUser> {
        let reply: Reply<LoginBody> = self
            .client
            .post("auth/login", &LoginRequest { email, password })
            .await?;

        let token = reply
            .body
            .token
            .ok_or_else(|| PortalError::Auth("Login response did not include a token".to_string()))?;
        let user = reply
            .body
            .user
            .ok_or_else(|| PortalError::Auth("Login response did not include a user".to_string()))?;

        self.client.set_token(token);
        info!(user_id = %user.id, "Admin logged in");
        self.notices.success(
            reply
                .message
                .unwrap_or_else(|| format!("Welcome back, {}", user.name)),
        );
        Ok(user)
    }

    /// Log out and drop the session token.
    ///
    /// The token is cleared even when the backend call fails; a dead
    /// session must not keep replaying credentials.
    pub async fn logout(&self) -> Result<()> {
        let result: Result<Reply<EmptyBody>> = self.client.post("auth/logout", &()).await;
        self.client.clear_token();

        match result {
            Ok(_) => {
                info!("Admin logged out");
                self.notices.info("Logged out");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Logout call failed; session token dropped anyway");
                self.notices.report(&e);
                Err(e)
            }
        }
    }

    /// Fetch the authenticated admin for the current token
    pub async fn me(&self) -> Result<AdminUser> {
        let reply: Reply<MeBody> = self.client.get("auth/me", &[]).await?;
        reply
            .body
            .user
            .ok_or_else(|| PortalError::Auth("Session is not authenticated".to_string()))
    }
}
