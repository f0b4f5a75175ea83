//! Portal REST API client
//!
//! This module wraps the HTTP transport to the portal backend: client
//! setup, bearer-token replay, response envelope decoding and mapping of
//! transport/HTTP failures onto the error taxonomy.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::utils::errors::{PortalError, Result};

/// Standard response envelope of the portal backend.
///
/// Mutating endpoints return `{success, message?, <entity>?}` and list
/// endpoints `{success, <entities>}`; the entity keys land in the
/// flattened `body`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

/// Minimal envelope used to pull a server message out of error responses
#[derive(Debug, Deserialize)]
struct RawEnvelope {
    #[serde(default)]
    message: Option<String>,
}

/// Body type for endpoints that return only `{success, message}`
#[derive(Debug, Deserialize)]
pub struct EmptyBody {}

/// Decoded successful response: typed body plus the optional server message
#[derive(Debug)]
pub struct Reply<T> {
    pub body: T,
    pub message: Option<String>,
}

/// HTTP client for the portal backend.
///
/// Cloning shares the underlying connection pool and token store.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a new ApiClient instance
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(PortalError::Http)?;

        Ok(Self {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Install the bearer token replayed on subsequent requests
    pub fn set_token(&self, token: impl Into<String>) {
        let mut slot = self.token.write().expect("token store poisoned");
        *slot = Some(token.into());
    }

    /// Forget the bearer token (logout)
    pub fn clear_token(&self) {
        let mut slot = self.token.write().expect("token store poisoned");
        *slot = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().expect("token store poisoned").is_some()
    }

    /// GET a list/detail endpoint
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Reply<T>> {
        self.request::<(), T>(Method::GET, path, query, None).await
    }

    /// POST a JSON payload
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Reply<T>> {
        self.request(Method::POST, path, &[], Some(body)).await
    }

    /// PUT a JSON payload
    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Reply<T>> {
        self.request(Method::PUT, path, &[], Some(body)).await
    }

    /// PATCH a JSON payload
    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Reply<T>> {
        self.request(Method::PATCH, path, &[], Some(body)).await
    }

    /// DELETE a resource
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<Reply<T>> {
        self.request::<(), T>(Method::DELETE, path, &[], None).await
    }

    async fn request<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&B>,
    ) -> Result<Reply<T>> {
        let url = self.base_url.join(path)?;
        let request_id = Uuid::new_v4();
        debug!(request_id = %request_id, method = %method, path = path, "Dispatching API request");

        let mut builder = self.http.request(method, url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(token) = self.token.read().expect("token store poisoned").as_deref() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                PortalError::Network("request timed out".to_string())
            } else if e.is_connect() {
                PortalError::Network(format!("could not connect: {}", e))
            } else {
                PortalError::Http(e)
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(PortalError::Http)?;

        if !status.is_success() {
            let server_message = serde_json::from_str::<RawEnvelope>(&text)
                .ok()
                .and_then(|raw| raw.message)
                .unwrap_or_default();
            warn!(request_id = %request_id, status = %status, message = %server_message,
                  "API request failed");
            return Err(map_error_status(status, server_message));
        }

        let envelope: Envelope<T> = serde_json::from_str(&text).map_err(|e| {
            warn!(request_id = %request_id, error = %e, "Failed to decode API response");
            PortalError::Serialization(e)
        })?;

        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| "The server declined the request".to_string());
            warn!(request_id = %request_id, message = %message, "API reported failure");
            return Err(PortalError::Rejected(message));
        }

        debug!(request_id = %request_id, "API request succeeded");
        Ok(Reply {
            body: envelope.body,
            message: envelope.message,
        })
    }
}

/// Map a non-success HTTP status onto the error taxonomy
fn map_error_status(status: StatusCode, message: String) -> PortalError {
    match status {
        StatusCode::NOT_FOUND => PortalError::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            if message.is_empty() {
                PortalError::Rejected("You are not allowed to perform this action".to_string())
            } else {
                PortalError::Rejected(message)
            }
        }
        s if s.is_client_error() => PortalError::Rejected(message),
        s => PortalError::Server {
            status: s.as_u16(),
            message,
        },
    }
}
