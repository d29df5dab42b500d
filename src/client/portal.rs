//! Portal API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{
    ConsumerApi, ConsumerDraft, ConsumerEntry, ConsumerToken, EnvironmentApi, Organization,
    OrganizationApi, PermissionApi, PermissionResponse, RoleAssignment,
};
use crate::error::{ApiError, Result};

/// Rate limit: 300 requests per minute (5 per second)
const RATE_LIMIT_PER_SECOND: u32 = 5;

/// Error payload shape used by the portal for non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Portal open-platform API client
pub struct PortalClient {
    http: HttpClient,
    base_url: String,
    token: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl PortalClient {
    /// Create a new client against `base_url`, authenticating with `token`
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(std::num::NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap());
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            rate_limiter,
        })
    }

    /// Make an authenticated request and decode the JSON response
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let response = self.send(method, path, query, body).await?;

        response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
        })
    }

    /// Make an authenticated request, discarding any response body
    async fn request_empty(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<()> {
        self.send(method, path, query, body).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let mut request = self
            .http
            .request(method, &url)
            .header("Authorization", &self.token);

        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(ApiError::from)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        // Surface the portal's message field when the body carries one
        let detail = response
            .text()
            .await
            .ok()
            .and_then(|text| serde_json::from_str::<ErrorBody>(&text).ok())
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());

        let err = match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => ApiError::NotFound(detail),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(detail),
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited,
            s if s.is_server_error() => ApiError::ServerError(detail),
            s => ApiError::InvalidResponse(format!("Unexpected status {}: {}", s, detail)),
        };

        Err(err.into())
    }
}

#[async_trait]
impl OrganizationApi for PortalClient {
    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        self.request(Method::GET, "/organizations", &[], None).await
    }
}

#[async_trait]
impl PermissionApi for PortalClient {
    async fn has_root_permission(&self) -> Result<bool> {
        let response: PermissionResponse = self
            .request(Method::GET, "/permissions/root", &[], None)
            .await?;
        Ok(response.has_permission)
    }
}

#[async_trait]
impl EnvironmentApi for PortalClient {
    async fn list_environments(&self) -> Result<Vec<String>> {
        self.request(Method::GET, "/envs", &[], None).await
    }
}

#[async_trait]
impl ConsumerApi for PortalClient {
    async fn list_consumers(&self, page: usize, size: usize) -> Result<Vec<ConsumerEntry>> {
        let query = [("page", page.to_string()), ("size", size.to_string())];
        self.request(Method::GET, "/consumers", &query, None).await
    }

    async fn create_consumer(&self, draft: &ConsumerDraft) -> Result<ConsumerToken> {
        let body = serde_json::to_value(draft)?;
        self.request(Method::POST, "/consumers", &[], Some(body))
            .await
    }

    async fn delete_consumer(&self, app_id: &str) -> Result<()> {
        let path = format!("/consumers/{}", app_id);
        self.request_empty(Method::DELETE, &path, &[], None).await
    }

    async fn consumer_token(&self, app_id: &str) -> Result<ConsumerToken> {
        let path = format!("/consumers/{}/token", app_id);
        self.request(Method::GET, &path, &[], None).await
    }

    async fn assign_role(
        &self,
        token: &str,
        role_type: &str,
        app_id: &str,
        namespace_name: &str,
        environments: &[String],
    ) -> Result<()> {
        let body = serde_json::to_value(RoleAssignment {
            token: token.to_string(),
            role_type: role_type.to_string(),
            app_id: app_id.to_string(),
            namespace_name: namespace_name.to_string(),
            envs: environments.to_vec(),
        })?;
        self.request_empty(Method::POST, "/consumers/role-assignments", &[], Some(body))
            .await
    }
}
