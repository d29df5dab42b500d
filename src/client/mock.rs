//! Mock portal API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{
    ConsumerApi, ConsumerDraft, ConsumerEntry, ConsumerToken, EnvironmentApi, Organization,
    OrganizationApi, PermissionApi,
};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockPortalClient::new()
///     .with_organizations(vec![Organization { org_id: "pay".into(), org_name: "Payments".into() }])
///     .await;
///
/// let orgs = mock.list_organizations().await?;
/// assert_eq!(orgs.len(), 1);
/// ```
pub struct MockPortalClient {
    /// Organizations to return from list_organizations
    orgs: Arc<Mutex<Vec<Organization>>>,
    /// Environments to return from list_environments
    envs: Arc<Mutex<Vec<String>>>,
    /// Root-permission flag returned from has_root_permission
    root_permission: Arc<Mutex<bool>>,
    /// Paginated consumer responses (page index -> entries for that page)
    consumer_pages: Arc<Mutex<Vec<Vec<ConsumerEntry>>>>,
    /// Tokens returned from consumer_token, keyed by app id
    tokens: Arc<Mutex<HashMap<String, ConsumerToken>>>,
    /// Token returned from create_consumer
    created_token: Arc<Mutex<Option<String>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Errors scoped to a single API method, consumed on first use
    method_errors: Arc<Mutex<HashMap<String, ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl Default for MockPortalClient {
    fn default() -> Self {
        Self {
            orgs: Arc::new(Mutex::new(Vec::new())),
            envs: Arc::new(Mutex::new(Vec::new())),
            root_permission: Arc::new(Mutex::new(false)),
            consumer_pages: Arc::new(Mutex::new(Vec::new())),
            tokens: Arc::new(Mutex::new(HashMap::new())),
            created_token: Arc::new(Mutex::new(None)),
            error: Arc::new(Mutex::new(None)),
            method_errors: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            captured_requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub list_organizations: usize,
    pub has_root_permission: usize,
    pub list_environments: usize,
    pub list_consumers: usize,
    pub create_consumer: usize,
    pub delete_consumer: usize,
    pub consumer_token: usize,
    pub assign_role: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.list_organizations
            + self.has_root_permission
            + self.list_environments
            + self.list_consumers
            + self.create_consumer
            + self.delete_consumer
            + self.consumer_token
            + self.assign_role
    }
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// The API method called (e.g., "list_consumers", "assign_role")
    pub method: String,
    /// App id if the call targeted one
    pub app_id: Option<String>,
    /// Page index for list calls
    pub page: Option<usize>,
    /// Page size for list calls
    pub size: Option<usize>,
    /// Namespace name for role assignments
    pub namespace_name: Option<String>,
    /// Environments for role assignments
    pub environments: Option<Vec<String>>,
    /// Token for role assignments
    pub token: Option<String>,
}

impl CapturedRequest {
    fn named(method: &str) -> Self {
        Self {
            method: method.to_string(),
            app_id: None,
            page: None,
            size: None,
            namespace_name: None,
            environments: None,
            token: None,
        }
    }
}

impl MockPortalClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure organizations to return from list_organizations.
    pub async fn with_organizations(self, orgs: Vec<Organization>) -> Self {
        *self.orgs.lock().await = orgs;
        self
    }

    /// Configure environments to return from list_environments.
    pub async fn with_environments(self, envs: Vec<&str>) -> Self {
        *self.envs.lock().await = envs.into_iter().map(String::from).collect();
        self
    }

    /// Configure the root-permission flag.
    pub async fn with_root_permission(self, allowed: bool) -> Self {
        *self.root_permission.lock().await = allowed;
        self
    }

    /// Configure paginated consumer responses by page.
    /// Page 0 returns pages[0], page 1 returns pages[1], etc.; out-of-range
    /// pages return empty.
    pub async fn with_consumer_pages(self, pages: Vec<Vec<ConsumerEntry>>) -> Self {
        *self.consumer_pages.lock().await = pages;
        self
    }

    /// Configure the token returned for an app id lookup.
    pub async fn with_token(self, app_id: &str, token: ConsumerToken) -> Self {
        self.tokens.lock().await.insert(app_id.to_string(), token);
        self
    }

    /// Configure the token returned from create_consumer.
    pub async fn with_created_token(self, token: &str) -> Self {
        *self.created_token.lock().await = Some(token.to_string());
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Configure an error scoped to one API method, consumed on first use.
    /// Deterministic even when calls run concurrently.
    pub async fn with_error_on(self, method: &str, error: ApiError) -> Self {
        self.method_errors
            .lock()
            .await
            .insert(method.to_string(), error);
        self
    }

    /// Inject a one-shot error after construction (for staged test flows).
    pub async fn set_error(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Check if there's a pending error for `method` and consume it.
    async fn check_error(&self, method: &str) -> Result<()> {
        {
            let mut method_errors = self.method_errors.lock().await;
            if let Some(e) = method_errors.remove(method) {
                return Err(e.into());
            }
        }

        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn capture(&self, request: CapturedRequest) {
        self.captured_requests.lock().await.push(request);
    }
}

#[async_trait]
impl OrganizationApi for MockPortalClient {
    async fn list_organizations(&self) -> Result<Vec<Organization>> {
        self.check_error("list_organizations").await?;

        let mut counts = self.call_count.lock().await;
        counts.list_organizations += 1;
        drop(counts);

        Ok(self.orgs.lock().await.clone())
    }
}

#[async_trait]
impl PermissionApi for MockPortalClient {
    async fn has_root_permission(&self) -> Result<bool> {
        self.check_error("has_root_permission").await?;

        let mut counts = self.call_count.lock().await;
        counts.has_root_permission += 1;
        drop(counts);

        Ok(*self.root_permission.lock().await)
    }
}

#[async_trait]
impl EnvironmentApi for MockPortalClient {
    async fn list_environments(&self) -> Result<Vec<String>> {
        self.check_error("list_environments").await?;

        let mut counts = self.call_count.lock().await;
        counts.list_environments += 1;
        drop(counts);

        Ok(self.envs.lock().await.clone())
    }
}

#[async_trait]
impl ConsumerApi for MockPortalClient {
    async fn list_consumers(&self, page: usize, size: usize) -> Result<Vec<ConsumerEntry>> {
        let mut request = CapturedRequest::named("list_consumers");
        request.page = Some(page);
        request.size = Some(size);
        self.capture(request).await;
        self.check_error("list_consumers").await?;

        let mut counts = self.call_count.lock().await;
        counts.list_consumers += 1;
        drop(counts);

        let pages = self.consumer_pages.lock().await;
        Ok(pages.get(page).cloned().unwrap_or_default())
    }

    async fn create_consumer(&self, draft: &ConsumerDraft) -> Result<ConsumerToken> {
        let mut request = CapturedRequest::named("create_consumer");
        request.app_id = Some(draft.app_id.clone());
        self.capture(request).await;
        self.check_error("create_consumer").await?;

        let mut counts = self.call_count.lock().await;
        counts.create_consumer += 1;
        drop(counts);

        let token = self.created_token.lock().await;
        Ok(ConsumerToken {
            token: Some(
                token
                    .clone()
                    .unwrap_or_else(|| "mock-consumer-token".to_string()),
            ),
        })
    }

    async fn delete_consumer(&self, app_id: &str) -> Result<()> {
        let mut request = CapturedRequest::named("delete_consumer");
        request.app_id = Some(app_id.to_string());
        self.capture(request).await;
        self.check_error("delete_consumer").await?;

        let mut counts = self.call_count.lock().await;
        counts.delete_consumer += 1;

        Ok(())
    }

    async fn consumer_token(&self, app_id: &str) -> Result<ConsumerToken> {
        let mut request = CapturedRequest::named("consumer_token");
        request.app_id = Some(app_id.to_string());
        self.capture(request).await;
        self.check_error("consumer_token").await?;

        let mut counts = self.call_count.lock().await;
        counts.consumer_token += 1;
        drop(counts);

        let tokens = self.tokens.lock().await;
        Ok(tokens
            .get(app_id)
            .cloned()
            .unwrap_or(ConsumerToken { token: None }))
    }

    async fn assign_role(
        &self,
        token: &str,
        _role_type: &str,
        app_id: &str,
        namespace_name: &str,
        environments: &[String],
    ) -> Result<()> {
        let mut request = CapturedRequest::named("assign_role");
        request.app_id = Some(app_id.to_string());
        request.namespace_name = Some(namespace_name.to_string());
        request.environments = Some(environments.to_vec());
        request.token = Some(token.to_string());
        self.capture(request).await;
        self.check_error("assign_role").await?;

        let mut counts = self.call_count.lock().await;
        counts.assign_role += 1;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(app_id: &str) -> ConsumerEntry {
        ConsumerEntry {
            app_id: app_id.to_string(),
            name: None,
            owner_name: None,
            org_name: None,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockPortalClient::new();

        let orgs = mock.list_organizations().await.unwrap();
        assert!(orgs.is_empty());

        let consumers = mock.list_consumers(0, 10).await.unwrap();
        assert!(consumers.is_empty());

        assert!(!mock.has_root_permission().await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_client_with_organizations() {
        let mock = MockPortalClient::new()
            .with_organizations(vec![
                Organization {
                    org_id: "pay".to_string(),
                    org_name: "Payments".to_string(),
                },
                Organization {
                    org_id: "infra".to_string(),
                    org_name: "Infrastructure".to_string(),
                },
            ])
            .await;

        let orgs = mock.list_organizations().await.unwrap();
        assert_eq!(orgs.len(), 2);
        assert_eq!(orgs[0].org_id, "pay");
        assert_eq!(orgs[1].org_name, "Infrastructure");
    }

    #[tokio::test]
    async fn test_mock_client_consumer_pages() {
        let mock = MockPortalClient::new()
            .with_consumer_pages(vec![vec![entry("a")], vec![entry("b")]])
            .await;

        let page0 = mock.list_consumers(0, 10).await.unwrap();
        assert_eq!(page0.len(), 1);
        assert_eq!(page0[0].app_id, "a");

        let page1 = mock.list_consumers(1, 10).await.unwrap();
        assert_eq!(page1[0].app_id, "b");

        // Out-of-range page returns empty
        let page2 = mock.list_consumers(2, 10).await.unwrap();
        assert!(page2.is_empty());
    }

    #[tokio::test]
    async fn test_mock_client_with_error() {
        let mock = MockPortalClient::new()
            .with_error(ApiError::Unauthorized)
            .await;

        let result = mock.list_organizations().await;
        assert!(result.is_err());

        // Error is consumed, next call succeeds
        let result = mock.list_organizations().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_mock_client_call_counts() {
        let mock = MockPortalClient::new();

        mock.list_organizations().await.unwrap();
        mock.list_organizations().await.unwrap();
        mock.list_consumers(0, 10).await.unwrap();
        mock.delete_consumer("a").await.unwrap();

        let counts = mock.call_counts().await;
        assert_eq!(counts.list_organizations, 2);
        assert_eq!(counts.list_consumers, 1);
        assert_eq!(counts.delete_consumer, 1);
        assert_eq!(counts.total(), 4);
    }

    #[tokio::test]
    async fn test_mock_client_token_lookup() {
        let mock = MockPortalClient::new()
            .with_token(
                "billing-api",
                ConsumerToken {
                    token: Some("secret".to_string()),
                },
            )
            .await;

        let token = mock.consumer_token("billing-api").await.unwrap();
        assert_eq!(token.token.as_deref(), Some("secret"));

        // Unknown app id yields the no-token state, not an error
        let token = mock.consumer_token("unknown").await.unwrap();
        assert!(token.token.is_none());
    }

    #[tokio::test]
    async fn test_mock_client_captures_assign_role() {
        let mock = MockPortalClient::new();

        mock.assign_role(
            "tok",
            "NamespaceRole",
            "billing-api",
            "application",
            &["DEV".to_string()],
        )
        .await
        .unwrap();

        let captured = mock.captured_requests().await;
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].method, "assign_role");
        assert_eq!(captured[0].app_id.as_deref(), Some("billing-api"));
        assert_eq!(captured[0].namespace_name.as_deref(), Some("application"));
        assert_eq!(
            captured[0].environments.as_deref(),
            Some(&["DEV".to_string()][..])
        );
        assert_eq!(captured[0].token.as_deref(), Some("tok"));
    }

    #[tokio::test]
    async fn test_mock_client_captures_list_pagination() {
        let mock = MockPortalClient::new();

        mock.list_consumers(3, 10).await.unwrap();

        let captured = mock.captured_requests().await;
        assert_eq!(captured[0].method, "list_consumers");
        assert_eq!(captured[0].page, Some(3));
        assert_eq!(captured[0].size, Some(10));
    }
}
