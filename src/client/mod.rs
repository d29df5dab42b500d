//! Portal open-platform API client
//!
//! The API surface is organized into one trait per remote collaborator:
//! - [`OrganizationApi`] - department directory lookup
//! - [`PermissionApi`] - root-permission query
//! - [`EnvironmentApi`] - deployment environment directory
//! - [`ConsumerApi`] - consumer management (list, create, delete, tokens, roles)
//!
//! The [`PortalApi`] super-trait combines all four.

use async_trait::async_trait;

use crate::error::Result;

#[cfg(test)]
pub mod mock;
pub mod models;
pub mod portal;

#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockPortalClient;
pub use models::{
    ConsumerDraft, ConsumerEntry, ConsumerToken, Organization, PermissionResponse, RoleAssignment,
};
pub use portal::PortalClient;

/// Department directory operations
#[async_trait]
pub trait OrganizationApi: Send + Sync {
    /// List every organization visible to the portal account
    async fn list_organizations(&self) -> Result<Vec<Organization>>;
}

/// Root-permission query
#[async_trait]
pub trait PermissionApi: Send + Sync {
    /// Whether the authenticated account holds the portal root permission
    async fn has_root_permission(&self) -> Result<bool>;
}

/// Deployment environment directory
#[async_trait]
pub trait EnvironmentApi: Send + Sync {
    /// List all deployment environments, in portal order
    async fn list_environments(&self) -> Result<Vec<String>>;
}

/// Consumer management operations
#[async_trait]
pub trait ConsumerApi: Send + Sync {
    /// Fetch one page of registered consumers.
    ///
    /// Returns at most `size` entries; a short page means the directory is
    /// exhausted.
    async fn list_consumers(&self, page: usize, size: usize) -> Result<Vec<ConsumerEntry>>;

    /// Register a new consumer and receive its access token
    async fn create_consumer(&self, draft: &ConsumerDraft) -> Result<ConsumerToken>;

    /// Delete the consumer registered under `app_id`
    async fn delete_consumer(&self, app_id: &str) -> Result<()>;

    /// Look up the access token for `app_id`.
    ///
    /// The token field is absent when the consumer exists but has never
    /// been issued one.
    async fn consumer_token(&self, app_id: &str) -> Result<ConsumerToken>;

    /// Assign a namespace role to the consumer identified by `token`
    async fn assign_role(
        &self,
        token: &str,
        role_type: &str,
        app_id: &str,
        namespace_name: &str,
        environments: &[String],
    ) -> Result<()>;
}

/// Combined portal API surface
pub trait PortalApi: OrganizationApi + PermissionApi + EnvironmentApi + ConsumerApi {}

impl<T: OrganizationApi + PermissionApi + EnvironmentApi + ConsumerApi> PortalApi for T {}
