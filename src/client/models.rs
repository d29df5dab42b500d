//! Wire models for the portal open-platform API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Organization directory record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Organization ID
    pub org_id: String,

    /// Organization display name
    pub org_name: String,
}

/// A registered API consumer (application identity)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerEntry {
    /// Application ID the consumer is registered under
    pub app_id: String,

    /// Consumer display name (optional, may not be in all responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Owner user name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    /// Owning department name (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,

    /// When the consumer was registered (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Access token issued to a consumer.
///
/// `token` is absent for consumers that exist but have never been issued
/// one. That is a legitimate state, not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerToken {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// User-edited draft for registering a new consumer.
///
/// Empty strings mean "not filled in yet"; the create flow validates and
/// fills the org/owner fields from the active selections before submitting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumerDraft {
    pub app_id: String,
    pub org_id: String,
    pub org_name: String,
    pub owner_name: String,
}

impl ConsumerDraft {
    /// Reset every field back to unset.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Request body for assigning a namespace role to a consumer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    pub token: String,
    #[serde(rename = "type")]
    pub role_type: String,
    pub app_id: String,
    pub namespace_name: String,
    pub envs: Vec<String>,
}

/// Root-permission check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionResponse {
    pub has_permission: bool,
}
