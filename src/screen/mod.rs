//! View state for the interactive consumer-management flows
//!
//! [`ConsumerScreen`] is the state machine behind the `consumer` commands:
//! it owns the paginated list, the registration draft, the staged delete
//! target, and the environment selection, and it turns every remote outcome
//! into a [`Notice`] the caller renders. Nothing in here performs I/O beyond
//! the portal API traits.

pub mod consumer;

pub use consumer::{ConsumerScreen, PAGE_SIZE};

use crate::client::Organization;

/// Role type used for every consumer grant
pub const NAMESPACE_ROLE: &str = "NamespaceRole";

/// A user-visible completion signal.
///
/// The screen never prints; it queues notices and the frontend drains them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Warning(String),
    Error(String),
}

impl Notice {
    /// The notice text without its severity.
    pub fn message(&self) -> &str {
        match self {
            Notice::Success(msg) | Notice::Warning(msg) | Notice::Error(msg) => msg,
        }
    }
}

/// A selectable organization option for the department picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgOption {
    /// Organization ID
    pub id: String,
    /// Display label, "name(id)"
    pub text: String,
    /// Organization name
    pub name: String,
}

impl From<&Organization> for OrgOption {
    fn from(org: &Organization) -> Self {
        Self {
            id: org.org_id.clone(),
            text: format!("{}({})", org.org_name, org.org_id),
            name: org.org_name.clone(),
        }
    }
}

/// One entry of the environment multi-select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvToggle {
    pub env: String,
    pub checked: bool,
}

impl EnvToggle {
    pub fn unchecked(env: impl Into<String>) -> Self {
        Self {
            env: env.into(),
            checked: false,
        }
    }
}

/// Role-grant request built incrementally as the user fills the grant form.
///
/// `role_type` is fixed; the rest is seeded by token lookups and form input
/// and consumed atomically by the grant action.
#[derive(Debug, Clone)]
pub struct RoleGrantRequest {
    pub role_type: &'static str,
    pub token: String,
    pub app_id: String,
    pub namespace_name: String,
}

impl Default for RoleGrantRequest {
    fn default() -> Self {
        Self {
            role_type: NAMESPACE_ROLE,
            token: String::new(),
            app_id: String::new(),
            namespace_name: String::new(),
        }
    }
}

/// Project the checked subset out of the master selection, preserving order.
pub fn checked_envs(envs: &[EnvToggle]) -> Vec<String> {
    envs.iter()
        .filter(|toggle| toggle.checked)
        .map(|toggle| toggle.env.clone())
        .collect()
}
