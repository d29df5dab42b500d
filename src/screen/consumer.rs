//! Consumer-management screen state machine
//!
//! Holds every piece of view state for the consumer flows and keeps it
//! consistent across user actions and asynchronous portal responses. All
//! remote failures are converted to notices here; nothing propagates out.

use std::sync::Arc;

use log::debug;

use super::{EnvToggle, Notice, OrgOption, RoleGrantRequest, checked_envs};
use crate::client::{ConsumerDraft, ConsumerEntry, ConsumerToken, PortalApi};
use crate::error::Result;

/// Consumers fetched per page
pub const PAGE_SIZE: usize = 10;

/// State machine behind the consumer-management flows.
///
/// Generic over the portal API so tests can drive it with the mock client.
/// Mutation happens only in user-action methods and the response handling
/// directly behind them; callers drain [`Notice`]s after each action.
pub struct ConsumerScreen<C: PortalApi> {
    client: Arc<C>,

    /// Registration form draft, bound field by field
    pub draft: ConsumerDraft,
    /// Role-grant form, seeded by token lookups
    pub role_request: RoleGrantRequest,

    submit_disabled: bool,
    page: usize,
    consumers: Vec<ConsumerEntry>,
    has_more: bool,
    to_delete_app_id: Option<String>,
    operation_target: Option<ConsumerEntry>,
    org_options: Vec<OrgOption>,
    envs: Vec<EnvToggle>,
    envs_checked: Vec<String>,
    is_root: bool,
    token_display: Option<String>,
    delete_dialog_open: bool,
    grant_dialog_open: bool,
    notices: Vec<Notice>,
}

impl<C: PortalApi> ConsumerScreen<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            draft: ConsumerDraft::default(),
            role_request: RoleGrantRequest::default(),
            submit_disabled: false,
            page: 0,
            consumers: Vec::new(),
            has_more: false,
            to_delete_app_id: None,
            operation_target: None,
            org_options: Vec::new(),
            envs: Vec::new(),
            envs_checked: Vec::new(),
            is_root: false,
            token_display: None,
            delete_dialog_open: false,
            grant_dialog_open: false,
            notices: Vec::new(),
        }
    }

    /// Run the four bootstrap fetches.
    ///
    /// The fetches are independent and issued concurrently; each failure
    /// degrades only its own section of the screen.
    pub async fn activate(&mut self) {
        let client = Arc::clone(&self.client);
        let (orgs, permission, envs, first_page) = tokio::join!(
            client.list_organizations(),
            client.has_root_permission(),
            client.list_environments(),
            client.list_consumers(self.page, PAGE_SIZE),
        );

        match orgs {
            Ok(orgs) => {
                self.org_options = orgs.iter().map(OrgOption::from).collect();
            }
            Err(err) => {
                self.notices
                    .push(Notice::Error(format!("failed to load organizations: {err}")));
            }
        }

        // A failed permission check fails safe: privileged affordances stay hidden
        self.is_root = permission.unwrap_or(false);

        match envs {
            Ok(envs) => {
                self.envs = envs.into_iter().map(EnvToggle::unchecked).collect();
                self.envs_checked = checked_envs(&self.envs);
            }
            Err(err) => {
                self.notices
                    .push(Notice::Error(format!("failed to load environments: {err}")));
            }
        }

        self.apply_page(first_page);
    }

    /// Fetch the next page of consumers and append it.
    pub async fn load_next_page(&mut self) {
        debug!("fetching consumer page {}", self.page);
        let result = self.client.list_consumers(self.page, PAGE_SIZE).await;
        self.apply_page(result);
    }

    /// Fold one page response into the list state.
    ///
    /// Invariant: `page` equals the number of pages appended so far, so a
    /// failed or empty fetch must leave it untouched.
    fn apply_page(&mut self, result: Result<Vec<ConsumerEntry>>) {
        match result {
            Ok(entries) => {
                self.has_more = entries.len() == PAGE_SIZE;
                if entries.is_empty() {
                    return;
                }
                self.page += 1;
                self.consumers.extend(entries);
            }
            Err(err) => {
                self.notices
                    .push(Notice::Error(format!("failed to load consumers: {err}")));
            }
        }
    }

    /// Record `entry` as the pending delete target and open the
    /// confirmation dialog. No remote call.
    pub fn stage_delete(&mut self, entry: ConsumerEntry) {
        self.to_delete_app_id = Some(entry.app_id.clone());
        self.operation_target = Some(entry);
        self.delete_dialog_open = true;
    }

    /// Delete the staged consumer. A no-op when nothing is staged.
    pub async fn confirm_delete(&mut self) {
        let Some(app_id) = self.to_delete_app_id.clone() else {
            return;
        };

        match self.client.delete_consumer(&app_id).await {
            Ok(()) => {
                self.notices
                    .push(Notice::Success(format!("consumer {app_id} deleted")));
                self.consumers.retain(|consumer| consumer.app_id != app_id);
                self.to_delete_app_id = None;
                self.operation_target = None;
                self.delete_dialog_open = false;
            }
            Err(err) => {
                self.notices
                    .push(Notice::Error(format!("failed to delete consumer: {err}")));
            }
        }
    }

    /// Close the delete dialog without touching the staged target.
    pub fn dismiss_delete_dialog(&mut self) {
        self.delete_dialog_open = false;
    }

    /// Validate the draft against the active selections and register the
    /// consumer.
    ///
    /// The submit flag doubles as a re-entrancy lock: it is taken up front
    /// and released on every exit path, so a second invocation while one is
    /// in flight returns without issuing a request.
    pub async fn create_consumer(
        &mut self,
        selected_org: Option<&OrgOption>,
        selected_owner: Option<&str>,
    ) {
        if self.submit_disabled {
            return;
        }
        self.submit_disabled = true;

        if self.draft.app_id.is_empty() {
            self.notices
                .push(Notice::Warning("enter an app id first".to_string()));
            self.submit_disabled = false;
            return;
        }

        let Some(org) = selected_org.filter(|org| !org.id.is_empty()) else {
            self.notices
                .push(Notice::Warning("choose a department first".to_string()));
            self.submit_disabled = false;
            return;
        };
        self.draft.org_id = org.id.clone();
        self.draft.org_name = org.name.clone();

        let Some(owner) = selected_owner.filter(|owner| !owner.is_empty()) else {
            self.notices
                .push(Notice::Warning("choose an owner first".to_string()));
            self.submit_disabled = false;
            return;
        };
        self.draft.owner_name = owner.to_string();

        match self.client.create_consumer(&self.draft).await {
            Ok(ConsumerToken { token }) => {
                self.notices.push(Notice::Success(format!(
                    "consumer {} created",
                    self.draft.app_id
                )));
                self.token_display = token.clone();
                self.role_request.token = token.unwrap_or_default();
                self.submit_disabled = false;
                self.draft.clear();
            }
            Err(err) => {
                self.notices
                    .push(Notice::Error(format!("failed to create consumer: {err}")));
                self.submit_disabled = false;
                // Draft is kept so the user can correct and retry
            }
        }
    }

    /// Look up the access token for the drafted app id.
    ///
    /// A consumer without a token is a legitimate state and produces a
    /// placeholder display instead of seeding the grant form.
    pub async fn lookup_token(&mut self) {
        if self.draft.app_id.is_empty() {
            self.notices
                .push(Notice::Warning("enter an app id first".to_string()));
            return;
        }

        match self.client.consumer_token(&self.draft.app_id).await {
            Ok(ConsumerToken { token: Some(token) }) => {
                self.token_display = Some(token.clone());
                self.role_request.token = token;
            }
            Ok(ConsumerToken { token: None }) => {
                self.token_display = Some(format!(
                    "consumer {} has not been issued a token yet",
                    self.draft.app_id
                ));
            }
            Err(err) => {
                self.notices
                    .push(Notice::Error(format!("failed to look up token: {err}")));
            }
        }
    }

    /// Pre-fill the token for `entry` and open the grant dialog.
    pub async fn open_grant_dialog(&mut self, entry: &ConsumerEntry) {
        self.draft.app_id = entry.app_id.clone();
        self.lookup_token().await;
        self.grant_dialog_open = true;
    }

    /// Close the grant dialog.
    pub fn dismiss_grant_dialog(&mut self) {
        self.grant_dialog_open = false;
    }

    /// Assign the drafted namespace role to the consumer, scoped to the
    /// checked environments.
    pub async fn grant_role(&mut self) {
        let result = self
            .client
            .assign_role(
                &self.role_request.token,
                self.role_request.role_type,
                &self.role_request.app_id,
                &self.role_request.namespace_name,
                &self.envs_checked,
            )
            .await;

        match result {
            Ok(()) => {
                self.notices.push(Notice::Success(format!(
                    "role granted to {}",
                    self.role_request.app_id
                )));
            }
            Err(err) => {
                self.notices
                    .push(Notice::Error(format!("failed to grant role: {err}")));
            }
        }
    }

    /// Flip one environment toggle and recompute the derived selection.
    /// Out-of-range indexes are ignored.
    pub fn toggle_env(&mut self, index: usize) {
        if let Some(toggle) = self.envs.get_mut(index) {
            toggle.checked = !toggle.checked;
            self.envs_checked = checked_envs(&self.envs);
        }
    }

    /// Take every queued notice, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn consumers(&self) -> &[ConsumerEntry] {
        &self.consumers
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn org_options(&self) -> &[OrgOption] {
        &self.org_options
    }

    pub fn envs(&self) -> &[EnvToggle] {
        &self.envs
    }

    pub fn envs_checked(&self) -> &[String] {
        &self.envs_checked
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn token_display(&self) -> Option<&str> {
        self.token_display.as_deref()
    }

    #[allow(dead_code)]
    pub fn submit_disabled(&self) -> bool {
        self.submit_disabled
    }

    pub fn delete_dialog_open(&self) -> bool {
        self.delete_dialog_open
    }

    pub fn grant_dialog_open(&self) -> bool {
        self.grant_dialog_open
    }

    pub fn operation_target(&self) -> Option<&ConsumerEntry> {
        self.operation_target.as_ref()
    }
}
