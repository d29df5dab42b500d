//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, auth validation, and client initialization.

use std::sync::Arc;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::PortalClient;
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing the client and runtime options.
pub struct CommandContext {
    /// Portal API client (Arc-wrapped so screens can share it)
    pub client: Arc<PortalClient>,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// Loads config from the (possibly overridden) path, applies the portal
    /// URL override, validates auth, and constructs the API client.
    ///
    /// # Errors
    /// Returns an error if config cannot be loaded or auth is incomplete.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_at(opts.config_ref())?;

        // Apply portal override if provided
        if let Some(portal) = opts.portal_ref() {
            config.portal_url = Some(portal.to_string());
        }

        config.validate_auth()?;

        let portal_url = config.portal_url.clone().expect("validated above");
        let token = config.token.clone().expect("validated above");
        let client = Arc::new(PortalClient::new(portal_url, token)?);

        Ok(Self {
            client,
            format: opts.format,
        })
    }
}
