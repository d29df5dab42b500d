//! Global CLI options shared across all commands

use crate::cli::Cli;

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per entry (global default)
    #[default]
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}

/// Global CLI options passed to all command handlers.
///
/// Consolidates the global flags from the CLI into a single unit so handler
/// signatures stay small. Precedence: CLI flag > environment variable >
/// config file > default.
#[derive(Debug, Clone)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Portal base URL override (bypasses config file)
    pub portal: Option<String>,

    /// Custom config file path (defaults to ~/.portalops/config.yaml)
    pub config: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            portal: cli.portal.clone(),
            config: cli.config.clone(),
        }
    }

    /// Get the portal override as `Option<&str>`.
    pub fn portal_ref(&self) -> Option<&str> {
        self.portal.as_deref()
    }

    /// Get the config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }
}
