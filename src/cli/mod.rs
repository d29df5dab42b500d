//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod completions;
pub mod consumer;
pub mod context;
pub mod env;
pub mod init;
pub mod org;
pub mod status;

pub use args::{GlobalOptions, OutputFormat};
pub use context::CommandContext;

/// Portalops CLI - companion for administering open-platform API consumers
#[derive(Parser, Debug)]
#[command(name = "portalops")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "PORTALOPS_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override the portal base URL
    #[arg(long, global = true, env = "PORTALOPS_PORTAL_URL", hide_env = true)]
    pub portal: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "PORTALOPS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "PORTALOPS_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize portalops configuration
    Init,

    /// Show configuration status
    Status,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// List organizations
    #[command(subcommand)]
    Org(OrgCommands),

    /// List deployment environments
    #[command(subcommand)]
    Env(EnvCommands),

    /// Manage API consumers
    #[command(subcommand)]
    Consumer(ConsumerCommands),
}

/// Organization subcommands
#[derive(Subcommand, Debug)]
pub enum OrgCommands {
    /// List organizations
    List,
}

/// Environment subcommands
#[derive(Subcommand, Debug)]
pub enum EnvCommands {
    /// List environments
    List,
}

/// Consumer subcommands
#[derive(Subcommand, Debug)]
pub enum ConsumerCommands {
    /// List registered consumers page by page
    List {
        /// Keep fetching until the directory is exhausted
        #[arg(long)]
        all: bool,
    },

    /// Register a new consumer and receive its token
    Create {
        /// App id to register (prompted when omitted)
        #[arg(long)]
        app_id: Option<String>,

        /// Owner user name (prompted when omitted)
        #[arg(long)]
        owner: Option<String>,

        /// Organization id (picked interactively when omitted)
        #[arg(long)]
        org: Option<String>,
    },

    /// Delete a consumer
    Delete {
        /// App id of the consumer to delete
        app_id: String,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Look up a consumer's access token
    Token {
        /// App id to look up
        app_id: String,
    },

    /// Grant a namespace role to a consumer
    Grant {
        /// App id of the consumer to grant to
        app_id: String,

        /// Namespace to grant access to
        #[arg(long)]
        namespace: String,

        /// Environments to scope the grant to (picked interactively when omitted)
        #[arg(long = "env")]
        envs: Vec<String>,
    },
}
