//! Portalops CLI - companion for administering open-platform API consumers

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod output;
mod screen;

use cli::{Cli, Commands, ConsumerCommands, EnvCommands, GlobalOptions, OrgCommands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Completions { shell } => cli::completions::run(shell),
        Commands::Org(org_cmd) => match org_cmd {
            OrgCommands::List => cli::org::list(&opts).await,
        },
        Commands::Env(env_cmd) => match env_cmd {
            EnvCommands::List => cli::env::list(&opts).await,
        },
        Commands::Consumer(consumer_cmd) => match consumer_cmd {
            ConsumerCommands::List { all } => cli::consumer::list(&opts, all).await,
            ConsumerCommands::Create { app_id, owner, org } => {
                cli::consumer::create(&opts, app_id, owner, org).await
            }
            ConsumerCommands::Delete { app_id, yes } => {
                cli::consumer::delete(&opts, app_id, yes).await
            }
            ConsumerCommands::Token { app_id } => cli::consumer::token(&opts, app_id).await,
            ConsumerCommands::Grant {
                app_id,
                namespace,
                envs,
            } => cli::consumer::grant(&opts, app_id, namespace, envs).await,
        },
    }
}
