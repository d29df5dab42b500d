//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::cli::GlobalOptions;
use crate::client::{OrganizationApi, PortalClient};
use crate::config::Config;
use crate::error::Result;

/// Run the init command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to portalops!".bold().green());
    println!("Let's set up your portal connection.\n");

    // Portal URL: use the --portal override when given, otherwise prompt
    let portal_url = match opts.portal_ref() {
        Some(url) => url.to_string(),
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Portal open-platform API URL")
            .interact_text()?,
    };

    let token: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Enter your portal authorization token")
        .interact()?;

    // Verify the pair by hitting the organization directory
    println!("\n{}", "Verifying connection...".cyan());
    let client = PortalClient::new(portal_url.clone(), token.clone())?;
    let orgs = client.list_organizations().await?;
    println!(
        "{}",
        format!("✓ Connected; {} organizations visible.", orgs.len()).green()
    );

    let mut config = Config::load_at(opts.config_ref()).unwrap_or_default();
    config.portal_url = Some(portal_url);
    config.token = Some(token);
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!(
        "  {} - Show configuration status",
        "portalops status".cyan()
    );
    println!(
        "  {} - List registered consumers",
        "portalops consumer list".cyan()
    );

    Ok(())
}
