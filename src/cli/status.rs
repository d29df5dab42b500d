//! Status command implementation

use colored::Colorize;

use crate::cli::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "Portalops Configuration Status".bold());

    match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            let config_path = Config::resolve_path(opts.config_ref())?;
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            match config.portal_url {
                Some(ref url) => println!("{} Portal URL: {}", "✓".green(), url),
                None => {
                    println!("{} Portal URL not configured", "✗".red());
                    println!("  → Run 'portalops init' to configure");
                }
            }

            if config.token.is_some() {
                println!("{} Portal token configured", "✓".green());
            } else {
                println!("{} Portal token not configured", "✗".red());
                println!("  → Run 'portalops init' to configure");
            }

            if let Some(ref format) = config.preferences.format {
                println!("{} Default output format: {}", "○".dimmed(), format);
            }

            println!();
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "portalops init".cyan()
            );
            println!();
        }
    }

    Ok(())
}
