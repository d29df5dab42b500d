//! Consumer management commands
//!
//! Each handler drives a [`ConsumerScreen`] and renders its notices, so the
//! CLI surfaces exactly the state transitions the screen defines.

use std::time::Duration;

use colored::Colorize;
use dialoguer::{Confirm, Input, MultiSelect, Select, theme::ColorfulTheme};
use indicatif::ProgressBar;
use tabled::Tabled;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::{ConsumerEntry, PortalClient};
use crate::error::Result;
use crate::output::{json, table};
use crate::screen::{ConsumerScreen, Notice};

/// Consumer for table display
#[derive(Tabled)]
struct ConsumerDisplay {
    #[tabled(rename = "APP ID")]
    app_id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "OWNER")]
    owner: String,
    #[tabled(rename = "DEPARTMENT")]
    department: String,
    #[tabled(rename = "CREATED")]
    created: String,
}

impl From<&ConsumerEntry> for ConsumerDisplay {
    fn from(entry: &ConsumerEntry) -> Self {
        Self {
            app_id: entry.app_id.clone(),
            name: entry.name.clone().unwrap_or_else(|| "-".to_string()),
            owner: entry.owner_name.clone().unwrap_or_else(|| "-".to_string()),
            department: entry.org_name.clone().unwrap_or_else(|| "-".to_string()),
            created: entry
                .created_at
                .map(|at| at.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Render queued notices the way the portal UI toasts them
fn print_notices(screen: &mut ConsumerScreen<PortalClient>) {
    for notice in screen.drain_notices() {
        match &notice {
            Notice::Success(_) => println!("{} {}", "✓".green(), notice.message()),
            Notice::Warning(_) => eprintln!("{} {}", "⚠".yellow(), notice.message()),
            Notice::Error(_) => eprintln!("{} {}", "✗".red(), notice.message()),
        }
    }
}

/// Run the consumer list command
pub async fn list(opts: &GlobalOptions, all: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut screen = ConsumerScreen::new(ctx.client.clone());

    if all {
        let spinner = ProgressBar::new_spinner();
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner.set_message("Fetching consumers...");

        loop {
            let before = screen.page();
            screen.load_next_page().await;
            spinner.set_message(format!("Fetched {} consumers", screen.consumers().len()));

            // Stop on exhaustion, and on failure (the cursor did not move)
            if !screen.has_more() || screen.page() == before {
                break;
            }
        }

        spinner.finish_and_clear();
    } else {
        screen.load_next_page().await;
    }

    print_notices(&mut screen);

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<ConsumerDisplay> =
                screen.consumers().iter().map(ConsumerDisplay::from).collect();
            println!("{}", table::format_table(&rows));

            if screen.has_more() {
                println!(
                    "{}",
                    "More consumers available; rerun with --all to fetch everything.".dimmed()
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(screen.consumers())?);
        }
    }

    Ok(())
}

/// Run the consumer create command
pub async fn create(
    opts: &GlobalOptions,
    app_id: Option<String>,
    owner: Option<String>,
    org: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut screen = ConsumerScreen::new(ctx.client.clone());

    screen.activate().await;
    print_notices(&mut screen);

    if !screen.is_root() {
        println!(
            "{}",
            "Note: the portal reports no root permission; the request may be rejected.".dimmed()
        );
    }

    screen.draft.app_id = match app_id {
        Some(app_id) => app_id,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt("App id to register")
            .interact_text()?,
    };

    let selected_org = match org {
        Some(id) => screen.org_options().iter().find(|o| o.id == id).cloned(),
        None if screen.org_options().is_empty() => None,
        None => {
            let labels: Vec<&str> = screen.org_options().iter().map(|o| o.text.as_str()).collect();
            let index = Select::with_theme(&ColorfulTheme::default())
                .with_prompt("Department")
                .items(&labels)
                .default(0)
                .interact_opt()?;
            index.map(|i| screen.org_options()[i].clone())
        }
    };

    let owner = match owner {
        Some(owner) => Some(owner),
        None => {
            let input: String = Input::with_theme(&ColorfulTheme::default())
                .with_prompt("Owner user name")
                .allow_empty(true)
                .interact_text()?;
            if input.is_empty() { None } else { Some(input) }
        }
    };

    screen
        .create_consumer(selected_org.as_ref(), owner.as_deref())
        .await;
    print_notices(&mut screen);

    if let Some(token) = screen.token_display() {
        println!("Token: {}", token.bold());
    }

    Ok(())
}

/// Run the consumer delete command
pub async fn delete(opts: &GlobalOptions, app_id: String, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut screen = ConsumerScreen::new(ctx.client.clone());

    screen.stage_delete(ConsumerEntry {
        app_id,
        ..Default::default()
    });

    if screen.delete_dialog_open() {
        let target = screen
            .operation_target()
            .map(|entry| entry.app_id.clone())
            .unwrap_or_default();

        let confirmed = yes
            || Confirm::with_theme(&ColorfulTheme::default())
                .with_prompt(format!("Delete consumer {}?", target))
                .default(false)
                .interact()?;

        if confirmed {
            screen.confirm_delete().await;
        } else {
            screen.dismiss_delete_dialog();
            println!("Aborted.");
        }
    }

    print_notices(&mut screen);
    Ok(())
}

/// Run the consumer token command
pub async fn token(opts: &GlobalOptions, app_id: String) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut screen = ConsumerScreen::new(ctx.client.clone());

    screen.draft.app_id = app_id;
    screen.lookup_token().await;
    print_notices(&mut screen);

    if let Some(display) = screen.token_display() {
        match ctx.format {
            OutputFormat::Table => println!("Token: {}", display.bold()),
            OutputFormat::Json => {
                println!(
                    "{}",
                    json::format_json(&serde_json::json!({ "token": display }))?
                );
            }
        }
    }

    Ok(())
}

/// Run the consumer grant command
pub async fn grant(
    opts: &GlobalOptions,
    app_id: String,
    namespace: String,
    envs: Vec<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let mut screen = ConsumerScreen::new(ctx.client.clone());

    screen.activate().await;
    print_notices(&mut screen);

    let entry = ConsumerEntry {
        app_id: app_id.clone(),
        ..Default::default()
    };
    screen.open_grant_dialog(&entry).await;
    print_notices(&mut screen);

    if !screen.grant_dialog_open() {
        return Ok(());
    }

    screen.role_request.app_id = app_id;
    screen.role_request.namespace_name = namespace;

    if envs.is_empty() {
        if screen.envs().is_empty() {
            println!("{}", "No environments available to scope the grant.".dimmed());
        } else {
            let labels: Vec<String> =
                screen.envs().iter().map(|toggle| toggle.env.clone()).collect();
            let picked = MultiSelect::with_theme(&ColorfulTheme::default())
                .with_prompt("Environments to grant access in")
                .items(&labels)
                .interact_opt()?;

            match picked {
                Some(indexes) => {
                    for index in indexes {
                        screen.toggle_env(index);
                    }
                }
                None => {
                    screen.dismiss_grant_dialog();
                    println!("Aborted.");
                    return Ok(());
                }
            }
        }
    } else {
        let names: Vec<String> = screen.envs().iter().map(|toggle| toggle.env.clone()).collect();
        for (index, name) in names.iter().enumerate() {
            if envs.contains(name) {
                screen.toggle_env(index);
            }
        }
    }

    if !screen.envs_checked().is_empty() {
        println!("Environments: {}", screen.envs_checked().join(", "));
    }

    if screen.role_request.token.is_empty() {
        eprintln!(
            "{} {}",
            "⚠".yellow(),
            "No token on record for this consumer; the portal will reject the grant."
        );
    }

    screen.grant_role().await;
    print_notices(&mut screen);

    Ok(())
}
