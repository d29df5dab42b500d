//! Environment command implementations

use tabled::Tabled;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::EnvironmentApi;
use crate::error::Result;
use crate::output::{json, table};

/// Environment for table display
#[derive(Tabled)]
struct EnvDisplay {
    #[tabled(rename = "ENVIRONMENT")]
    environment: String,
}

/// Run the env list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let envs = ctx.client.list_environments().await?;

    match ctx.format {
        OutputFormat::Table => {
            let display_envs: Vec<EnvDisplay> = envs
                .into_iter()
                .map(|environment| EnvDisplay { environment })
                .collect();
            println!("{}", table::format_table(&display_envs));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&envs)?);
        }
    }

    Ok(())
}
