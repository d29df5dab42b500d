//! Organization command implementations

use tabled::Tabled;

use crate::cli::{CommandContext, GlobalOptions, OutputFormat};
use crate::client::{Organization, OrganizationApi};
use crate::error::Result;
use crate::output::{json, table};

/// Organization for table display
#[derive(Tabled)]
struct OrgDisplay {
    #[tabled(rename = "ORG ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
}

impl From<Organization> for OrgDisplay {
    fn from(org: Organization) -> Self {
        Self {
            id: org.org_id,
            name: org.org_name,
        }
    }
}

/// Run the org list command
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let orgs = ctx.client.list_organizations().await?;

    match ctx.format {
        OutputFormat::Table => {
            let display_orgs: Vec<OrgDisplay> = orgs.into_iter().map(OrgDisplay::from).collect();
            println!("{}", table::format_table(&display_orgs));
        }
        OutputFormat::Json => {
            println!("{}", json::format_json(&orgs)?);
        }
    }

    Ok(())
}
