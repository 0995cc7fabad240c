use std::sync::Arc;

use clap::{Args, Subcommand};
use warden_ops::OpsClient;
use warden_ops::warden_settings::NotificationSink;

use crate::OutputFormat;
use crate::output::or_dash;

#[derive(Args, Debug)]
pub struct OrgArgs {
    #[command(subcommand)]
    pub command: OrgCommand,
}

#[derive(Subcommand, Debug)]
pub enum OrgCommand {
    /// Show an organization and whether it can be edited.
    Show {
        /// Organization ID or console path ending in the ID.
        id: String,
    },
}

pub async fn run(
    ops: &OpsClient,
    notifier: Arc<dyn NotificationSink>,
    args: &OrgArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    match &args.command {
        OrgCommand::Show { id } => {
            let mut editor = ops.organization_editor(notifier);
            editor.load_from_path(id).await?;
            let Some(organization) = editor.organization() else {
                return Ok(());
            };

            match format {
                OutputFormat::Json => {
                    let value = serde_json::json!({
                        "organization": organization,
                        "authorized": editor.is_authorized(),
                        "readOnly": editor.is_read_only(),
                    });
                    println!("{}", serde_json::to_string_pretty(&value)?);
                }
                OutputFormat::Text => {
                    println!("ID:          {}", organization.id);
                    println!("Name:        {}", organization.name);
                    println!("Status:      {:?}", organization.status);
                    println!("Type:        {}", or_dash(organization.org_type.as_deref()));
                    println!("Description: {}", or_dash(organization.description.as_deref()));
                    println!("Editable:    {}", !editor.is_read_only());
                }
            }
        }
    }
    Ok(())
}
