use std::sync::Arc;

use clap::{Args, Subcommand};
use warden_ops::OpsClient;
use warden_ops::warden_core::{ApplicationId, ProvisioningConfig};
use warden_ops::warden_settings::NotificationSink;

use crate::OutputFormat;
use crate::output::or_dash;

#[derive(Args, Debug)]
pub struct ProvisioningArgs {
    #[command(subcommand)]
    pub command: ProvisioningCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProvisioningCommand {
    /// Show the inbound provisioning configuration of an application.
    Show {
        /// Application ID.
        app_id: String,
    },
    /// Update the inbound provisioning configuration of an application.
    Set {
        /// Application ID.
        app_id: String,
        /// Enable proxy mode.
        #[arg(long)]
        proxy_mode: Option<bool>,
        /// User store domain provisioned users are stored in.
        #[arg(long)]
        userstore: Option<String>,
    },
}

fn print_config(config: &ProvisioningConfig, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Text => {
            let inbound = &config.inbound_provisioning;
            println!("Proxy mode:       {}", inbound.proxy_mode);
            println!(
                "User store:       {}",
                or_dash(inbound.provisioning_userstore_domain.as_deref())
            );
        }
    }
    Ok(())
}

pub async fn run(
    ops: &OpsClient,
    notifier: Arc<dyn NotificationSink>,
    args: &ProvisioningArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    match &args.command {
        ProvisioningCommand::Show { app_id } => {
            let mut settings =
                ops.provisioning_settings(notifier, ApplicationId::new(app_id.as_str()), true);
            let config = settings.load().await?;
            print_config(&config, format)?;
        }
        ProvisioningCommand::Set {
            app_id,
            proxy_mode,
            userstore,
        } => {
            let mut settings =
                ops.provisioning_settings(notifier, ApplicationId::new(app_id.as_str()), false);
            let mut config = settings.load().await?;
            if let Some(proxy_mode) = proxy_mode {
                config.inbound_provisioning.proxy_mode = *proxy_mode;
            }
            if userstore.is_some() {
                config
                    .inbound_provisioning
                    .provisioning_userstore_domain
                    .clone_from(userstore);
            }
            settings.submit(config).await?;
            if let Some(updated) = settings.config() {
                print_config(updated, format)?;
            }
        }
    }
    Ok(())
}
