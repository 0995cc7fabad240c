//! Warden CLI
//!
//! Manage identity server settings from the command line: the SMS
//! notification sender, remote log publishing, application inbound
//! provisioning and organizations.

mod commands;
mod output;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};
use warden_ops::warden_settings::{NotificationSink, TracingSink};
use warden_ops::{OpsClient, OpsConfig};

use crate::output::ConsoleSink;

/// Warden CLI: manage identity server settings.
#[derive(Parser, Debug)]
#[command(name = "warden", version, about)]
struct Cli {
    /// TOML configuration file. Flags override its values.
    #[arg(long, env = "WARDEN_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Identity server endpoint URL.
    #[arg(long, env = "WARDEN_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Tenant domain. Omit for the super tenant.
    #[arg(long, env = "WARDEN_TENANT", global = true)]
    tenant: Option<String>,

    /// OAuth2 access token.
    #[arg(long, env = "WARDEN_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Space-separated scopes granted to the token.
    #[arg(long, env = "WARDEN_SCOPES", global = true)]
    scopes: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, env = "WARDEN_TIMEOUT_SECS", global = true)]
    timeout_secs: Option<u64>,

    /// Output format.
    #[arg(long, default_value = "text", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage the SMS notification sender.
    Sms(commands::sms::SmsArgs),
    /// Manage remote log publishing.
    Logging(commands::logging::LoggingArgs),
    /// Manage application inbound provisioning.
    Provisioning(commands::provisioning::ProvisioningArgs),
    /// Inspect organizations.
    Org(commands::organizations::OrgArgs),
}

impl Cli {
    fn ops_config(&self) -> anyhow::Result<OpsConfig> {
        let mut config = match &self.config {
            Some(path) => OpsConfig::from_file(path)?,
            None => OpsConfig::from_env(),
        };
        if let Some(ref endpoint) = self.endpoint {
            config = config.with_endpoint(endpoint);
        }
        if let Some(ref tenant) = self.tenant {
            config = config.with_tenant(tenant);
        }
        if let Some(ref token) = self.token {
            config = config.with_token(token);
        }
        if let Some(ref scopes) = self.scopes {
            config = config.with_scopes(scopes);
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = cli.ops_config()?;
    tracing::debug!(?config, "resolved configuration");
    let ops = OpsClient::from_config(&config)?;

    // JSON output keeps stdout machine-readable; alerts go to the log.
    let notifier: Arc<dyn NotificationSink> = match cli.format {
        OutputFormat::Text => Arc::new(ConsoleSink),
        OutputFormat::Json => Arc::new(TracingSink),
    };

    match &cli.command {
        Command::Sms(args) => commands::sms::run(&ops, notifier, args, &cli.format).await,
        Command::Logging(args) => commands::logging::run(&ops, notifier, args, &cli.format).await,
        Command::Provisioning(args) => {
            commands::provisioning::run(&ops, notifier, args, &cli.format).await
        }
        Command::Org(args) => {
            commands::organizations::run(&ops, notifier, args, &cli.format).await
        }
    }
}
