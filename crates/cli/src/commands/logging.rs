use std::sync::Arc;

use clap::{Args, Subcommand};
use warden_ops::OpsClient;
use warden_ops::warden_core::{LogType, RemoteLogForm};
use warden_ops::warden_settings::{NotificationSink, RemoteLoggingSettings};

use crate::OutputFormat;
use crate::output::{masked, or_dash};

#[derive(Args, Debug)]
pub struct LoggingArgs {
    #[command(subcommand)]
    pub command: LoggingCommand,
}

#[derive(Subcommand, Debug)]
pub enum LoggingCommand {
    /// Show remote log publishing configuration.
    Show {
        /// Only this log type (audit or debug).
        log_type: Option<LogType>,
    },
    /// Update remote log publishing for a log type.
    Set(SetArgs),
    /// Restore the server defaults for a log type.
    Restore {
        /// Log type (audit or debug).
        log_type: LogType,
        /// Confirm the restore.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Log type (audit or debug).
    pub log_type: LogType,
    /// Destination endpoint URL.
    #[arg(long)]
    pub url: Option<String>,
    /// Connection timeout in milliseconds.
    #[arg(long)]
    pub timeout_ms: Option<String>,
    /// Verify the destination hostname.
    #[arg(long)]
    pub verify_hostname: Option<bool>,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long)]
    pub keystore_location: Option<String>,
    #[arg(long)]
    pub keystore_password: Option<String>,
    #[arg(long)]
    pub truststore_location: Option<String>,
    #[arg(long)]
    pub truststore_password: Option<String>,
}

impl SetArgs {
    fn apply(&self, mut form: RemoteLogForm) -> RemoteLogForm {
        if let Some(ref url) = self.url {
            form.remote_url.clone_from(url);
        }
        if let Some(verify) = self.verify_hostname {
            form.verify_hostname = verify;
        }
        let overrides = [
            (&mut form.connect_timeout_millis, &self.timeout_ms),
            (&mut form.username, &self.username),
            (&mut form.password, &self.password),
            (&mut form.keystore_location, &self.keystore_location),
            (&mut form.keystore_password, &self.keystore_password),
            (&mut form.truststore_location, &self.truststore_location),
            (&mut form.truststore_password, &self.truststore_password),
        ];
        for (field, value) in overrides {
            if value.is_some() {
                field.clone_from(value);
            }
        }
        form
    }
}

fn print_config(
    settings: &RemoteLoggingSettings,
    log_types: &[LogType],
    format: &OutputFormat,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let entries: Vec<_> = log_types
                .iter()
                .map(|&log_type| {
                    let form = settings.form_for(log_type);
                    serde_json::json!({
                        "logType": log_type.as_str(),
                        "configured": settings.config_for(log_type).is_some_and(|c| !c.is_unset()),
                        "remoteUrl": form.remote_url,
                        "connectTimeoutMillis": form.connect_timeout_millis,
                        "verifyHostname": form.verify_hostname,
                        "username": form.username,
                        "password": masked(form.password.as_deref()),
                        "keystoreLocation": form.keystore_location,
                        "truststoreLocation": form.truststore_location,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Text => {
            for &log_type in log_types {
                let form = settings.form_for(log_type);
                println!("{log_type}:");
                println!("  URL:             {}", or_dash(Some(form.remote_url.as_str())));
                println!(
                    "  Timeout (ms):    {}",
                    or_dash(form.connect_timeout_millis.as_deref())
                );
                println!("  Verify hostname: {}", form.verify_hostname);
                println!("  Username:        {}", or_dash(form.username.as_deref()));
                println!("  Password:        {}", masked(form.password.as_deref()));
                println!("  Keystore:        {}", or_dash(form.keystore_location.as_deref()));
                println!(
                    "  Truststore:      {}",
                    or_dash(form.truststore_location.as_deref())
                );
            }
        }
    }
    Ok(())
}

pub async fn run(
    ops: &OpsClient,
    notifier: Arc<dyn NotificationSink>,
    args: &LoggingArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let mut settings = ops.remote_logging_settings(notifier);
    settings.load().await?;

    match &args.command {
        LoggingCommand::Show { log_type } => {
            let log_types = log_type.map_or(LogType::ALL.to_vec(), |t| vec![t]);
            print_config(&settings, &log_types, format)?;
        }
        LoggingCommand::Set(set) => {
            let form = set.apply(settings.form_for(set.log_type));
            settings.update(set.log_type, &form).await?;
            print_config(&settings, &[set.log_type], format)?;
        }
        LoggingCommand::Restore { log_type, yes } => {
            if !settings.is_read_only() && !settings.can_restore(*log_type) {
                anyhow::bail!("{log_type} remote logging has no stored configuration to restore");
            }
            if !yes {
                anyhow::bail!("restoring discards the {log_type} configuration; pass --yes to confirm");
            }
            settings.restore(*log_type).await?;
        }
    }
    Ok(())
}
