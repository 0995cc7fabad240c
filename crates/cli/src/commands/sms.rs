use std::sync::Arc;

use clap::{Args, Subcommand};
use warden_ops::OpsClient;
use warden_ops::warden_core::{ContentType, ProviderKind, SmsProvider};
use warden_ops::warden_settings::NotificationSink;

use crate::OutputFormat;
use crate::output::{masked, or_dash};

#[derive(Args, Debug)]
pub struct SmsArgs {
    #[command(subcommand)]
    pub command: SmsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SmsCommand {
    /// Show the configured SMS sender.
    Show,
    /// Replace the SMS sender configuration.
    Set(SetArgs),
    /// Delete the SMS sender configuration.
    Revert {
        /// Confirm the deletion.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Provider kind: twilio, vonage or custom.
    pub kind: ProviderKind,
    /// Account key (Twilio account SID, Vonage API key, custom auth key).
    #[arg(long)]
    pub key: Option<String>,
    /// Account secret.
    #[arg(long)]
    pub secret: Option<String>,
    /// Sender number or id.
    #[arg(long)]
    pub sender: Option<String>,
    /// Custom provider name.
    #[arg(long)]
    pub provider_name: Option<String>,
    /// Custom provider endpoint URL.
    #[arg(long)]
    pub url: Option<String>,
    /// Payload content type: json or form.
    #[arg(long)]
    pub content_type: Option<ContentType>,
    /// Payload template.
    #[arg(long)]
    pub payload: Option<String>,
    /// Extra request headers.
    #[arg(long)]
    pub headers: Option<String>,
    /// HTTP method.
    #[arg(long)]
    pub method: Option<String>,
}

impl SetArgs {
    /// Overlay the given flags on the currently stored values.
    fn apply(&self, mut values: SmsProvider) -> SmsProvider {
        if let Some(ref key) = self.key {
            values.key.clone_from(key);
        }
        if let Some(ref secret) = self.secret {
            values.secret.clone_from(secret);
        }
        if let Some(ref sender) = self.sender {
            values.sender.clone_from(sender);
        }
        if let Some(ref name) = self.provider_name {
            values.provider.clone_from(name);
        }
        if self.url.is_some() {
            values.provider_url.clone_from(&self.url);
        }
        if self.content_type.is_some() {
            values.content_type = self.content_type;
        }
        if self.payload.is_some() {
            values.payload.clone_from(&self.payload);
        }
        if self.headers.is_some() {
            values.headers.clone_from(&self.headers);
        }
        if self.method.is_some() {
            values.http_method.clone_from(&self.method);
        }
        values
    }
}

fn print_provider(provider: &SmsProvider, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "kind": provider.kind.to_string(),
                "provider": provider.provider,
                "key": provider.key,
                "secret": masked(Some(provider.secret.as_str())),
                "sender": provider.sender,
                "providerURL": provider.provider_url,
                "contentType": provider.content_type.map(|c| c.to_string()),
                "payload": provider.payload,
                "headers": provider.headers,
                "method": provider.http_method,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            println!("Provider:     {} ({})", or_dash(Some(provider.provider.as_str())), provider.kind);
            println!("Key:          {}", or_dash(Some(provider.key.as_str())));
            println!("Secret:       {}", masked(Some(provider.secret.as_str())));
            println!("Sender:       {}", or_dash(Some(provider.sender.as_str())));
            if provider.kind == ProviderKind::Custom {
                println!("URL:          {}", or_dash(provider.provider_url.as_deref()));
                println!(
                    "Content type: {}",
                    provider
                        .content_type
                        .map_or_else(|| "-".to_owned(), |c| c.to_string())
                );
                println!("Payload:      {}", or_dash(provider.payload.as_deref()));
                println!("Headers:      {}", or_dash(provider.headers.as_deref()));
                println!("Method:       {}", or_dash(provider.http_method.as_deref()));
            }
        }
    }
    Ok(())
}

pub async fn run(
    ops: &OpsClient,
    notifier: Arc<dyn NotificationSink>,
    args: &SmsArgs,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let mut settings = ops.sms_settings(notifier);
    settings.load().await?;

    match &args.command {
        SmsCommand::Show => {
            if let Some(values) = settings.initial_values() {
                print_provider(values, format)?;
            }
        }
        SmsCommand::Set(set) => {
            settings.select_provider(set.kind);
            let current = settings.state().provider_params(set.kind).clone();
            let values = set.apply(current);
            let confirmed = settings.submit(values).await?;
            print_provider(&confirmed, format)?;
        }
        SmsCommand::Revert { yes } => {
            if !yes {
                anyhow::bail!("reverting deletes the SMS sender; pass --yes to confirm");
            }
            settings.revert().await?;
        }
    }
    Ok(())
}
