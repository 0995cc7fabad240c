//! Operations layer for the Warden CLI.
//!
//! Wraps [`warden_client::WardenClient`] with configuration management and
//! wires it into the `warden-settings` workflows, applying the configured
//! feature access rules.

mod api;
mod config;
mod error;

pub use config::{FeaturesConfig, OpsConfig};
pub use error::OpsError;

use std::sync::Arc;

use tracing::debug;
use warden_client::{WardenClient, WardenClientBuilder};
use warden_core::ApplicationId;
use warden_settings::{
    InboundProvisioningSettings, NotificationSink, OrganizationEditor, RemoteLoggingSettings,
    SmsProviderSettings,
};

/// Re-export client, core and settings types for consumers.
pub use warden_client;
pub use warden_core;
pub use warden_settings;

/// High-level operations client.
///
/// Cheap to clone; every workflow built from it shares one HTTP client.
#[derive(Clone)]
pub struct OpsClient {
    inner: Arc<WardenClient>,
    config: Arc<OpsConfig>,
}

impl OpsClient {
    /// Create a new operations client from configuration.
    pub fn from_config(config: &OpsConfig) -> Result<Self, OpsError> {
        if config.endpoint.trim().is_empty() {
            return Err(OpsError::Configuration("endpoint must not be empty".into()));
        }

        let mut builder = WardenClientBuilder::new(&config.endpoint);

        if let Some(ref tenant) = config.tenant {
            builder = builder.tenant(tenant.as_str());
        }

        if let Some(ref timeout) = config.timeout {
            builder = builder.timeout(*timeout);
        }

        if let Some(ref token) = config.token {
            builder = builder.access_token(token);
        }

        let client = builder.build()?;
        debug!(
            endpoint = %config.endpoint,
            tenant = config.tenant.as_deref().unwrap_or("-"),
            "warden client configured"
        );

        Ok(Self {
            inner: Arc::new(client),
            config: Arc::new(config.clone()),
        })
    }

    /// Access the underlying HTTP client directly.
    pub fn client(&self) -> &WardenClient {
        &self.inner
    }

    pub fn config(&self) -> &OpsConfig {
        &self.config
    }

    /// SMS sender settings, read-only without the update scopes.
    pub fn sms_settings(&self, notifier: Arc<dyn NotificationSink>) -> SmsProviderSettings {
        let features = &self.config.features;
        SmsProviderSettings::new(Arc::new(self.clone()), notifier)
            .with_read_only(!self.config.update_granted(features.sms_providers.as_ref()))
    }

    /// Remote logging settings, read-only without the update scopes.
    pub fn remote_logging_settings(
        &self,
        notifier: Arc<dyn NotificationSink>,
    ) -> RemoteLoggingSettings {
        let features = &self.config.features;
        RemoteLoggingSettings::new(Arc::new(self.clone()), notifier)
            .with_read_only(!self.config.update_granted(features.remote_logging.as_ref()))
    }

    /// Inbound provisioning settings of one application.
    pub fn provisioning_settings(
        &self,
        notifier: Arc<dyn NotificationSink>,
        id: ApplicationId,
        forced_read_only: bool,
    ) -> InboundProvisioningSettings {
        let granted = self
            .config
            .update_granted(self.config.features.applications.as_ref());
        InboundProvisioningSettings::new(Arc::new(self.clone()), notifier, id)
            .with_access(forced_read_only, granted)
    }

    pub fn organization_editor(&self, notifier: Arc<dyn NotificationSink>) -> OrganizationEditor {
        OrganizationEditor::new(
            Arc::new(self.clone()),
            notifier,
            self.config.features.organizations.clone(),
        )
    }
}
