//! Object-safe management API traits used by the settings workflows.
//!
//! Implementations live outside this crate: `warden-ops` adapts the HTTP
//! client, tests use in-memory fakes.

use async_trait::async_trait;
use warden_core::{
    ApplicationId, ApplicationProvisioning, AuthorizedOrganizations, LogType, Organization,
    OrganizationId, ProvisioningPatch, RemoteLogConfig, SmsProviderRecord,
};

use crate::error::ApiError;

/// SMS notification sender endpoints.
#[async_trait]
pub trait SmsProviderApi: Send + Sync {
    /// List the stored senders. An unconfigured tenant yields an empty list.
    async fn list_sms_providers(&self) -> Result<Vec<SmsProviderRecord>, ApiError>;

    /// Store a sender and return the persisted record.
    async fn update_sms_provider(
        &self,
        record: &SmsProviderRecord,
    ) -> Result<SmsProviderRecord, ApiError>;

    /// Remove the stored sender. A missing sender is [`ApiError::NotFound`].
    async fn delete_sms_providers(&self) -> Result<(), ApiError>;
}

/// Remote log publishing endpoints.
#[async_trait]
pub trait RemoteLoggingApi: Send + Sync {
    async fn list_remote_log_configs(&self) -> Result<Vec<RemoteLogConfig>, ApiError>;

    async fn update_remote_log_config(
        &self,
        log_type: LogType,
        config: &RemoteLogConfig,
    ) -> Result<(), ApiError>;

    async fn restore_remote_log_config(&self, log_type: LogType) -> Result<(), ApiError>;
}

/// Application endpoints used by the provisioning page.
#[async_trait]
pub trait ApplicationApi: Send + Sync {
    async fn get_application(&self, id: &ApplicationId)
    -> Result<ApplicationProvisioning, ApiError>;

    async fn update_application_configurations(
        &self,
        id: &ApplicationId,
        patch: &ProvisioningPatch,
    ) -> Result<(), ApiError>;
}

/// Organization endpoints.
#[async_trait]
pub trait OrganizationApi: Send + Sync {
    async fn get_organization(&self, id: &OrganizationId) -> Result<Organization, ApiError>;

    /// Organizations the session may manage, filtered server-side.
    async fn list_authorized_organizations(
        &self,
        filter: &str,
        limit: u32,
    ) -> Result<AuthorizedOrganizations, ApiError>;
}
