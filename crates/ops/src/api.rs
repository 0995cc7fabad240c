//! Management API traits implemented over the HTTP client.

use async_trait::async_trait;
use warden_client::Error as ClientError;
use warden_core::{
    ApplicationId, ApplicationProvisioning, AuthorizedOrganizations, LogType, Organization,
    OrganizationId, ProvisioningPatch, RemoteLogConfig, SMS_PUBLISHER_NAME, SmsProviderRecord,
};
use warden_settings::{
    ApiError, ApplicationApi, OrganizationApi, RemoteLoggingApi, SmsProviderApi,
};

use crate::OpsClient;

/// Translate a client error into the workflow error taxonomy.
pub(crate) fn api_error(err: ClientError) -> ApiError {
    match err {
        ClientError::Api {
            status: 404,
            description,
            ..
        } => ApiError::NotFound { description },
        ClientError::Http { status: 404, .. } => ApiError::NotFound { description: None },
        ClientError::Connection(message) | ClientError::Configuration(message) => {
            ApiError::Transport(message)
        }
        ClientError::Deserialization(message) => ApiError::Decode(message),
        ClientError::Http { status, message } => ApiError::Rejected {
            status,
            message,
            description: None,
        },
        ClientError::Api {
            status,
            message,
            description,
            ..
        } => ApiError::Rejected {
            status,
            message,
            description,
        },
    }
}

#[async_trait]
impl SmsProviderApi for OpsClient {
    async fn list_sms_providers(&self) -> Result<Vec<SmsProviderRecord>, ApiError> {
        self.client().list_sms_providers().await.map_err(api_error)
    }

    async fn update_sms_provider(
        &self,
        record: &SmsProviderRecord,
    ) -> Result<SmsProviderRecord, ApiError> {
        self.client()
            .create_sms_provider(record)
            .await
            .map_err(api_error)
    }

    async fn delete_sms_providers(&self) -> Result<(), ApiError> {
        self.client()
            .delete_sms_provider(SMS_PUBLISHER_NAME)
            .await
            .map_err(api_error)
    }
}

#[async_trait]
impl RemoteLoggingApi for OpsClient {
    async fn list_remote_log_configs(&self) -> Result<Vec<RemoteLogConfig>, ApiError> {
        self.client().list_remote_log_configs().await.map_err(api_error)
    }

    async fn update_remote_log_config(
        &self,
        log_type: LogType,
        config: &RemoteLogConfig,
    ) -> Result<(), ApiError> {
        self.client()
            .update_remote_log_config(log_type, config)
            .await
            .map_err(api_error)
    }

    async fn restore_remote_log_config(&self, log_type: LogType) -> Result<(), ApiError> {
        self.client()
            .restore_remote_log_config(log_type)
            .await
            .map_err(api_error)
    }
}

#[async_trait]
impl ApplicationApi for OpsClient {
    async fn get_application(
        &self,
        id: &ApplicationId,
    ) -> Result<ApplicationProvisioning, ApiError> {
        self.client().get_application(id).await.map_err(api_error)
    }

    async fn update_application_configurations(
        &self,
        id: &ApplicationId,
        patch: &ProvisioningPatch,
    ) -> Result<(), ApiError> {
        self.client()
            .update_application_configurations(id, patch)
            .await
            .map_err(api_error)
    }
}

#[async_trait]
impl OrganizationApi for OpsClient {
    async fn get_organization(&self, id: &OrganizationId) -> Result<Organization, ApiError> {
        self.client().get_organization(id).await.map_err(api_error)
    }

    async fn list_authorized_organizations(
        &self,
        filter: &str,
        limit: u32,
    ) -> Result<AuthorizedOrganizations, ApiError> {
        self.client()
            .list_authorized_organizations(filter, limit)
            .await
            .map_err(api_error)
    }
}
