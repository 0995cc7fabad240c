//! Inbound provisioning settings of a single application.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};
use warden_core::{ApplicationId, ProvisioningConfig, ProvisioningPatch};

use crate::api::ApplicationApi;
use crate::busy::BusyFlag;
use crate::error::{ApiError, SubmissionError};
use crate::fetcher::{ConfigFetcher, ConfigSource};
use crate::notify::{Alert, NotificationSink};

/// Loads the provisioning block of one application.
pub struct ApplicationProvisioningSource {
    api: Arc<dyn ApplicationApi>,
    id: ApplicationId,
}

#[async_trait]
impl ConfigSource for ApplicationProvisioningSource {
    type Output = ProvisioningConfig;

    fn label(&self) -> &str {
        self.id.as_str()
    }

    async fn load(&self) -> Result<Self::Output, ApiError> {
        let application = self.api.get_application(&self.id).await?;
        Ok(application.provisioning_configurations)
    }
}

pub struct InboundProvisioningSettings {
    api: Arc<dyn ApplicationApi>,
    notifier: Arc<dyn NotificationSink>,
    fetcher: ConfigFetcher<ApplicationProvisioningSource>,
    read_only: bool,
    submitting: BusyFlag,
}

impl InboundProvisioningSettings {
    pub fn new(
        api: Arc<dyn ApplicationApi>,
        notifier: Arc<dyn NotificationSink>,
        id: ApplicationId,
    ) -> Self {
        Self {
            fetcher: ConfigFetcher::new(ApplicationProvisioningSource {
                api: Arc::clone(&api),
                id,
            }),
            api,
            notifier,
            read_only: false,
            submitting: BusyFlag::new(),
        }
    }

    /// Read-only when forced by the caller or when the session lacks the
    /// application update scopes.
    #[must_use]
    pub fn with_access(mut self, forced_read_only: bool, update_granted: bool) -> Self {
        self.read_only = forced_read_only || !update_granted;
        self
    }

    pub fn application_id(&self) -> &ApplicationId {
        &self.fetcher.source().id
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn submitting(&self) -> BusyFlag {
        self.submitting.clone()
    }

    pub fn config(&self) -> Option<&ProvisioningConfig> {
        self.fetcher.resource().data()
    }

    pub async fn load(&mut self) -> Result<ProvisioningConfig, ApiError> {
        self.fetcher.fetch().await.inspect_err(|err| {
            error!(error = %err, "failed to load application provisioning configuration");
            self.notifier.notify(Alert::error(
                "Retrieval error",
                "An error occurred while retrieving the application details.",
            ));
        })
    }

    #[instrument(skip_all, fields(application = %self.application_id()))]
    pub async fn submit(&mut self, config: ProvisioningConfig) -> Result<(), SubmissionError> {
        if self.read_only {
            return Err(SubmissionError::ReadOnly);
        }

        let _submitting = self.submitting.raise();
        let id = self.application_id().clone();
        let patch = ProvisioningPatch::from(config);

        match self.api.update_application_configurations(&id, &patch).await {
            Ok(()) => {
                info!("inbound provisioning configuration updated");
                self.notifier.notify(Alert::success(
                    "Update successful",
                    "Successfully updated the provisioning configurations.",
                ));
                if let Err(err) = self.fetcher.mutate().await {
                    error!(error = %err, "failed to reload application after update");
                }
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to update inbound provisioning configuration");
                self.notifier.notify(Alert::error(
                    "Something went wrong",
                    "Couldn't update the provisioning configurations.",
                ));
                Err(SubmissionError::Update(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use warden_core::{ApplicationProvisioning, InboundProvisioning};

    use super::*;
    use crate::notify::{AlertLevel, MemorySink};

    #[derive(Default)]
    struct FakeApplications {
        config: Mutex<ProvisioningConfig>,
        fail_update: Mutex<bool>,
        patches: Mutex<Vec<(String, ProvisioningPatch)>>,
    }

    #[async_trait]
    impl ApplicationApi for FakeApplications {
        async fn get_application(
            &self,
            id: &ApplicationId,
        ) -> Result<ApplicationProvisioning, ApiError> {
            Ok(ApplicationProvisioning {
                id: id.to_string(),
                name: "Portal".into(),
                provisioning_configurations: self.config.lock().unwrap().clone(),
            })
        }

        async fn update_application_configurations(
            &self,
            id: &ApplicationId,
            patch: &ProvisioningPatch,
        ) -> Result<(), ApiError> {
            if *self.fail_update.lock().unwrap() {
                return Err(ApiError::Rejected {
                    status: 400,
                    message: "Invalid".into(),
                    description: None,
                });
            }
            self.patches
                .lock()
                .unwrap()
                .push((id.to_string(), patch.clone()));
            *self.config.lock().unwrap() = patch.provisioning_configurations.clone();
            Ok(())
        }
    }

    fn proxy(domain: &str) -> ProvisioningConfig {
        ProvisioningConfig {
            inbound_provisioning: InboundProvisioning {
                proxy_mode: true,
                provisioning_userstore_domain: Some(domain.into()),
            },
        }
    }

    fn settings(api: &Arc<FakeApplications>) -> (InboundProvisioningSettings, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let settings = InboundProvisioningSettings::new(
            Arc::clone(api) as Arc<dyn ApplicationApi>,
            Arc::clone(&sink) as Arc<dyn NotificationSink>,
            ApplicationId::new("app-1"),
        );
        (settings, sink)
    }

    #[tokio::test]
    async fn submit_patches_and_reloads() {
        let api = Arc::new(FakeApplications::default());
        let (mut settings, sink) = settings(&api);
        settings.load().await.unwrap();

        settings.submit(proxy("SECONDARY")).await.unwrap();

        let patches = api.patches.lock().unwrap().clone();
        assert_eq!(patches, vec![("app-1".to_owned(), ProvisioningPatch::from(proxy("SECONDARY")))]);
        assert_eq!(settings.config(), Some(&proxy("SECONDARY")));
        assert_eq!(sink.alerts()[0].level, AlertLevel::Success);
        assert!(!settings.submitting().is_raised());
    }

    #[tokio::test]
    async fn failed_submit_alerts_and_clears_flag() {
        let api = Arc::new(FakeApplications::default());
        *api.fail_update.lock().unwrap() = true;
        let (mut settings, sink) = settings(&api);

        let err = settings.submit(proxy("PRIMARY")).await.unwrap_err();

        assert!(matches!(err, SubmissionError::Update(_)));
        assert_eq!(sink.alerts()[0].level, AlertLevel::Error);
        assert!(!settings.submitting().is_raised());
    }

    #[tokio::test]
    async fn missing_scope_makes_it_read_only() {
        let api = Arc::new(FakeApplications::default());
        let (settings, _) = settings(&api);
        let mut settings = settings.with_access(false, false);

        assert!(settings.is_read_only());
        assert!(matches!(
            settings.submit(proxy("PRIMARY")).await,
            Err(SubmissionError::ReadOnly)
        ));
        assert!(api.patches.lock().unwrap().is_empty());
    }

    #[test]
    fn forced_read_only_wins() {
        let api = Arc::new(FakeApplications::default());
        let (settings, _) = settings(&api);
        assert!(settings.with_access(true, true).is_read_only());
    }
}
