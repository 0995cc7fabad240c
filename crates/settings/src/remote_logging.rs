//! Remote log publishing settings, one configuration per [`LogType`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, instrument};
use warden_core::{FieldErrors, LogType, RemoteLogConfig, RemoteLogForm, validate_remote_log};

use crate::api::RemoteLoggingApi;
use crate::busy::BusyFlag;
use crate::error::{ApiError, SubmissionError};
use crate::fetcher::{ConfigFetcher, ConfigSource};
use crate::notify::{Alert, NotificationSink};

/// Loads every remote log publishing configuration.
pub struct RemoteLogConfigList(Arc<dyn RemoteLoggingApi>);

#[async_trait]
impl ConfigSource for RemoteLogConfigList {
    type Output = Vec<RemoteLogConfig>;

    fn label(&self) -> &str {
        "remote-logging"
    }

    async fn load(&self) -> Result<Self::Output, ApiError> {
        self.0.list_remote_log_configs().await
    }
}

fn saved() -> Alert {
    Alert::success(
        "Configuration saved",
        "Remote log publishing configuration was saved successfully.",
    )
}

fn save_failed() -> Alert {
    Alert::error(
        "Update error",
        "An error occurred while updating the remote log publishing configuration.",
    )
}

fn restore_failed() -> Alert {
    Alert::error(
        "Restore error",
        "An error occurred while restoring the default remote log publishing configuration.",
    )
}

fn retrieve_failed() -> Alert {
    Alert::error(
        "Retrieval error",
        "An error occurred while retrieving the remote log publishing configuration.",
    )
}

pub struct RemoteLoggingSettings {
    api: Arc<dyn RemoteLoggingApi>,
    notifier: Arc<dyn NotificationSink>,
    fetcher: ConfigFetcher<RemoteLogConfigList>,
    read_only: bool,
    submitting: BusyFlag,
}

impl RemoteLoggingSettings {
    pub fn new(api: Arc<dyn RemoteLoggingApi>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            fetcher: ConfigFetcher::new(RemoteLogConfigList(Arc::clone(&api))),
            api,
            notifier,
            read_only: false,
            submitting: BusyFlag::new(),
        }
    }

    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn submitting(&self) -> BusyFlag {
        self.submitting.clone()
    }

    pub async fn load(&mut self) -> Result<(), ApiError> {
        match self.fetcher.fetch().await {
            Ok(_) => Ok(()),
            Err(err) => {
                error!(error = %err, "failed to load remote logging configuration");
                self.notifier.notify(retrieve_failed());
                Err(err)
            }
        }
    }

    /// The fetched configuration for `log_type`, if the server returned one.
    pub fn config_for(&self, log_type: LogType) -> Option<&RemoteLogConfig> {
        self.fetcher
            .resource()
            .data()?
            .iter()
            .find(|config| config.log_type == Some(log_type))
    }

    /// Initial form values for `log_type`.
    pub fn form_for(&self, log_type: LogType) -> RemoteLogForm {
        self.config_for(log_type)
            .map(RemoteLogForm::from_config)
            .unwrap_or_default()
    }

    pub fn validate(&self, form: &RemoteLogForm) -> FieldErrors {
        validate_remote_log(form)
    }

    /// Whether the server returned an entry for `log_type` that a restore
    /// would remove. An entry carrying only its log type still counts.
    pub fn can_restore(&self, log_type: LogType) -> bool {
        !self.read_only && self.config_for(log_type).is_some()
    }

    #[instrument(skip(self, form))]
    pub async fn update(
        &mut self,
        log_type: LogType,
        form: &RemoteLogForm,
    ) -> Result<(), SubmissionError> {
        if self.read_only {
            return Err(SubmissionError::ReadOnly);
        }
        let errors = validate_remote_log(form);
        if !errors.is_empty() {
            return Err(SubmissionError::Validation(errors));
        }

        let _submitting = self.submitting.raise();
        let config = form.to_config(log_type);
        match self.api.update_remote_log_config(log_type, &config).await {
            Ok(()) => {
                info!("remote logging configuration saved");
                self.refresh().await;
                self.notifier.notify(saved());
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to save remote logging configuration");
                self.notifier.notify(save_failed());
                Err(SubmissionError::Update(err))
            }
        }
    }

    /// Delete the stored configuration so the server defaults apply again.
    #[instrument(skip(self))]
    pub async fn restore(&mut self, log_type: LogType) -> Result<(), SubmissionError> {
        if self.read_only {
            return Err(SubmissionError::ReadOnly);
        }

        let _submitting = self.submitting.raise();
        match self.api.restore_remote_log_config(log_type).await {
            Ok(()) => {
                info!("remote logging configuration restored to defaults");
                self.refresh().await;
                self.notifier.notify(saved());
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to restore remote logging configuration");
                self.notifier.notify(restore_failed());
                Err(SubmissionError::Restore(err))
            }
        }
    }

    async fn refresh(&mut self) {
        if let Err(err) = self.fetcher.mutate().await {
            error!(error = %err, "failed to reload remote logging configuration");
            self.notifier.notify(retrieve_failed());
        }
    }
}
