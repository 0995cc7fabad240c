//! SMS notification sender settings.
//!
//! The server keeps at most one sender, stored under
//! [`SMS_PUBLISHER_NAME`]. Changing it is a delete followed by a create;
//! the server offers no atomic replace and this workflow does not roll back
//! a failed create.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info, instrument, warn};
use warden_core::{
    DEFAULT_PROVIDER_KIND, FieldErrors, ProviderKind, SMS_PUBLISHER_NAME, SmsProvider,
    SmsProviderRecord, to_view_model, to_wire, validate_sms_provider,
};

use crate::api::SmsProviderApi;
use crate::busy::BusyFlag;
use crate::error::{ApiError, SubmissionError};
use crate::fetcher::{ConfigFetcher, ConfigSource};
use crate::notify::{Alert, NotificationSink};

/// Per-provider form values plus the provider currently selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    provider_params: BTreeMap<ProviderKind, SmsProvider>,
    selected_provider: Option<ProviderKind>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            provider_params: default_params(),
            selected_provider: None,
        }
    }
}

fn default_params() -> BTreeMap<ProviderKind, SmsProvider> {
    ProviderKind::ALL
        .into_iter()
        .map(|kind| (kind, SmsProvider::default_for(kind)))
        .collect()
}

impl FormState {
    /// Form values for `kind`. Every kind always has an entry.
    pub fn provider_params(&self, kind: ProviderKind) -> &SmsProvider {
        &self.provider_params[&kind]
    }

    pub fn selected_provider(&self) -> Option<ProviderKind> {
        self.selected_provider
    }

    pub fn select(&mut self, kind: ProviderKind) {
        self.selected_provider = Some(kind);
    }

    /// Merge fetched records into the form.
    ///
    /// Records are applied in order, so a later record of the same kind
    /// wins. The kind of the last record becomes the selection; an empty
    /// list selects the default provider.
    pub fn apply_fetched(&mut self, records: &[SmsProviderRecord]) {
        let mut configured = DEFAULT_PROVIDER_KIND;
        for record in records {
            let provider = to_view_model(record);
            configured = provider.kind;
            self.provider_params.insert(provider.kind, provider);
        }
        self.selected_provider = Some(configured);
    }

    /// Reset every kind to defaults, then store the confirmed values under
    /// `kind`. The selection is left as is.
    pub fn apply_confirmed(&mut self, kind: ProviderKind, confirmed: SmsProvider) {
        self.provider_params = default_params();
        self.provider_params.insert(kind, confirmed);
    }

    /// Back to defaults with the default provider selected.
    pub fn reset(&mut self) {
        self.provider_params = default_params();
        self.selected_provider = Some(DEFAULT_PROVIDER_KIND);
    }
}

/// Loads the stored SMS senders.
pub struct SmsProviderList(Arc<dyn SmsProviderApi>);

#[async_trait]
impl ConfigSource for SmsProviderList {
    type Output = Vec<SmsProviderRecord>;

    fn label(&self) -> &str {
        "sms-providers"
    }

    async fn load(&self) -> Result<Self::Output, ApiError> {
        self.0.list_sms_providers().await
    }
}

fn retrieve_error() -> Alert {
    Alert::error(
        "Retrieval error",
        "An error occurred while retrieving the SMS provider configuration.",
    )
}

fn update_success() -> Alert {
    Alert::success(
        "Configuration updated",
        "The SMS provider configuration was updated successfully.",
    )
}

fn update_error() -> Alert {
    Alert::error(
        "Update error",
        "An error occurred while updating the SMS provider configuration.",
    )
}

fn delete_success() -> Alert {
    Alert::success(
        "Configuration reverted",
        "The SMS provider configuration was reverted successfully.",
    )
}

fn delete_error() -> Alert {
    Alert::error(
        "Revert error",
        "An error occurred while deleting the SMS provider configuration.",
    )
}

/// Edits the tenant's SMS notification sender.
pub struct SmsProviderSettings {
    api: Arc<dyn SmsProviderApi>,
    notifier: Arc<dyn NotificationSink>,
    fetcher: ConfigFetcher<SmsProviderList>,
    state: FormState,
    loaded: bool,
    read_only: bool,
    submitting: BusyFlag,
    deleting: BusyFlag,
}

impl SmsProviderSettings {
    pub fn new(api: Arc<dyn SmsProviderApi>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            fetcher: ConfigFetcher::new(SmsProviderList(Arc::clone(&api))),
            api,
            notifier,
            state: FormState::default(),
            loaded: false,
            read_only: false,
            submitting: BusyFlag::new(),
            deleting: BusyFlag::new(),
        }
    }

    #[must_use]
    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// `true` until the first load completes, and while a reload or revert
    /// is in flight.
    pub fn is_loading(&self) -> bool {
        !self.loaded || self.fetcher.resource().is_loading() || self.deleting.is_raised()
    }

    /// Handle on the "submitting" flag. Clones observe the live value.
    pub fn submitting(&self) -> BusyFlag {
        self.submitting.clone()
    }

    /// Handle on the "deleting" flag raised during a revert.
    pub fn deleting(&self) -> BusyFlag {
        self.deleting.clone()
    }

    /// Whether the submit action should be offered.
    pub fn can_submit(&self) -> bool {
        !self.read_only && !self.submitting.is_raised() && self.state.selected_provider.is_some()
    }

    /// Load the stored sender into the form.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        match self.fetcher.fetch().await {
            Ok(records) => {
                self.state.apply_fetched(&records);
                self.loaded = true;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to load SMS provider configuration");
                self.notifier.notify(retrieve_error());
                Err(err)
            }
        }
    }

    pub fn select_provider(&mut self, kind: ProviderKind) {
        debug!(provider = %kind, "SMS provider selected");
        self.state.select(kind);
    }

    /// Values the form for the selected provider starts from.
    pub fn initial_values(&self) -> Option<&SmsProvider> {
        self.state
            .selected_provider
            .map(|kind| self.state.provider_params(kind))
    }

    /// Field errors for `values` under the current selection.
    pub fn validate(&self, values: &SmsProvider) -> FieldErrors {
        match self.state.selected_provider {
            Some(kind) => validate_sms_provider(kind, values),
            None => FieldErrors::new(),
        }
    }

    /// Replace the stored sender with `values`.
    ///
    /// The existing sender is deleted first. If that fails nothing else
    /// happens. If the create then fails the server is left without a
    /// sender and [`SubmissionError::UpdateAfterDelete`] is returned.
    #[instrument(skip_all, fields(provider = ?self.state.selected_provider))]
    pub async fn submit(&mut self, values: SmsProvider) -> Result<SmsProvider, SubmissionError> {
        if self.read_only {
            return Err(SubmissionError::ReadOnly);
        }
        let selected = self
            .state
            .selected_provider
            .ok_or(SubmissionError::NoProviderSelected)?;
        let errors = validate_sms_provider(selected, &values);
        if !errors.is_empty() {
            return Err(SubmissionError::Validation(errors));
        }

        let _submitting = self.submitting.raise();
        let record = submission_record(selected, values);

        if let Err(err) = self.delete_configuration(true).await {
            warn!(error = %err, "could not remove existing SMS sender, update skipped");
            self.notifier.notify(delete_error());
            return Err(SubmissionError::Delete(err));
        }

        let result = match self.api.update_sms_provider(&record).await {
            Ok(persisted) => {
                let confirmed = to_view_model(&persisted);
                self.state.apply_confirmed(selected, confirmed.clone());
                info!("SMS sender updated");
                self.notifier.notify(update_success());
                Ok(confirmed)
            }
            Err(err) => {
                error!(error = %err, "SMS sender deleted but the replacement was not stored");
                self.notifier.notify(update_error());
                Err(SubmissionError::UpdateAfterDelete(err))
            }
        };

        // The delete already changed the server, so resync either way.
        self.refresh().await;
        result
    }

    /// Delete the stored sender and reset the form to defaults.
    ///
    /// Unlike the delete inside [`submit`](Self::submit), a missing sender
    /// is a failure here.
    #[instrument(skip_all)]
    pub async fn revert(&mut self) -> Result<(), SubmissionError> {
        if self.read_only {
            return Err(SubmissionError::ReadOnly);
        }
        let _submitting = self.submitting.raise();

        let deleted = {
            let _deleting = self.deleting.raise();
            self.delete_configuration(false).await
        };

        match deleted {
            Ok(()) => {
                info!("SMS sender reverted");
                self.notifier.notify(delete_success());
                self.state.reset();
                self.refresh().await;
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to revert SMS sender");
                self.notifier.notify(delete_error());
                Err(SubmissionError::Delete(err))
            }
        }
    }

    async fn delete_configuration(&self, before_update: bool) -> Result<(), ApiError> {
        match self.api.delete_sms_providers().await {
            Err(err) if before_update && err.is_not_found() => {
                debug!("no SMS sender stored, nothing to delete");
                Ok(())
            }
            other => other,
        }
    }

    async fn refresh(&mut self) {
        match self.fetcher.mutate().await {
            Ok(records) => {
                self.state.apply_fetched(&records);
                self.loaded = true;
            }
            Err(err) => {
                error!(error = %err, "failed to reload SMS provider configuration");
                self.notifier.notify(retrieve_error());
            }
        }
    }
}

/// The record sent to the server for `values` under `selected`.
fn submission_record(selected: ProviderKind, mut values: SmsProvider) -> SmsProviderRecord {
    values.kind = selected;
    values.name = SMS_PUBLISHER_NAME.to_owned();
    values.content_type = Some(values.content_type.unwrap_or_default());
    to_wire(&values)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use warden_core::{ContentType, Field, Property, PropertyBag};

    use super::*;
    use crate::notify::{AlertLevel, MemorySink};
    use crate::testing::{FakeSmsApi, SmsCall};

    fn record(provider: &str, key: &str) -> SmsProviderRecord {
        SmsProviderRecord {
            name: SMS_PUBLISHER_NAME.into(),
            provider: provider.into(),
            key: key.into(),
            secret: "secret".into(),
            sender: "+15550100".into(),
            ..SmsProviderRecord::default()
        }
    }

    fn filled(kind: ProviderKind) -> SmsProvider {
        SmsProvider {
            key: "new-key".into(),
            secret: "new-secret".into(),
            sender: "+15550199".into(),
            ..SmsProvider::default_for(kind)
        }
    }

    fn settings(api: &Arc<FakeSmsApi>) -> (SmsProviderSettings, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let settings = SmsProviderSettings::new(
            Arc::clone(api) as Arc<dyn SmsProviderApi>,
            Arc::clone(&sink) as Arc<dyn NotificationSink>,
        );
        (settings, sink)
    }

    #[tokio::test]
    async fn empty_server_selects_twilio() {
        let api = Arc::new(FakeSmsApi::default());
        let (mut settings, _) = settings(&api);
        assert!(settings.is_loading());

        settings.load().await.unwrap();

        assert!(!settings.is_loading());
        assert_eq!(settings.state().selected_provider(), Some(ProviderKind::Twilio));
        assert_eq!(
            settings.initial_values(),
            Some(&SmsProvider::default_for(ProviderKind::Twilio))
        );
    }

    #[tokio::test]
    async fn last_fetched_record_wins() {
        let api = Arc::new(FakeSmsApi::with_records(vec![
            record("Twilio", "tw"),
            record("Vonage", "vo"),
        ]));
        let (mut settings, _) = settings(&api);

        settings.load().await.unwrap();

        let state = settings.state();
        assert_eq!(state.selected_provider(), Some(ProviderKind::Vonage));
        assert_eq!(state.provider_params(ProviderKind::Twilio).key, "tw");
        assert_eq!(state.provider_params(ProviderKind::Vonage).key, "vo");
    }

    #[tokio::test]
    async fn load_failure_alerts() {
        let api = Arc::new(FakeSmsApi::default());
        api.fail_list(ApiError::Transport("refused".into()));
        let (mut settings, sink) = settings(&api);

        assert!(settings.load().await.is_err());
        assert_eq!(sink.alerts()[0].level, AlertLevel::Error);
        assert!(settings.is_loading());
    }

    #[tokio::test]
    async fn submit_deletes_before_update() {
        let api = Arc::new(FakeSmsApi::with_records(vec![record("Twilio", "old")]));
        let (mut settings, sink) = settings(&api);
        api.probe(settings.submitting());
        settings.load().await.unwrap();

        let confirmed = settings.submit(filled(ProviderKind::Twilio)).await.unwrap();

        assert_eq!(
            api.calls(),
            vec![
                SmsCall::List,
                SmsCall::Delete,
                SmsCall::Update("Twilio".into()),
                SmsCall::List
            ]
        );
        assert_eq!(api.busy_seen(), vec![true, true]);
        assert!(!settings.submitting().is_raised());
        assert_eq!(confirmed.key, "new-key");
        assert_eq!(sink.alerts()[0].level, AlertLevel::Success);
    }

    #[tokio::test]
    async fn missing_sender_does_not_block_update() {
        let api = Arc::new(FakeSmsApi::default());
        let (mut settings, _) = settings(&api);
        settings.load().await.unwrap();

        settings.submit(filled(ProviderKind::Twilio)).await.unwrap();

        assert_eq!(api.stored().len(), 1);
        assert!(api.calls().contains(&SmsCall::Update("Twilio".into())));
    }

    #[tokio::test]
    async fn delete_failure_skips_update() {
        let api = Arc::new(FakeSmsApi::with_records(vec![record("Twilio", "old")]));
        let (mut settings, sink) = settings(&api);
        settings.load().await.unwrap();
        api.fail_delete(ApiError::Rejected {
            status: 500,
            message: "Server error".into(),
            description: None,
        });

        let err = settings.submit(filled(ProviderKind::Twilio)).await.unwrap_err();

        assert!(matches!(err, SubmissionError::Delete(_)));
        assert_eq!(api.calls(), vec![SmsCall::List, SmsCall::Delete]);
        assert!(!settings.submitting().is_raised());
        assert_eq!(sink.alerts().len(), 1);
        assert_eq!(sink.alerts()[0].level, AlertLevel::Error);
    }

    #[tokio::test]
    async fn failed_update_leaves_server_empty() {
        let api = Arc::new(FakeSmsApi::with_records(vec![record("Vonage", "old")]));
        let (mut settings, sink) = settings(&api);
        settings.load().await.unwrap();
        api.fail_update(ApiError::Transport("reset".into()));

        let err = settings.submit(filled(ProviderKind::Vonage)).await.unwrap_err();

        assert!(matches!(err, SubmissionError::UpdateAfterDelete(_)));
        assert!(api.stored().is_empty());
        // Resynced with the now-empty server.
        assert_eq!(api.calls().last(), Some(&SmsCall::List));
        assert_eq!(settings.state().selected_provider(), Some(ProviderKind::Twilio));
        assert_eq!(sink.alerts()[0].level, AlertLevel::Error);
    }

    #[tokio::test]
    async fn custom_without_url_is_rejected_locally() {
        let api = Arc::new(FakeSmsApi::default());
        let (mut settings, _) = settings(&api);
        settings.load().await.unwrap();
        settings.select_provider(ProviderKind::Custom);

        let values = SmsProvider {
            provider: "AcmeSMS".into(),
            content_type: Some(ContentType::Json),
            payload: Some("{\"to\":\"{{mobile}}\"}".into()),
            provider_url: Some(String::new()),
            ..filled(ProviderKind::Custom)
        };
        assert!(settings.validate(&values).contains(Field::ProviderUrl));

        match settings.submit(values).await {
            Err(SubmissionError::Validation(errors)) => {
                assert!(errors.contains(Field::ProviderUrl));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert_eq!(api.calls(), vec![SmsCall::List]);
    }

    #[tokio::test]
    async fn confirmed_provider_resets_the_others() {
        let api = Arc::new(FakeSmsApi::with_records(vec![record("Twilio", "tw")]));
        let (mut settings, _) = settings(&api);
        settings.load().await.unwrap();
        settings.select_provider(ProviderKind::Vonage);

        settings.submit(filled(ProviderKind::Vonage)).await.unwrap();

        let state = settings.state();
        assert_eq!(state.selected_provider(), Some(ProviderKind::Vonage));
        assert_eq!(state.provider_params(ProviderKind::Vonage).key, "new-key");
        assert_eq!(
            state.provider_params(ProviderKind::Twilio),
            &SmsProvider::default_for(ProviderKind::Twilio)
        );
        assert_eq!(
            state.provider_params(ProviderKind::Custom),
            &SmsProvider::default_for(ProviderKind::Custom)
        );
    }

    #[test]
    fn submission_record_shape() {
        let values = SmsProvider {
            provider: "AcmeSMS".into(),
            provider_url: Some("https://sms.acme.test".into()),
            payload: Some("{}".into()),
            http_method: Some(String::new()),
            ..filled(ProviderKind::Custom)
        };

        let record = submission_record(ProviderKind::Custom, values);

        assert_eq!(record.name, SMS_PUBLISHER_NAME);
        assert_eq!(record.provider, "AcmeSMS");
        assert_eq!(record.content_type, Some(ContentType::Json));
        assert_eq!(
            record.properties,
            [Property::new("body", "{}")].into_iter().collect::<PropertyBag>()
        );

        let twilio = submission_record(ProviderKind::Twilio, filled(ProviderKind::Twilio));
        assert_eq!(twilio.provider, "Twilio");
        assert!(twilio.properties.is_empty());
    }

    #[tokio::test]
    async fn read_only_blocks_mutations() {
        let api = Arc::new(FakeSmsApi::with_records(vec![record("Twilio", "tw")]));
        let (settings, _) = settings(&api);
        let mut settings = settings.with_read_only(true);
        settings.load().await.unwrap();

        assert!(!settings.can_submit());
        assert!(matches!(
            settings.submit(filled(ProviderKind::Twilio)).await,
            Err(SubmissionError::ReadOnly)
        ));
        assert!(matches!(settings.revert().await, Err(SubmissionError::ReadOnly)));
        assert_eq!(api.calls(), vec![SmsCall::List]);
    }

    #[tokio::test]
    async fn submit_needs_a_selection() {
        let api = Arc::new(FakeSmsApi::default());
        let (mut settings, _) = settings(&api);

        assert!(matches!(
            settings.submit(filled(ProviderKind::Twilio)).await,
            Err(SubmissionError::NoProviderSelected)
        ));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn revert_resets_to_defaults() {
        let api = Arc::new(FakeSmsApi::with_records(vec![record("Vonage", "vo")]));
        let (mut settings, sink) = settings(&api);
        settings.load().await.unwrap();

        settings.revert().await.unwrap();

        assert_eq!(
            api.calls(),
            vec![SmsCall::List, SmsCall::Delete, SmsCall::List]
        );
        assert_eq!(settings.state(), &{
            let mut expected = FormState::default();
            expected.reset();
            expected
        });
        assert!(!settings.deleting().is_raised());
        assert_eq!(sink.alerts()[0].level, AlertLevel::Success);
    }

    #[tokio::test]
    async fn revert_without_sender_fails() {
        let api = Arc::new(FakeSmsApi::default());
        let (mut settings, sink) = settings(&api);
        settings.load().await.unwrap();

        let err = settings.revert().await.unwrap_err();

        assert!(matches!(err, SubmissionError::Delete(ApiError::NotFound { .. })));
        assert_eq!(sink.alerts()[0].level, AlertLevel::Error);
        assert!(!settings.submitting().is_raised());
    }

    #[tokio::test]
    async fn abandoned_submit_lowers_busy_flag() {
        let api = Arc::new(FakeSmsApi::with_records(vec![record("Twilio", "tw")]));
        let (mut settings, _) = settings(&api);
        let submitting = settings.submitting();
        api.probe(submitting.clone());
        settings.load().await.unwrap();
        api.hang_on_delete();

        let outcome = tokio::time::timeout(
            Duration::from_millis(50),
            settings.submit(filled(ProviderKind::Twilio)),
        )
        .await;

        assert!(outcome.is_err());
        assert_eq!(api.busy_seen(), vec![true]);
        assert!(!submitting.is_raised());
    }
}
