//! In-memory API fakes shared by the workflow tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use warden_core::SmsProviderRecord;

use crate::api::SmsProviderApi;
use crate::busy::BusyFlag;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SmsCall {
    List,
    Update(String),
    Delete,
}

/// Stateful fake of the SMS sender endpoints. Stores at most one record.
#[derive(Default)]
pub(crate) struct FakeSmsApi {
    stored: Mutex<Vec<SmsProviderRecord>>,
    calls: Mutex<Vec<SmsCall>>,
    list_error: Mutex<Option<ApiError>>,
    delete_error: Mutex<Option<ApiError>>,
    update_error: Mutex<Option<ApiError>>,
    hang_on_delete: AtomicBool,
    probe: Mutex<Option<BusyFlag>>,
    busy_seen: Mutex<Vec<bool>>,
}

impl FakeSmsApi {
    pub(crate) fn with_records(records: Vec<SmsProviderRecord>) -> Self {
        let api = Self::default();
        *api.stored.lock().unwrap() = records;
        api
    }

    pub(crate) fn calls(&self) -> Vec<SmsCall> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn stored(&self) -> Vec<SmsProviderRecord> {
        self.stored.lock().unwrap().clone()
    }

    pub(crate) fn fail_list(&self, err: ApiError) {
        *self.list_error.lock().unwrap() = Some(err);
    }

    pub(crate) fn fail_delete(&self, err: ApiError) {
        *self.delete_error.lock().unwrap() = Some(err);
    }

    pub(crate) fn fail_update(&self, err: ApiError) {
        *self.update_error.lock().unwrap() = Some(err);
    }

    pub(crate) fn hang_on_delete(&self) {
        self.hang_on_delete.store(true, Ordering::SeqCst);
    }

    /// Record the state of `flag` whenever a mutating call arrives.
    pub(crate) fn probe(&self, flag: BusyFlag) {
        *self.probe.lock().unwrap() = Some(flag);
    }

    pub(crate) fn busy_seen(&self) -> Vec<bool> {
        self.busy_seen.lock().unwrap().clone()
    }

    fn record(&self, call: SmsCall) {
        self.calls.lock().unwrap().push(call);
        if let Some(flag) = self.probe.lock().unwrap().as_ref() {
            self.busy_seen.lock().unwrap().push(flag.is_raised());
        }
    }
}

#[async_trait]
impl SmsProviderApi for FakeSmsApi {
    async fn list_sms_providers(&self) -> Result<Vec<SmsProviderRecord>, ApiError> {
        self.calls.lock().unwrap().push(SmsCall::List);
        if let Some(err) = self.list_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.stored())
    }

    async fn update_sms_provider(
        &self,
        record: &SmsProviderRecord,
    ) -> Result<SmsProviderRecord, ApiError> {
        self.record(SmsCall::Update(record.provider.clone()));
        if let Some(err) = self.update_error.lock().unwrap().clone() {
            return Err(err);
        }
        *self.stored.lock().unwrap() = vec![record.clone()];
        Ok(record.clone())
    }

    async fn delete_sms_providers(&self) -> Result<(), ApiError> {
        self.record(SmsCall::Delete);
        if self.hang_on_delete.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if let Some(err) = self.delete_error.lock().unwrap().clone() {
            return Err(err);
        }
        let mut stored = self.stored.lock().unwrap();
        if stored.is_empty() {
            return Err(ApiError::NotFound { description: None });
        }
        stored.clear();
        Ok(())
    }
}
