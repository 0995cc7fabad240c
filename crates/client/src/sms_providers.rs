use tracing::debug;
use warden_core::SmsProviderRecord;

use crate::{Error, WardenClient, decode, encode_segment, error_from};

impl WardenClient {
    fn sms_senders_url(&self) -> String {
        self.server_api("/notification-senders/sms")
    }

    /// List the configured SMS senders.
    ///
    /// A 404 means the tenant has no sender configured and yields an empty
    /// list.
    pub async fn list_sms_providers(&self) -> Result<Vec<SmsProviderRecord>, Error> {
        let url = self.sms_senders_url();

        let response = self
            .add_auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            decode(response).await
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            debug!("no SMS sender configured");
            Ok(Vec::new())
        } else {
            Err(error_from(response, "Failed to list SMS senders").await)
        }
    }

    /// Create the SMS sender and return the persisted record.
    pub async fn create_sms_provider(
        &self,
        record: &SmsProviderRecord,
    ) -> Result<SmsProviderRecord, Error> {
        let url = self.sms_senders_url();

        let response = self
            .add_auth(self.client.post(&url))
            .json(record)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            decode(response).await
        } else {
            Err(error_from(response, "Failed to create SMS sender").await)
        }
    }

    /// Delete the SMS sender stored under `name`.
    ///
    /// A missing sender is reported as `HTTP 404`; callers decide whether
    /// that counts as success.
    pub async fn delete_sms_provider(&self, name: &str) -> Result<(), Error> {
        let url = format!("{}/{}", self.sms_senders_url(), encode_segment(name));

        let response = self
            .add_auth(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            Err(Error::Http {
                status: 404,
                message: format!("SMS sender not found: {name}"),
            })
        } else {
            Err(error_from(response, "Failed to delete SMS sender").await)
        }
    }
}
