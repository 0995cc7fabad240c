use warden_core::{LogType, RemoteLogConfig};

use crate::{Error, WardenClient, decode, error_from};

impl WardenClient {
    fn remote_logging_url(&self) -> String {
        self.server_api("/configs/remote-logging")
    }

    /// List the remote log publishing configuration of every log type.
    ///
    /// A 404 yields an empty list.
    pub async fn list_remote_log_configs(&self) -> Result<Vec<RemoteLogConfig>, Error> {
        let url = self.remote_logging_url();

        let response = self
            .add_auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            decode(response).await
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            Ok(Vec::new())
        } else {
            Err(error_from(response, "Failed to list remote logging configurations").await)
        }
    }

    /// Replace the remote log publishing configuration for `log_type`.
    pub async fn update_remote_log_config(
        &self,
        log_type: LogType,
        config: &RemoteLogConfig,
    ) -> Result<(), Error> {
        let url = format!("{}/{log_type}", self.remote_logging_url());

        let response = self
            .add_auth(self.client.put(&url))
            .json(config)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from(response, &format!("Failed to update {log_type} remote logging")).await)
        }
    }

    /// Restore the server defaults for `log_type` by deleting its
    /// configuration.
    pub async fn restore_remote_log_config(&self, log_type: LogType) -> Result<(), Error> {
        let url = format!("{}/{log_type}", self.remote_logging_url());

        let response = self
            .add_auth(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from(response, &format!("Failed to restore {log_type} remote logging")).await)
        }
    }
}
