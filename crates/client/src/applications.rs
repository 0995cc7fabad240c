use warden_core::{ApplicationId, ApplicationProvisioning, ProvisioningPatch};

use crate::{Error, WardenClient, decode, encode_segment, error_from};

impl WardenClient {
    fn application_url(&self, id: &ApplicationId) -> String {
        self.server_api(&format!("/applications/{}", encode_segment(id.as_str())))
    }

    /// Fetch an application, keeping the fields the provisioning page uses.
    pub async fn get_application(
        &self,
        id: &ApplicationId,
    ) -> Result<ApplicationProvisioning, Error> {
        let url = self.application_url(id);

        let response = self
            .add_auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            decode(response).await
        } else if response.status() == reqwest::StatusCode::NOT_FOUND {
            Err(Error::Http {
                status: 404,
                message: format!("Application not found: {id}"),
            })
        } else {
            Err(error_from(response, &format!("Failed to get application: {id}")).await)
        }
    }

    /// Patch the configuration blocks of an application.
    pub async fn update_application_configurations(
        &self,
        id: &ApplicationId,
        patch: &ProvisioningPatch,
    ) -> Result<(), Error> {
        let url = self.application_url(id);

        let response = self
            .add_auth(self.client.patch(&url))
            .json(patch)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from(response, &format!("Failed to update application: {id}")).await)
        }
    }
}
