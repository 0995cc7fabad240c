use warden_core::{AuthorizedOrganizations, Organization, OrganizationId};

use crate::{Error, WardenClient, decode, encode_segment, error_from};

impl WardenClient {
    /// Fetch a single organization.
    pub async fn get_organization(&self, id: &OrganizationId) -> Result<Organization, Error> {
        let url = self.server_api(&format!("/organizations/{}", encode_segment(id.as_str())));

        let response = self
            .add_auth(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            decode(response).await
        } else {
            Err(error_from(response, &format!("Failed to get organization: {id}")).await)
        }
    }

    /// List organizations the caller is authorized to manage.
    pub async fn list_authorized_organizations(
        &self,
        filter: &str,
        limit: u32,
    ) -> Result<AuthorizedOrganizations, Error> {
        let url = format!("{}/api/users/v1/me/organizations", self.base_url);
        let limit = limit.to_string();
        let query = [
            ("filter", filter),
            ("limit", limit.as_str()),
            ("recursive", "false"),
        ];

        let response = self
            .add_auth(self.client.get(&url))
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        if response.status().is_success() {
            decode(response).await
        } else {
            Err(error_from(response, "Failed to list authorized organizations").await)
        }
    }
}

#[cfg(test)]
mod tests {
    use warden_core::OrganizationId;

    use crate::WardenClient;
    use crate::mock_server::MockServer;

    #[tokio::test]
    async fn authorized_listing_sends_filter() {
        let server = MockServer::start().await;
        let client = WardenClient::new(&server.base_url);
        let body = r#"{"organizations": [{"id": "o1", "name": "Acme"}]}"#;
        let handle = tokio::spawn(async move { server.respond_once(200, body).await });

        let list = client
            .list_authorized_organizations("name eq Acme", 10)
            .await
            .unwrap();
        let request = handle.await.unwrap();

        assert!(request.starts_with(
            "GET /api/users/v1/me/organizations?filter=name+eq+Acme&limit=10&recursive=false "
        ));
        assert_eq!(list.organizations.len(), 1);
    }

    #[tokio::test]
    async fn get_organization_error_keeps_description() {
        let server = MockServer::start().await;
        let client = WardenClient::new(&server.base_url);
        let body = r#"{"code":"ORG-60015","message":"Not found","description":"Organization o9 does not exist"}"#;
        let handle = tokio::spawn(async move { server.respond_once(404, body).await });

        let err = client
            .get_organization(&OrganizationId::new("o9"))
            .await
            .unwrap_err();
        handle.await.unwrap();

        assert!(err.is_not_found());
        assert_eq!(err.description(), Some("Organization o9 does not exist"));
    }
}
