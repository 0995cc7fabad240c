use std::sync::Arc;

use tracing::{debug, error, instrument};
use warden_core::{
    FeatureAccessConfig, Organization, OrganizationId, authorized_name_filter, is_feature_enabled,
    organization_id_from_path,
};

use crate::api::OrganizationApi;
use crate::error::ApiError;
use crate::notify::{Alert, NotificationSink};

/// Sub-feature key that unlocks organization editing.
pub const ORGANIZATION_UPDATE_FEATURE: &str = "organizations.update";

/// Page size of the authorization lookup.
const AUTHORIZED_LOOKUP_LIMIT: u32 = 10;

/// Loads an organization and works out whether the session may edit it.
pub struct OrganizationEditor {
    api: Arc<dyn OrganizationApi>,
    notifier: Arc<dyn NotificationSink>,
    feature: Option<FeatureAccessConfig>,
    organization: Option<Organization>,
    authorized: bool,
}

impl OrganizationEditor {
    pub fn new(
        api: Arc<dyn OrganizationApi>,
        notifier: Arc<dyn NotificationSink>,
        feature: Option<FeatureAccessConfig>,
    ) -> Self {
        Self {
            api,
            notifier,
            feature,
            organization: None,
            authorized: false,
        }
    }

    pub fn organization(&self) -> Option<&Organization> {
        self.organization.as_ref()
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// Editing needs the update feature, an active organization and an
    /// authorization match.
    pub fn is_read_only(&self) -> bool {
        !is_feature_enabled(self.feature.as_ref(), ORGANIZATION_UPDATE_FEATURE)
            || !self.organization.as_ref().is_some_and(Organization::is_active)
            || !self.authorized
    }

    /// Load the organization addressed by the last segment of `path`.
    pub async fn load_from_path(&mut self, path: &str) -> Result<(), ApiError> {
        let id = organization_id_from_path(path)
            .ok_or(ApiError::NotFound { description: None })?;
        self.load(&OrganizationId::new(id)).await
    }

    /// Fetch the organization, then check that exactly one authorized
    /// organization carries its name.
    #[instrument(skip(self))]
    pub async fn load(&mut self, id: &OrganizationId) -> Result<(), ApiError> {
        let organization = match self.api.get_organization(id).await {
            Ok(organization) => organization,
            Err(err) => {
                error!(error = %err, "failed to fetch organization");
                self.notifier.notify(Alert::error(
                    "Something went wrong",
                    err.description()
                        .unwrap_or("An error occurred while fetching the organization."),
                ));
                return Err(err);
            }
        };

        let filter = authorized_name_filter(&organization.name);
        self.organization = Some(organization);
        self.authorized = false;

        match self
            .api
            .list_authorized_organizations(&filter, AUTHORIZED_LOOKUP_LIMIT)
            .await
        {
            Ok(list) => {
                self.authorized = list.organizations.len() == 1;
                debug!(authorized = self.authorized, "organization authorization resolved");
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "failed to list authorized organizations");
                let message = if err.description().is_some() {
                    "Error while retrieving organizations"
                } else {
                    "Something went wrong"
                };
                self.notifier.notify(Alert::error(
                    message,
                    err.description()
                        .unwrap_or("An error occurred while retrieving the organization list."),
                ));
                Err(err)
            }
        }
    }
}
