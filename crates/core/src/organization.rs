use serde::{Deserialize, Serialize};

/// Lifecycle status of an organization.
///
/// Statuses this client does not know about parse as `Unknown` and are
/// treated like any other non-active status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrganizationStatus {
    Active,
    Disabled,
    #[serde(other)]
    Unknown,
}

/// Organization resource as returned by the organizations API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub name: String,
    pub status: OrganizationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub org_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<String>,
}

impl Organization {
    pub fn is_active(&self) -> bool {
        self.status == OrganizationStatus::Active
    }
}

/// Entry of the caller's authorized organization list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedOrganization {
    pub id: String,
    pub name: String,
}

/// Response of the authorized organizations listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizedOrganizations {
    #[serde(default)]
    pub organizations: Vec<AuthorizedOrganization>,
}

/// Filter expression selecting an organization by exact name.
pub fn authorized_name_filter(name: &str) -> String {
    format!("name eq {name}")
}

/// Extract the organization id from an edit-page path
/// (`/console/organizations/<id>`). Trailing slashes are ignored.
pub fn organization_id_from_path(path: &str) -> Option<&str> {
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
}
