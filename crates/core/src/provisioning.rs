use serde::{Deserialize, Serialize};

/// Inbound (SCIM) provisioning settings of an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundProvisioning {
    /// When enabled, provisioned users are not persisted locally.
    #[serde(default)]
    pub proxy_mode: bool,
    /// User store domain that receives provisioned users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provisioning_userstore_domain: Option<String>,
}

/// Provisioning configuration block of an application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningConfig {
    #[serde(default)]
    pub inbound_provisioning: InboundProvisioning,
}

/// The slice of an application resource the provisioning page reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationProvisioning {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub provisioning_configurations: ProvisioningConfig,
}

/// PATCH body updating an application's provisioning configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisioningPatch {
    pub provisioning_configurations: ProvisioningConfig,
}

impl From<ProvisioningConfig> for ProvisioningPatch {
    fn from(config: ProvisioningConfig) -> Self {
        Self {
            provisioning_configurations: config,
        }
    }
}
