pub mod access;
pub mod error;
pub mod mapper;
pub mod organization;
pub mod property;
pub mod provisioning;
pub mod remote_logging;
pub mod sms;
pub mod types;
pub mod validation;

pub use access::{FeatureAccessConfig, FeatureScopes, has_required_scopes, is_feature_enabled};
pub use error::CoreError;
pub use mapper::{PROPERTY_BINDINGS, PropertyBinding, to_view_model, to_wire};
pub use organization::{
    AuthorizedOrganization, AuthorizedOrganizations, Organization, OrganizationStatus,
    authorized_name_filter, organization_id_from_path,
};
pub use property::{Property, PropertyBag};
pub use provisioning::{
    ApplicationProvisioning, InboundProvisioning, ProvisioningConfig, ProvisioningPatch,
};
pub use remote_logging::{LogType, RemoteLogConfig, RemoteLogForm};
pub use sms::{
    ContentType, DEFAULT_PROVIDER_KIND, ProviderKind, SMS_PUBLISHER_NAME, SmsProvider,
    SmsProviderRecord,
};
pub use types::{ApplicationId, OrganizationId, TenantDomain};
pub use validation::{Field, FieldErrors, validate_remote_log, validate_sms_provider};
