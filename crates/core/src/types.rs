use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! newtype_string {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new instance from a string value.
            #[must_use]
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Return the inner string as a str slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

newtype_string!(ApplicationId, "Identifier of an application registered on the server.");
newtype_string!(OrganizationId, "Identifier of an organization.");
newtype_string!(TenantDomain, "Tenant domain the console operates on.");

impl TenantDomain {
    /// The super tenant, whose API paths carry no `/t/{tenant}` prefix.
    pub const SUPER_TENANT: &'static str = "carbon.super";

    /// Returns `true` for the super tenant.
    #[must_use]
    pub fn is_super_tenant(&self) -> bool {
        self.0 == Self::SUPER_TENANT
    }
}
