//! Settings workflows for the Warden console.
//!
//! Each workflow owns its form state and talks to the identity server
//! through an object-safe API trait, so the same logic drives the CLI and
//! the in-memory fakes used in tests.
//!
//! - [`SmsProviderSettings`] edits the single SMS notification sender.
//! - [`RemoteLoggingSettings`] edits remote log publishing per log type.
//! - [`InboundProvisioningSettings`] edits an application's inbound
//!   provisioning block.
//! - [`OrganizationEditor`] loads an organization and decides whether the
//!   caller may edit it.

pub mod api;
pub mod busy;
pub mod error;
pub mod fetcher;
pub mod notify;
pub mod organization;
pub mod provisioning;
pub mod remote_logging;
pub mod sms;

#[cfg(test)]
mod testing;

pub use api::{ApplicationApi, OrganizationApi, RemoteLoggingApi, SmsProviderApi};
pub use busy::{BusyFlag, BusyGuard};
pub use error::{ApiError, SubmissionError};
pub use fetcher::{ConfigFetcher, ConfigSource, Resource};
pub use notify::{Alert, AlertLevel, MemorySink, NotificationSink, TracingSink};
pub use organization::{ORGANIZATION_UPDATE_FEATURE, OrganizationEditor};
pub use provisioning::InboundProvisioningSettings;
pub use remote_logging::RemoteLoggingSettings;
pub use sms::{FormState, SmsProviderSettings};
