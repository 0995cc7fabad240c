pub mod logging;
pub mod organizations;
pub mod provisioning;
pub mod sms;
