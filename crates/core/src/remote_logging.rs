use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CoreError;

/// Category of server logs published to a remote collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogType {
    Audit,
    Debug,
}

impl LogType {
    pub const ALL: [Self; 2] = [Self::Audit, Self::Debug];

    /// Path segment used by the remote-logging API.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Audit => "AUDIT",
            Self::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for LogType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "AUDIT" => Ok(Self::Audit),
            "DEBUG" => Ok(Self::Debug),
            _ => Err(CoreError::UnknownLogType(s.to_owned())),
        }
    }
}

/// Accept the timeout as either a JSON string or a JSON number.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

/// Remote log publishing configuration for one log type.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteLogConfig {
    pub log_type: Option<LogType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_url: Option<String>,
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub connect_timeout_millis: Option<String>,
    #[serde(default)]
    pub verify_hostname: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keystore_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keystore_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truststore_location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truststore_password: Option<String>,
}

impl RemoteLogConfig {
    /// Returns `true` when nothing but the log type is set, i.e. the server
    /// is running with its defaults for this log type.
    pub fn is_unset(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().is_none_or(str::is_empty);
        blank(&self.remote_url)
            && blank(&self.connect_timeout_millis)
            && !self.verify_hostname
            && blank(&self.username)
            && blank(&self.password)
            && blank(&self.keystore_location)
            && blank(&self.keystore_password)
            && blank(&self.truststore_location)
            && blank(&self.truststore_password)
    }
}

impl fmt::Debug for RemoteLogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("RemoteLogConfig")
            .field("log_type", &self.log_type)
            .field("remote_url", &self.remote_url)
            .field("connect_timeout_millis", &self.connect_timeout_millis)
            .field("verify_hostname", &self.verify_hostname)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("keystore_location", &self.keystore_location)
            .field("keystore_password", &redact(&self.keystore_password))
            .field("truststore_location", &self.truststore_location)
            .field("truststore_password", &redact(&self.truststore_password))
            .finish()
    }
}

/// Editable values of the remote logging form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RemoteLogForm {
    pub remote_url: String,
    pub connect_timeout_millis: Option<String>,
    pub verify_hostname: bool,
    pub username: Option<String>,
    pub password: Option<String>,
    pub keystore_location: Option<String>,
    pub keystore_password: Option<String>,
    pub truststore_location: Option<String>,
    pub truststore_password: Option<String>,
}

impl RemoteLogForm {
    /// Initial form values for an existing configuration.
    pub fn from_config(config: &RemoteLogConfig) -> Self {
        Self {
            remote_url: config.remote_url.clone().unwrap_or_default(),
            connect_timeout_millis: config.connect_timeout_millis.clone(),
            verify_hostname: config.verify_hostname,
            username: config.username.clone(),
            password: config.password.clone(),
            keystore_location: config.keystore_location.clone(),
            keystore_password: config.keystore_password.clone(),
            truststore_location: config.truststore_location.clone(),
            truststore_password: config.truststore_password.clone(),
        }
    }

    /// Build the request body for `log_type`. Blank optional fields are
    /// omitted.
    pub fn to_config(&self, log_type: LogType) -> RemoteLogConfig {
        let keep = |v: &Option<String>| v.clone().filter(|s| !s.is_empty());
        RemoteLogConfig {
            log_type: Some(log_type),
            remote_url: Some(self.remote_url.trim().to_owned()),
            connect_timeout_millis: keep(&self.connect_timeout_millis)
                .map(|t| t.trim().to_owned()),
            verify_hostname: self.verify_hostname,
            username: keep(&self.username),
            password: keep(&self.password),
            keystore_location: keep(&self.keystore_location),
            keystore_password: keep(&self.keystore_password),
            truststore_location: keep(&self.truststore_location),
            truststore_password: keep(&self.truststore_password),
        }
    }
}

impl fmt::Debug for RemoteLogForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteLogForm")
            .field("remote_url", &self.remote_url)
            .field("connect_timeout_millis", &self.connect_timeout_millis)
            .field("verify_hostname", &self.verify_hostname)
            .field("username", &self.username)
            .field("keystore_location", &self.keystore_location)
            .field("truststore_location", &self.truststore_location)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_timeout_from_number_or_string() {
        let numeric: RemoteLogConfig = serde_json::from_value(serde_json::json!({
            "logType": "AUDIT",
            "remoteUrl": "https://logs.test",
            "connectTimeoutMillis": 5000
        }))
        .unwrap();
        assert_eq!(numeric.connect_timeout_millis.as_deref(), Some("5000"));
        assert_eq!(numeric.log_type, Some(LogType::Audit));

        let text: RemoteLogConfig = serde_json::from_value(serde_json::json!({
            "logType": "DEBUG",
            "connectTimeoutMillis": "250"
        }))
        .unwrap();
        assert_eq!(text.connect_timeout_millis.as_deref(), Some("250"));
        assert!(!text.verify_hostname);
    }

    #[test]
    fn unset_config_detection() {
        let config = RemoteLogConfig {
            log_type: Some(LogType::Debug),
            ..Default::default()
        };
        assert!(config.is_unset());

        let configured = RemoteLogConfig {
            remote_url: Some("https://logs.test".into()),
            ..config
        };
        assert!(!configured.is_unset());
    }

    #[test]
    fn form_to_config_drops_blank_fields() {
        let form = RemoteLogForm {
            remote_url: " https://logs.test ".into(),
            connect_timeout_millis: Some(String::new()),
            username: Some("admin".into()),
            password: Some(String::new()),
            ..RemoteLogForm::default()
        };
        let config = form.to_config(LogType::Audit);
        assert_eq!(config.remote_url.as_deref(), Some("https://logs.test"));
        assert_eq!(config.connect_timeout_millis, None);
        assert_eq!(config.password, None);

        let body = serde_json::to_value(&config).unwrap();
        assert_eq!(body["logType"], "AUDIT");
        assert!(body.get("password").is_none());
    }

    #[test]
    fn form_initializes_from_config() {
        let config = RemoteLogConfig {
            log_type: Some(LogType::Audit),
            remote_url: Some("https://logs.test".into()),
            verify_hostname: true,
            ..Default::default()
        };
        let form = RemoteLogForm::from_config(&config);
        assert_eq!(form.remote_url, "https://logs.test");
        assert!(form.verify_hostname);
    }

    #[test]
    fn debug_redacts_passwords() {
        let config = RemoteLogConfig {
            password: Some("test-placeholder-value".into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("test-placeholder-value"));
    }

    #[test]
    fn log_type_parses_case_insensitively() {
        assert_eq!("audit".parse::<LogType>(), Ok(LogType::Audit));
        assert!("trace".parse::<LogType>().is_err());
    }
}
