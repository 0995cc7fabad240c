use std::collections::BTreeMap;
use std::fmt;

use crate::remote_logging::RemoteLogForm;
use crate::sms::{ProviderKind, SmsProvider};

const REQUIRED: &str = "This field is required";
const REMOTE_URL_MISSING: &str = "Remote logging destination endpoint URL is missing";
const TIMEOUT_NOT_A_NUMBER: &str = "Connection timeout must be a non-negative number of milliseconds";

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Key,
    Secret,
    Sender,
    Provider,
    ProviderUrl,
    ContentType,
    Payload,
    RemoteUrl,
    ConnectTimeout,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Key => "key",
            Self::Secret => "secret",
            Self::Sender => "sender",
            Self::Provider => "provider",
            Self::ProviderUrl => "providerURL",
            Self::ContentType => "contentType",
            Self::Payload => "payload",
            Self::RemoteUrl => "remoteUrl",
            Self::ConnectTimeout => "connectTimeoutMillis",
        };
        f.write_str(name)
    }
}

/// Field-level validation messages for one form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn require(&mut self, field: Field, value: Option<&str>) {
        if value.is_none_or(str::is_empty) {
            self.insert(field, REQUIRED);
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Validate SMS sender form values against the selected provider kind.
///
/// Every kind needs key, secret and sender. Custom providers additionally
/// need the provider name, endpoint URL, content type and body template.
pub fn validate_sms_provider(selected: ProviderKind, values: &SmsProvider) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.require(Field::Key, Some(&values.key));
    errors.require(Field::Secret, Some(&values.secret));
    errors.require(Field::Sender, Some(&values.sender));

    if selected == ProviderKind::Custom {
        errors.require(Field::Provider, Some(&values.provider));
        errors.require(Field::ProviderUrl, values.provider_url.as_deref());
        if values.content_type.is_none() {
            errors.insert(Field::ContentType, REQUIRED);
        }
        errors.require(Field::Payload, values.payload.as_deref());
    }

    errors
}

/// Validate remote log publishing form values.
pub fn validate_remote_log(form: &RemoteLogForm) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.remote_url.trim().is_empty() {
        errors.insert(Field::RemoteUrl, REMOTE_URL_MISSING);
    }
    if let Some(timeout) = form.connect_timeout_millis.as_deref().filter(|t| !t.is_empty())
        && timeout.trim().parse::<u64>().is_err()
    {
        errors.insert(Field::ConnectTimeout, TIMEOUT_NOT_A_NUMBER);
    }
    errors
}
