use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::property::PropertyBag;

/// Name under which the backend stores the single active SMS sender.
pub const SMS_PUBLISHER_NAME: &str = "SMSPublisher";

/// Provider selected when the server holds no configuration.
pub const DEFAULT_PROVIDER_KIND: ProviderKind = ProviderKind::Twilio;

/// The family of SMS provider a configuration targets.
///
/// Determines which fields are required and how the record is shaped on the
/// wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProviderKind {
    Twilio,
    Vonage,
    Custom,
}

impl ProviderKind {
    pub const ALL: [Self; 3] = [Self::Twilio, Self::Vonage, Self::Custom];

    /// Classify a wire `provider` value. Anything that is not exactly
    /// `Twilio` or `Vonage` is a custom provider.
    pub fn classify(provider: &str) -> Self {
        match provider {
            "Twilio" => Self::Twilio,
            "Vonage" => Self::Vonage,
            _ => Self::Custom,
        }
    }

    /// Provider name the backend expects for built-in kinds.
    pub fn canonical_name(self) -> Option<&'static str> {
        match self {
            Self::Twilio => Some("Twilio"),
            Self::Vonage => Some("Vonage"),
            Self::Custom => None,
        }
    }

    /// Key under which the console keys per-provider form values.
    pub fn form_key(self) -> &'static str {
        match self {
            Self::Twilio => "TwilioSMSProvider",
            Self::Vonage => "VonageSMSProvider",
            Self::Custom => "CustomSMSProvider",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Twilio => write!(f, "twilio"),
            Self::Vonage => write!(f, "vonage"),
            Self::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for ProviderKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "twilio" => Ok(Self::Twilio),
            "vonage" => Ok(Self::Vonage),
            "custom" => Ok(Self::Custom),
            _ => Err(CoreError::UnknownProviderKind(s.to_owned())),
        }
    }
}

/// Body encoding used by a custom HTTP SMS provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ContentType {
    #[default]
    Json,
    Form,
}

impl FromStr for ContentType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "JSON" => Ok(Self::Json),
            "FORM" => Ok(Self::Form),
            _ => Err(CoreError::UnknownContentType(s.to_owned())),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "JSON"),
            Self::Form => write!(f, "FORM"),
        }
    }
}

/// SMS sender record as exchanged with the notification-senders API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsProviderRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(
        rename = "providerURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub provider_url: Option<String>,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub sender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(default)]
    pub properties: PropertyBag,
}

/// Flat, provider-specific view of an SMS sender configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct SmsProvider {
    pub kind: ProviderKind,
    pub name: String,
    /// Raw provider name. Free text for custom providers.
    pub provider: String,
    pub key: String,
    pub secret: String,
    pub sender: String,
    pub provider_url: Option<String>,
    pub content_type: Option<ContentType>,
    /// Request body template (`body` property).
    pub payload: Option<String>,
    /// Extra request headers (`http.headers` property).
    pub headers: Option<String>,
    /// HTTP method (`http.method` property).
    pub http_method: Option<String>,
}

impl SmsProvider {
    /// Empty form values for a provider kind.
    pub fn default_for(kind: ProviderKind) -> Self {
        Self {
            kind,
            name: SMS_PUBLISHER_NAME.to_owned(),
            provider: kind.canonical_name().unwrap_or_default().to_owned(),
            key: String::new(),
            secret: String::new(),
            sender: String::new(),
            provider_url: None,
            content_type: None,
            payload: None,
            headers: None,
            http_method: None,
        }
    }
}

impl fmt::Debug for SmsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SmsProvider")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("key", &self.key)
            .field("secret", &"[REDACTED]")
            .field("sender", &self.sender)
            .field("provider_url", &self.provider_url)
            .field("content_type", &self.content_type)
            .field("payload", &self.payload)
            .field("headers", &self.headers)
            .field("http_method", &self.http_method)
            .finish()
    }
}
