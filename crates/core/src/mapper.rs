//! Bidirectional mapping between [`SmsProviderRecord`] and [`SmsProvider`].
//!
//! The wire record keeps provider-specific extension fields in a
//! [`PropertyBag`]; the view model exposes them as typed fields. The mapping
//! between the two is a fixed table ([`PROPERTY_BINDINGS`]) so adding a field
//! means adding one row with a getter and a setter.
//!
//! Reading is lossy: bag entries whose key
//! is not in the table are dropped, and empty strings are treated as absent.

use crate::property::PropertyBag;
use crate::sms::{ProviderKind, SmsProvider, SmsProviderRecord};

/// Property key holding the request body template.
pub const BODY_KEY: &str = "body";
/// Property key holding extra HTTP headers.
pub const HEADERS_KEY: &str = "http.headers";
/// Property key holding the HTTP method.
pub const METHOD_KEY: &str = "http.method";

/// One row of the property mapping table.
pub struct PropertyBinding {
    pub key: &'static str,
    get: fn(&SmsProvider) -> Option<&str>,
    set: fn(&mut SmsProvider, String),
}

impl PropertyBinding {
    pub fn read<'a>(&self, provider: &'a SmsProvider) -> Option<&'a str> {
        (self.get)(provider)
    }

    pub fn write(&self, provider: &mut SmsProvider, value: String) {
        (self.set)(provider, value);
    }
}

fn get_payload(p: &SmsProvider) -> Option<&str> {
    p.payload.as_deref()
}

fn set_payload(p: &mut SmsProvider, value: String) {
    p.payload = Some(value);
}

fn get_headers(p: &SmsProvider) -> Option<&str> {
    p.headers.as_deref()
}

fn set_headers(p: &mut SmsProvider, value: String) {
    p.headers = Some(value);
}

fn get_http_method(p: &SmsProvider) -> Option<&str> {
    p.http_method.as_deref()
}

fn set_http_method(p: &mut SmsProvider, value: String) {
    p.http_method = Some(value);
}

/// Known property keys, in the order they are emitted on the wire.
pub const PROPERTY_BINDINGS: [PropertyBinding; 3] = [
    PropertyBinding {
        key: BODY_KEY,
        get: get_payload,
        set: set_payload,
    },
    PropertyBinding {
        key: HEADERS_KEY,
        get: get_headers,
        set: set_headers,
    },
    PropertyBinding {
        key: METHOD_KEY,
        get: get_http_method,
        set: set_http_method,
    },
];

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

/// Map a wire record into the flat view model.
pub fn to_view_model(record: &SmsProviderRecord) -> SmsProvider {
    let mut provider = SmsProvider {
        kind: ProviderKind::classify(&record.provider),
        name: record.name.clone(),
        provider: record.provider.clone(),
        key: record.key.clone(),
        secret: record.secret.clone(),
        sender: record.sender.clone(),
        provider_url: non_empty(record.provider_url.as_deref()),
        content_type: record.content_type,
        payload: None,
        headers: None,
        http_method: None,
    };

    for binding in &PROPERTY_BINDINGS {
        if let Some(value) = non_empty(record.properties.get(binding.key)) {
            binding.write(&mut provider, value);
        }
    }

    provider
}

/// Map a view model back into the wire record.
///
/// Only non-empty extension fields are emitted; absent fields are omitted
/// rather than sent as empty values.
pub fn to_wire(config: &SmsProvider) -> SmsProviderRecord {
    let mut properties = PropertyBag::new();
    for binding in &PROPERTY_BINDINGS {
        if let Some(value) = non_empty(binding.read(config)) {
            properties.push(binding.key, value);
        }
    }

    let provider = config
        .kind
        .canonical_name()
        .map_or_else(|| config.provider.clone(), str::to_owned);

    SmsProviderRecord {
        name: config.name.clone(),
        provider,
        provider_url: non_empty(config.provider_url.as_deref()),
        key: config.key.clone(),
        secret: config.secret.clone(),
        sender: config.sender.clone(),
        content_type: config.content_type,
        properties,
    }
}
