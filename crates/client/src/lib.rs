//! Warden HTTP Client
//!
//! A native Rust client for the identity server management REST APIs used by
//! the Warden settings console.
//!
//! # Quick Start
//!
//! ```no_run
//! use warden_client::WardenClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), warden_client::Error> {
//!     let client = WardenClient::builder("https://localhost:9443")
//!         .tenant("acme.com")
//!         .access_token("token")
//!         .build()?;
//!
//!     for record in client.list_sms_providers().await? {
//!         println!("{} via {}", record.name, record.provider);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Resources
//!
//! - SMS notification senders (list, create, delete)
//! - Remote log publishing configuration (list, update, restore)
//! - Application provisioning configuration (get, patch)
//! - Organizations (get, authorized listing)

pub mod applications;
mod error;
#[cfg(test)]
mod mock_server;
pub mod organizations;
pub mod remote_logging;
pub mod sms_providers;

pub use error::{Error, ErrorResponse};

use std::time::Duration;

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use reqwest::{Client, Response};
use warden_core::TenantDomain;

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Characters escaped when an identifier is placed in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// HTTP client for the identity server management APIs.
#[derive(Debug, Clone)]
pub struct WardenClient {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

/// Builder for configuring a [`WardenClient`].
#[derive(Debug)]
pub struct WardenClientBuilder {
    endpoint: String,
    tenant: Option<TenantDomain>,
    timeout: Duration,
    access_token: Option<String>,
    client: Option<Client>,
}

impl WardenClientBuilder {
    /// Create a new builder for the given server endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            tenant: None,
            timeout: DEFAULT_TIMEOUT,
            access_token: None,
            client: None,
        }
    }

    /// Scope every request to a tenant (`/t/{tenant}` prefix).
    ///
    /// The super tenant is addressed without a prefix.
    #[must_use]
    pub fn tenant(mut self, tenant: impl Into<TenantDomain>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the OAuth2 access token sent as a bearer credential.
    #[must_use]
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Use a custom reqwest Client.
    ///
    /// Useful for configuring TLS, proxies, or other advanced settings.
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<WardenClient, Error> {
        if self.endpoint.is_empty() {
            return Err(Error::Configuration("endpoint must not be empty".into()));
        }

        let client = match self.client {
            Some(c) => c,
            None => Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(|e| Error::Configuration(e.to_string()))?,
        };

        let base_url = match self.tenant {
            Some(tenant) if !tenant.is_super_tenant() => {
                format!("{}/t/{}", self.endpoint, encode_segment(tenant.as_str()))
            }
            _ => self.endpoint,
        };

        Ok(WardenClient {
            client,
            base_url,
            access_token: self.access_token,
        })
    }
}

impl WardenClient {
    /// Create a new client with default configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use warden_client::WardenClient;
    ///
    /// let client = WardenClient::new("https://localhost:9443");
    /// ```
    pub fn new(endpoint: impl Into<String>) -> Self {
        WardenClientBuilder::new(endpoint)
            .build()
            .expect("default client configuration should not fail")
    }

    /// Create a builder for advanced configuration.
    pub fn builder(endpoint: impl Into<String>) -> WardenClientBuilder {
        WardenClientBuilder::new(endpoint)
    }

    /// Get the tenant-qualified base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Add authorization header if an access token is set.
    fn add_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Build a URL under the server management API root.
    fn server_api(&self, path: &str) -> String {
        format!("{}/api/server/v1{path}", self.base_url)
    }
}

/// Percent-encode a value for use as a single URL path segment.
pub(crate) fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Decode a successful JSON response body.
pub(crate) async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, Error> {
    response
        .json::<T>()
        .await
        .map_err(|e| Error::Deserialization(e.to_string()))
}

/// Turn a non-success response into an [`Error`].
///
/// Uses the server's structured error body when one is present, otherwise
/// falls back to the status code and `context`.
pub(crate) async fn error_from(response: Response, context: &str) -> Error {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(error) => Error::Api {
            status,
            code: error.code,
            message: error.message,
            description: error.description,
        },
        Err(_) => Error::Http {
            status,
            message: context.to_owned(),
        },
    }
}
