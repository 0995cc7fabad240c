//! Configuration for the operations layer.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};
use warden_core::{FeatureAccessConfig, has_required_scopes};

use crate::error::OpsError;

const DEFAULT_ENDPOINT: &str = "https://localhost:9443";

/// Per-feature access configuration of the console.
///
/// An absent feature places no scope restriction on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub sms_providers: Option<FeatureAccessConfig>,
    pub remote_logging: Option<FeatureAccessConfig>,
    pub applications: Option<FeatureAccessConfig>,
    pub organizations: Option<FeatureAccessConfig>,
}

/// Configuration for connecting to the identity server.
#[derive(Clone, Default)]
pub struct OpsConfig {
    /// Server endpoint URL (e.g. `https://localhost:9443`).
    pub endpoint: String,
    /// Tenant domain; `None` addresses the super tenant.
    pub tenant: Option<String>,
    /// OAuth2 access token.
    pub token: Option<String>,
    /// Request timeout.
    pub timeout: Option<Duration>,
    /// Space-separated scopes granted to the session.
    pub scopes: String,
    pub features: FeaturesConfig,
}

impl std::fmt::Debug for OpsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpsConfig")
            .field("endpoint", &self.endpoint)
            .field("tenant", &self.tenant)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .field("scopes", &self.scopes)
            .field("features", &self.features)
            .finish()
    }
}

/// On-disk TOML layout.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    #[serde(default)]
    endpoint: Option<String>,
    #[serde(default)]
    tenant: Option<String>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    timeout_secs: Option<u64>,
    #[serde(default)]
    scopes: Option<String>,
    #[serde(default)]
    features: FeaturesConfig,
}

impl OpsConfig {
    /// Create a new configuration with defaults.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `WARDEN_ENDPOINT` (defaults to `https://localhost:9443`)
    /// - `WARDEN_TENANT` (optional)
    /// - `WARDEN_TOKEN` (optional)
    /// - `WARDEN_TIMEOUT_SECS` (optional)
    /// - `WARDEN_SCOPES` (optional, space-separated)
    pub fn from_env() -> Self {
        let endpoint =
            std::env::var("WARDEN_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());
        let timeout = std::env::var("WARDEN_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| parse_timeout(&raw));

        Self {
            endpoint,
            tenant: std::env::var("WARDEN_TENANT").ok(),
            token: std::env::var("WARDEN_TOKEN").ok(),
            timeout,
            scopes: std::env::var("WARDEN_SCOPES").unwrap_or_default(),
            features: FeaturesConfig::default(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, OpsError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "loading configuration file");
        let raw = std::fs::read_to_string(path).map_err(|source| OpsError::ConfigFile {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&raw)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(raw: &str) -> Result<Self, OpsError> {
        let file: FileConfig = toml::from_str(raw)?;
        Ok(Self {
            endpoint: file.endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            tenant: file.tenant,
            token: file.token,
            timeout: file.timeout_secs.map(Duration::from_secs),
            scopes: file.scopes.unwrap_or_default(),
            features: file.features,
        })
    }

    /// Override the endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the tenant domain.
    #[must_use]
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    /// Override the access token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the granted scopes.
    #[must_use]
    pub fn with_scopes(mut self, scopes: impl Into<String>) -> Self {
        self.scopes = scopes.into();
        self
    }

    /// Whether the session holds the update scopes of `feature`.
    pub fn update_granted(&self, feature: Option<&FeatureAccessConfig>) -> bool {
        let required = feature.map(|f| f.scopes.update.as_slice()).unwrap_or_default();
        has_required_scopes(feature, required, &self.scopes)
    }
}

/// Parse a timeout in whole seconds; unparsable values are ignored.
fn parse_timeout(raw: &str) -> Option<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(err) => {
            warn!(value = raw, error = %err, "ignoring invalid WARDEN_TIMEOUT_SECS");
            None
        }
    }
}
