//! Error types for the operations layer.

use thiserror::Error;

/// Errors from the operations layer.
#[derive(Debug, Error)]
pub enum OpsError {
    /// Configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    ConfigFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::OpsConfig`].
    #[error("invalid configuration file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Error from the underlying HTTP client.
    #[error(transparent)]
    Client(#[from] warden_client::Error),
}
