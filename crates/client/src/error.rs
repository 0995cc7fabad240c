//! Error types for the Warden client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Structured error body returned by the management APIs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error code (e.g. `NSM-60002`).
    pub code: String,
    /// Short error message.
    pub message: String,
    /// Longer, user-presentable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Server-side correlation id.
    #[serde(default)]
    pub trace_id: Option<String>,
}

/// Errors that can occur when using the Warden client.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection error (network failure, DNS resolution, etc.).
    #[error("connection error: {0}")]
    Connection(String),

    /// HTTP error with status code and no structured body.
    #[error("HTTP {status}: {message}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// API error returned by the server.
    #[error("API error [{code}] (HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// Optional detailed description.
        description: Option<String>,
    },

    /// Response deserialization error.
    #[error("failed to deserialize response: {0}")]
    Deserialization(String),

    /// Client configuration error.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// HTTP status code of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } | Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns `true` if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_))
    }

    /// Server-provided description, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Api { description, .. } => description.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_detection() {
        let http = Error::Http {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert!(http.is_not_found());

        let api = Error::Api {
            status: 404,
            code: "NSM-60006".to_string(),
            message: "No sender found".to_string(),
            description: None,
        };
        assert!(api.is_not_found());

        let server = Error::Http {
            status: 500,
            message: "Internal Server Error".to_string(),
        };
        assert!(!server.is_not_found());
        assert!(!Error::Connection("reset".into()).is_not_found());
    }

    #[test]
    fn description_only_from_api_errors() {
        let api = Error::Api {
            status: 400,
            code: "ORG-60001".to_string(),
            message: "Invalid request".to_string(),
            description: Some("Organization id is malformed".to_string()),
        };
        assert_eq!(api.description(), Some("Organization id is malformed"));
        assert_eq!(Error::Deserialization("x".into()).description(), None);
    }

    #[test]
    fn error_response_parses_server_body() {
        let body: ErrorResponse = serde_json::from_str(
            r#"{"code":"NSM-65001","message":"Unable to delete","description":"Sender in use","traceId":"t-1"}"#,
        )
        .unwrap();
        assert_eq!(body.code, "NSM-65001");
        assert_eq!(body.trace_id.as_deref(), Some("t-1"));
    }

    #[test]
    fn error_display() {
        let err = Error::Api {
            status: 409,
            code: "NSM-60003".into(),
            message: "Conflict".into(),
            description: None,
        };
        assert_eq!(err.to_string(), "API error [NSM-60003] (HTTP 409): Conflict");
    }
}
