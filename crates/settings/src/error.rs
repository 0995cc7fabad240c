use thiserror::Error;
use warden_core::FieldErrors;

/// Failure reported by a management API call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// The addressed resource does not exist. The server's description is
    /// kept when the 404 carried one.
    #[error("resource not found")]
    NotFound { description: Option<String> },

    /// The server answered with a non-success status.
    #[error("request rejected (HTTP {status}): {message}")]
    Rejected {
        status: u16,
        message: String,
        description: Option<String>,
    },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Returns `true` for a 404 answer.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The human-readable description supplied by the server, if any.
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::NotFound { description } | Self::Rejected { description, .. } => {
                description.as_deref()
            }
            _ => None,
        }
    }
}

/// Why a settings submission did not complete.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("settings are read-only for this session")]
    ReadOnly,

    #[error("no SMS provider is selected")]
    NoProviderSelected,

    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// Removing the existing configuration failed. Nothing was changed.
    #[error("failed to delete the existing configuration: {0}")]
    Delete(#[source] ApiError),

    /// The old configuration was deleted but the new one was not stored.
    /// The server is left without a configuration.
    #[error("configuration was deleted but the update failed: {0}")]
    UpdateAfterDelete(#[source] ApiError),

    #[error("update failed: {0}")]
    Update(#[source] ApiError),

    #[error("restore failed: {0}")]
    Restore(#[source] ApiError),
}

impl SubmissionError {
    /// The API failure behind this error, if the server was reached.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Delete(e) | Self::UpdateAfterDelete(e) | Self::Update(e) | Self::Restore(e) => {
                Some(e)
            }
            Self::ReadOnly | Self::NoProviderSelected | Self::Validation(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::Field;

    #[test]
    fn description_from_server_answers() {
        let rejected = ApiError::Rejected {
            status: 400,
            message: "Bad request".into(),
            description: Some("Sender is malformed".into()),
        };
        assert_eq!(rejected.description(), Some("Sender is malformed"));
        let missing = ApiError::NotFound {
            description: Some("Organization abc does not exist".into()),
        };
        assert!(missing.is_not_found());
        assert_eq!(missing.description(), Some("Organization abc does not exist"));
        assert_eq!(ApiError::Transport("reset".into()).description(), None);
    }

    #[test]
    fn validation_error_lists_fields() {
        let mut errors = FieldErrors::new();
        errors.insert(Field::Key, "This field is required");
        let err = SubmissionError::Validation(errors);
        assert_eq!(err.to_string(), "validation failed: key: This field is required");
        assert!(err.api_error().is_none());
    }

    #[test]
    fn update_after_delete_exposes_cause() {
        let err = SubmissionError::UpdateAfterDelete(ApiError::Transport("reset".into()));
        assert_eq!(err.api_error(), Some(&ApiError::Transport("reset".into())));
    }
}
