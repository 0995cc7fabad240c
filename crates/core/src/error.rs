use thiserror::Error;

/// Errors raised while parsing console values from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("unknown SMS provider kind: {0}")]
    UnknownProviderKind(String),

    #[error("unknown content type: {0}")]
    UnknownContentType(String),

    #[error("unknown log type: {0}")]
    UnknownLogType(String),
}
