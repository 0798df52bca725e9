use fd_core::CoreError;
use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Backend error ({status}): {message}")]
    Api { status: StatusCode, message: String },
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Not signed in")]
    Unauthenticated,
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ClientError {
    /// HTTP status the backend answered with, if it answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }

    /// Whether the backend answered 404
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::Validation(msg),
            other => Self::Validation(other.to_string()),
        }
    }
}
