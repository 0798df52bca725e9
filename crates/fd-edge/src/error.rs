use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fd_client::ClientError;
use fd_core::{ApiErrorResponse, CoreError, error_message_of};
use thiserror::Error;

use crate::cors::json_with_cors_status;

#[derive(Error, Debug)]
pub enum EdgeError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("Backend error: {0}")]
    Backend(#[from] ClientError),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CoreError> for EdgeError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NotShared => Self::NotFound("Shared deck not found".to_string()),
            CoreError::Validation(msg) => Self::BadRequest(msg),
        }
    }
}

impl EdgeError {
    /// Status and public message of the error response
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Self::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Self::Backend(err) => backend_status_and_message(err),
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        }
    }
}

/// Forward what the caller can act on, hide the rest behind a 502
fn backend_status_and_message(err: &ClientError) -> (StatusCode, String) {
    match err {
        ClientError::Api { status, message } => match *status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => {
                (*status, message.clone())
            }
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            _ => (StatusCode::BAD_GATEWAY, "Backend request failed".to_string()),
        },
        ClientError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        ClientError::Unauthenticated => (StatusCode::UNAUTHORIZED, "Not signed in".to_string()),
        ClientError::Http(_) | ClientError::Decode(_) => {
            (StatusCode::BAD_GATEWAY, "Backend request failed".to_string())
        }
    }
}

impl IntoResponse for EdgeError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();

        let error = error_message_of(&self);
        if status.is_server_error() {
            tracing::error!(%error, %status, "request failed");
        } else {
            tracing::debug!(%error, %status, "request rejected");
        }

        json_with_cors_status(&ApiErrorResponse::new(message), status)
    }
}
