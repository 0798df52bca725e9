use std::any::Any;

use axum::{http::StatusCode, response::Response};
use fd_core::{ApiErrorResponse, error_message};

use crate::cors::json_with_cors_status;

/// Turn a handler panic into a CORS-enabled 500 response.
///
/// Plug into `tower_http::catch_panic::CatchPanicLayer::custom`. The panic
/// message is logged, never sent to the caller.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = error_message(payload.as_ref()).unwrap_or_else(|| "unknown panic".to_string());
    tracing::error!(panic = %message, "handler panicked");

    json_with_cors_status(
        &ApiErrorResponse::new("Internal server error"),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
}
