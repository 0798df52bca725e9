use axum::{
    Router, http::StatusCode, middleware, response::Response, routing::get,
};
use fd_core::ApiErrorResponse;
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::{
    cors::{cors_middleware, json_with_cors, json_with_cors_status},
    deck,
    middleware::{panic::handle_panic, request_id::request_id_middleware},
    state::EdgeState,
};

/// Routes of the edge function, without middleware
pub fn router() -> Router<EdgeState> {
    Router::new()
        .route("/health", get(health))
        .merge(deck::routes())
        .fallback(handler_404)
}

/// The complete service: routes, state and the middleware stack.
///
/// Outermost first: request id, HTTP trace, panic catcher, CORS.
pub fn app(state: EdgeState) -> Router {
    router()
        .with_state(state)
        .layer(middleware::from_fn(cors_middleware))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

async fn health() -> Response {
    json_with_cors(&json!({ "status": "ok" }))
}

async fn handler_404() -> Response {
    json_with_cors_status(
        &ApiErrorResponse::new("The requested resource was not found"),
        StatusCode::NOT_FOUND,
    )
}
