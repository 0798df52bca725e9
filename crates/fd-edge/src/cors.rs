//! CORS-enabled JSON responses.
//!
//! The edge function is called straight from browsers on other origins, so
//! every response it produces carries the same fixed set of CORS headers.

use axum::{
    Json,
    extract::Request,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// CORS headers attached to every response
pub const CORS_HEADERS: [(HeaderName, &str); 3] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        "authorization, x-client-info, apikey, content-type",
    ),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
];

/// Insert [`CORS_HEADERS`], replacing any value already present
pub fn apply_cors_headers(headers: &mut HeaderMap) {
    for (name, value) in CORS_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }
}

/// `200 OK` JSON response with the CORS headers
pub fn json_with_cors<T: Serialize>(data: &T) -> Response {
    json_with_cors_status(data, StatusCode::OK)
}

/// JSON response with the given status and the CORS headers
pub fn json_with_cors_status<T: Serialize>(data: &T, status: StatusCode) -> Response {
    let mut response = (status, Json(data)).into_response();
    apply_cors_headers(response.headers_mut());
    response
}

/// Answer to a browser preflight request
pub fn preflight() -> Response {
    let mut response = (StatusCode::OK, "ok").into_response();
    apply_cors_headers(response.headers_mut());
    response
}

/// Answer preflight requests on any path and make sure nothing leaves
/// without the CORS headers (extractor rejections included).
pub async fn cors_middleware(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return preflight();
    }

    let mut response = next.run(req).await;
    if !response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    {
        apply_cors_headers(response.headers_mut());
    }
    response
}
