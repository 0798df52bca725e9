use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::EdgeError;

/// Access token of the caller, taken from `Authorization: Bearer <token>`.
///
/// The edge function never inspects the token: it is forwarded to the
/// backend, which decides what the caller may do.
#[derive(Clone)]
pub struct BearerToken(pub String);

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = EdgeError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or_else(|| EdgeError::Unauthorized("Missing authorization header".to_string()))?;

        let token = value
            .to_str()
            .ok()
            .and_then(parse_bearer)
            .ok_or_else(|| EdgeError::Unauthorized("Malformed authorization header".to_string()))?;

        Ok(Self(token.to_string()))
    }
}

/// Token of a `Bearer <token>` header value. The scheme is case-insensitive.
fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
