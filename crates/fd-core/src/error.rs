//! Error shapes shared by the client and the edge function.

use std::{any::Any, error::Error as StdError, fmt};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Deck is not shared")]
    NotShared,
}

/// Error payload returned by the hosted backend and by the edge function.
///
/// On the wire this is always `{ "error": "<message>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

impl ApiErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }

    /// Extract the error payload from an arbitrary JSON value.
    ///
    /// Returns `None` for anything [`is_api_error_response`] rejects.
    pub fn from_value(value: &Value) -> Option<Self> {
        value
            .as_object()?
            .get("error")?
            .as_str()
            .map(Self::new)
    }
}

impl fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error)
    }
}

/// Whether a JSON payload is an error response rather than a success payload.
///
/// True only for a non-null object carrying a string `error` field. Extra
/// fields are ignored.
///
/// # Examples
/// ```
/// use fd_core::error::is_api_error_response;
/// use serde_json::json;
///
/// assert!(is_api_error_response(&json!({ "error": "bad" })));
/// assert!(!is_api_error_response(&json!({})));
/// assert!(!is_api_error_response(&json!(null)));
/// assert!(!is_api_error_response(&json!("err")));
/// ```
pub fn is_api_error_response(value: &Value) -> bool {
    matches!(
        value.as_object().and_then(|obj| obj.get("error")),
        Some(Value::String(_))
    )
}

/// Best-effort human readable message for a value of unknown type.
///
/// Strings are returned as they are and known error types give their
/// `Display` message. Recognized: `String`, `&'static str`, `anyhow::Error`,
/// `Box<dyn Error + Send + Sync>`, `Box<dyn Error + Send>`,
/// `std::io::Error`, `serde_json::Error`, [`CoreError`] and
/// [`ApiErrorResponse`].
///
/// Returns `None` for:
/// - non-error values (numbers, unit, collections, ...);
/// - concrete error types of other crates (`reqwest::Error`, client or edge
///   error enums), which `Any` cannot see as `dyn Error`. Use
///   [`error_message_of`] when the error is already typed.
///
/// This is what panic payloads (`Box<dyn Any + Send>`) are run through; pass
/// the payload with `payload.as_ref()`, not a reference to the box.
pub fn error_message(value: &(dyn Any + Send)) -> Option<String> {
    if let Some(s) = value.downcast_ref::<String>() {
        return Some(s.clone());
    }
    if let Some(s) = value.downcast_ref::<&'static str>() {
        return Some((*s).to_string());
    }
    if let Some(err) = value.downcast_ref::<anyhow::Error>() {
        return Some(err.to_string());
    }
    if let Some(err) = value.downcast_ref::<Box<dyn StdError + Send + Sync>>() {
        return Some(error_message_of(&**err));
    }
    if let Some(err) = value.downcast_ref::<Box<dyn StdError + Send>>() {
        return Some(error_message_of(&**err));
    }
    if let Some(err) = value.downcast_ref::<std::io::Error>() {
        return Some(error_message_of(err));
    }
    if let Some(err) = value.downcast_ref::<serde_json::Error>() {
        return Some(error_message_of(err));
    }
    if let Some(err) = value.downcast_ref::<CoreError>() {
        return Some(error_message_of(err));
    }
    value
        .downcast_ref::<ApiErrorResponse>()
        .map(|err| err.error.clone())
}

/// Message of an error whose type is known to be an error
pub fn error_message_of(err: &(dyn StdError + 'static)) -> String {
    err.to_string()
}
