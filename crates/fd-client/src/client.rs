use std::time::Duration;

use fd_core::{ApiErrorResponse, auth::Session};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::Value;

use crate::{config::ClientConfig, error::ClientError};

/// Header carrying the project key on every backend request
pub const API_KEY_HEADER: &str = "apikey";

/// Thin async wrapper around the hosted backend.
///
/// Cloning is cheap: the underlying connection pool is shared. A client
/// without an access token can only reach public endpoints; use
/// [`BackendClient::with_session`] to act as a signed-in user.
#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: Option<String>,
}

impl BackendClient {
    /// Client for the backend described by `config`
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            access_token: None,
        })
    }

    /// Same client, acting with the given access token
    pub fn with_access_token(&self, token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
            ..self.clone()
        }
    }

    /// Same client, acting as the user of `session`
    pub fn with_session(&self, session: &Session) -> Self {
        self.with_access_token(session.access_token.clone())
    }

    /// Whether requests are sent on behalf of a user
    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Backend root URL, without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Request to `path` with the project key and, when set, the bearer token
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let request = self
            .http
            .request(method, self.url(path))
            .header(API_KEY_HEADER, &self.api_key);

        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Like [`Self::request`] but refuses to build it without an access token
    pub(crate) fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        if self.access_token.is_none() {
            return Err(ClientError::Unauthenticated);
        }
        Ok(self.request(method, path))
    }

    /// Send a request and decode its JSON body
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        tracing::debug!(%status, bytes = body.len(), "backend response");

        decode_response(status, &body)
    }

    /// Send a request whose success body does not matter
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> Result<(), ClientError> {
        self.send::<IgnoredAny>(request).await.map(|_| ())
    }
}

/// Turn a backend answer into either the expected payload or a [`ClientError`].
///
/// Error payloads (`{ "error": ... }`) win over the status code: a 200 that
/// carries one is still an error. Empty bodies decode as JSON `null`.
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<T, ClientError> {
    let value = if body.iter().all(u8::is_ascii_whitespace) {
        Value::Null
    } else {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => value,
            Err(err) if status.is_success() => return Err(ClientError::Decode(err)),
            Err(_) => Value::Null,
        }
    };

    if let Some(err) = ApiErrorResponse::from_value(&value) {
        tracing::warn!(%status, error = %err.error, "backend returned an error payload");
        return Err(ClientError::Api {
            status,
            message: err.error,
        });
    }

    if !status.is_success() {
        return Err(ClientError::Api {
            status,
            message: status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string(),
        });
    }

    Ok(serde_json::from_value(value)?)
}
