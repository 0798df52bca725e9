//! Account and session endpoints (`/auth/v1`)

use fd_core::auth::{AuthUser, Credentials, Session, SignUp};
use reqwest::Method;
use serde_json::json;

use crate::{client::BackendClient, error::ClientError};

impl BackendClient {
    /// Create an account and sign it in
    pub async fn sign_up(&self, sign_up: &SignUp) -> Result<Session, ClientError> {
        sign_up.validate()?;

        let request = self
            .request(Method::POST, "/auth/v1/signup")
            .json(sign_up);
        let session: Session = self.send(request).await?;

        tracing::info!(user_id = %session.user.id, "signed up");
        Ok(session)
    }

    /// Sign in with email and password
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, ClientError> {
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(ClientError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let request = self
            .request(Method::POST, "/auth/v1/token")
            .json(credentials);
        let session: Session = self.send(request).await?;

        tracing::info!(user_id = %session.user.id, "signed in");
        Ok(session)
    }

    /// Trade the refresh token of `session` for a fresh session
    pub async fn refresh_session(&self, session: &Session) -> Result<Session, ClientError> {
        let request = self
            .request(Method::POST, "/auth/v1/refresh")
            .json(&json!({ "refresh_token": session.refresh_token }));

        self.send(request).await
    }

    /// Revoke the current access token
    pub async fn sign_out(&self) -> Result<(), ClientError> {
        let request = self.authed(Method::POST, "/auth/v1/logout")?;
        self.send_empty(request).await?;

        tracing::info!("signed out");
        Ok(())
    }

    /// The user the access token belongs to
    pub async fn current_user(&self) -> Result<AuthUser, ClientError> {
        let request = self.authed(Method::GET, "/auth/v1/user")?;
        self.send(request).await
    }
}
