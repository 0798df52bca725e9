//! Async wrappers around the hosted flashdeck backend: accounts and
//! sessions, the friends list, decks, cards and deck sharing.
//!
//! ```no_run
//! use fd_client::{BackendClient, ClientConfig};
//! use fd_core::auth::Credentials;
//!
//! # async fn run() -> Result<(), fd_client::ClientError> {
//! let client = BackendClient::new(&ClientConfig::from_env().expect("backend config"))?;
//! let session = client
//!     .sign_in(&Credentials {
//!         email: "maria@example.com".to_string(),
//!         password: "password123".to_string(),
//!     })
//!     .await?;
//! let decks = client.with_session(&session).list_decks().await?;
//! # let _ = decks;
//! # Ok(())
//! # }
//! ```

mod auth;
pub mod client;
pub mod config;
mod decks;
pub mod error;
mod friends;

pub use client::BackendClient;
pub use config::ClientConfig;
pub use error::ClientError;
