//! The flashdeck edge function: a small HTTP service in front of the hosted
//! backend that serves shared decks and publishes or unpublishes decks,
//! answering browsers on any origin with CORS-enabled JSON.

pub mod auth;
pub mod config;
pub mod cors;
pub mod deck;
pub mod error;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tracing;

pub use config::{EdgeConfig, Environment};
pub use cors::{json_with_cors, json_with_cors_status};
pub use state::EdgeState;
