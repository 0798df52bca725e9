//! Log output of the edge function.
//!
//! Every request runs inside a `request` span carrying `request_id`,
//! `method` and `path` (see [`crate::middleware::request_id`]). Handlers add
//! `share_id` and `cards` when a shared deck is served and `deck_id` and
//! `share_id` on publish and unpublish; failed requests log `error` and
//! `status`. Development prints these as pretty multi-line events, production
//! as one flattened JSON object per event with the span fields inlined.
//! `RUST_LOG` replaces the default filter.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Environment;

const DEVELOPMENT_FILTER: &str = "debug,tower_http=debug,reqwest=info,hyper_util=info";
const PRODUCTION_FILTER: &str = "info,tower_http=info,reqwest=warn,hyper_util=warn";

/// Install the global subscriber for `env`. Call once, at startup.
pub fn init_tracing(env: &Environment) {
    match env {
        Environment::Development => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_target(true)
                        .with_line_number(true)
                        .pretty()
                        .with_filter(env_filter(DEVELOPMENT_FILTER)),
                )
                .init();
        }
        Environment::Production => {
            tracing_subscriber::registry()
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_current_span(true)
                        .with_span_list(false)
                        .flatten_event(true)
                        .with_filter(env_filter(PRODUCTION_FILTER)),
                )
                .init();
        }
    }

    tracing::info!(environment = ?env, "edge function logging ready");
}

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}
