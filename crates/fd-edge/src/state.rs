use fd_client::BackendClient;

use crate::config::EdgeConfig;

#[derive(Clone, Debug)]
pub struct EdgeState {
    /// Backend client acting with the project key only; per-request clients
    /// add the caller's bearer token
    pub backend: BackendClient,
    pub public_site_url: String,
}

impl EdgeState {
    pub fn new(backend: BackendClient, config: &EdgeConfig) -> Self {
        Self {
            backend,
            public_site_url: config.public_site_url.trim_end_matches('/').to_string(),
        }
    }
}
