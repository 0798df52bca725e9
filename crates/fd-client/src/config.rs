use serde::Deserialize;

const fn default_timeout_secs() -> u64 {
    10
}

/// Where the hosted backend lives and how to reach it
#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    /// Root URL of the backend, e.g. `https://xyz.backend.example`
    #[serde(rename = "url")]
    pub base_url: String,
    /// Project key sent as the `apikey` header on every request
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ClientConfig {
    /// Config with the default timeout
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// Read `FLASHDECK_BACKEND_URL`, `FLASHDECK_BACKEND_API_KEY` and the
    /// optional `FLASHDECK_BACKEND_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("FLASHDECK_BACKEND_").from_env()
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
