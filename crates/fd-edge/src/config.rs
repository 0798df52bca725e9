use serde::Deserialize;

/// Deployment environment, drives log format and verbosity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

/// Settings of the edge function, read from `FLASHDECK_*` variables
#[derive(Clone, Debug, Deserialize)]
pub struct EdgeConfig {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Public site that renders share pages, used to build share links
    pub public_site_url: String,
}

impl EdgeConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed("FLASHDECK_").from_env()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
