use crate::provider::jigsaw::JIGSAW_API_URL;
use crate::proxy::DEFAULT_TIMEOUT_MS;
use clap::Args;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 8095;
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8095";

#[derive(Args, Debug, Clone)]
pub struct ServerConfig {
    /// Port the proxy listens on
    #[arg(long, env = "PERPLEXITY_SERVER_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// JigsawStack API key; an empty key is rejected by the provider
    #[arg(long, env = "JIGSAW_API_KEY", default_value = "", hide_env_values = true)]
    pub api_key: String,

    /// JigsawStack API base URL
    #[arg(long, env = "JIGSAW_BASE_URL", default_value = JIGSAW_API_URL)]
    pub base_url: String,

    /// Upper bound on a single provider call, in milliseconds
    #[arg(long, env = "PERPLEXITY_TIMEOUT_MS", default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,
}

impl ServerConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: String::new(),
            base_url: JIGSAW_API_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the running proxy server
    #[arg(long, env = "PERPLEXITY_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,
}
