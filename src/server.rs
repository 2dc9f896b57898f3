use crate::config::ServerConfig;
use crate::handlers::perplexity::handle_perplexity;
use crate::provider::{JigsawProvider, SearchProvider};
use rocket::routes;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Server launch error: {0}")]
    Launch(#[from] rocket::Error),
    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub struct ServerState {
    pub provider: Arc<dyn SearchProvider>,
    pub timeout: Duration,
}

impl ServerState {
    pub fn new(provider: Arc<dyn SearchProvider>, timeout: Duration) -> Self {
        Self { provider, timeout }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            Arc::new(JigsawProvider::with_base_url(&config.api_key, &config.base_url)),
            config.timeout(),
        )
    }
}

pub fn create_server(state: ServerState) -> rocket::Rocket<rocket::Build> {
    rocket::build()
        .manage(state)
        .mount("/", routes![handle_perplexity])
}

pub async fn run_server(config: &ServerConfig) -> Result<(), ServerError> {
    if config.timeout_ms == 0 {
        return Err(ServerError::Configuration(
            "timeout must be greater than zero".to_string(),
        ));
    }
    if config.api_key.is_empty() {
        log::warn!("JIGSAW_API_KEY is not set; provider calls will be rejected as unauthorized");
    }

    let figment = rocket::Config::figment().merge(("port", config.port));
    match create_server(ServerState::from_config(config))
        .configure(figment)
        .launch()
        .await
    {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to launch rocket server: {}", e);
            Err(ServerError::Launch(e))
        }
    }
}
