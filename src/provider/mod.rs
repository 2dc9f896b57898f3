use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub mod jigsaw;

pub use jigsaw::JigsawProvider;

/// Failure reported by a search provider, tagged by kind so callers never
/// have to inspect message text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("{0}")]
    Timeout(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Unknown(String),
}

impl ProviderError {
    pub fn timeout(timeout_ms: u64) -> Self {
        ProviderError::Timeout(format!("Request timed out after {}ms", timeout_ms))
    }

    /// Best-effort classification of an untyped failure by its text.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lowered = message.to_lowercase();
        if lowered.contains("timed out") {
            ProviderError::Timeout(message)
        } else if lowered.contains("not found") || lowered.contains("404") {
            ProviderError::NotFound(message)
        } else if lowered.contains("unauthorized") || lowered.contains("invalid key") {
            ProviderError::Unauthorized(message)
        } else {
            ProviderError::Unknown(message)
        }
    }

    /// Classifies an HTTP failure, trusting the status code over the text.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => ProviderError::Unauthorized(message.into()),
            404 => ProviderError::NotFound(message.into()),
            408 | 504 => ProviderError::Timeout(message.into()),
            _ => ProviderError::from_message(message),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ProviderError::Timeout(m)
            | ProviderError::NotFound(m)
            | ProviderError::Unauthorized(m)
            | ProviderError::Unknown(m) => m,
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        let message = error.to_string();
        match error.status() {
            Some(status) => ProviderError::from_status(status.as_u16(), message),
            None if error.is_timeout() => ProviderError::Timeout(message),
            None => ProviderError::from_message(message),
        }
    }
}

/// A search backend. The reply is handed over untouched so the proxy can
/// forward exactly what the provider sent.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str) -> Result<Value, ProviderError>;
}
