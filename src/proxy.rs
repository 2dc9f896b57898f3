use crate::provider::{ProviderError, SearchProvider};
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;

pub const DEFAULT_TIMEOUT_MS: u64 = 30000;

/// Runs a provider search bounded by `limit`. When the limit elapses first
/// the provider future is dropped, which aborts its outstanding request.
pub async fn search_with_timeout(
    provider: &dyn SearchProvider,
    query: &str,
    limit: Duration,
) -> Result<Value, ProviderError> {
    match timeout(limit, provider.search(query)).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::timeout(limit.as_millis() as u64)),
    }
}
