use crate::provider::{ProviderError, SearchProvider};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const JIGSAW_API_URL: &str = "https://api.jigsawstack.com";
const WEB_SEARCH_PATH: &str = "/v1/web/search";

#[derive(Serialize)]
struct JigsawSearchRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize, Default)]
struct JigsawErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// JigsawStack web search client.
#[derive(Debug, Clone)]
pub struct JigsawProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl JigsawProvider {
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(api_key, JIGSAW_API_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn headers(&self) -> Result<HeaderMap, ProviderError> {
        let mut headers = HeaderMap::new();
        let key_header = match HeaderValue::from_str(&self.api_key) {
            Ok(header) => header,
            Err(_) => {
                return Err(ProviderError::Unauthorized(
                    "Invalid key: credential contains illegal header characters".to_string(),
                ))
            }
        };
        headers.insert("x-api-key", key_header);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl SearchProvider for JigsawProvider {
    async fn search(&self, query: &str) -> Result<Value, ProviderError> {
        let url = format!("{}{}", self.base_url, WEB_SEARCH_PATH);
        log::debug!("JigsawStack web search: {:?}", query);

        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&JigsawSearchRequest { query })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let parsed: JigsawErrorBody = serde_json::from_str(&body).unwrap_or_default();
            let message = parsed
                .message
                .or(parsed.error)
                .unwrap_or_else(|| format!("JigsawStack returned status code: {}", status));
            return Err(ProviderError::from_status(status.as_u16(), message));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ProviderError::Unknown(format!("Failed to parse response: {}", e)))
    }
}
