use crate::search::{ErrorEnvelope, SearchResponse};
use thiserror::Error;
use url::Url;

const SEARCH_ROUTE: &str = "api/perplexity";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Invalid server URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    /// The proxy answered with an error envelope; shown to the user as is.
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Talks to the proxy's search route.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl ProxyClient {
    pub fn new(server_url: &str) -> Result<Self, ClientError> {
        let base = Url::parse(&format!("{}/", server_url.trim_end_matches('/')))?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: base.join(SEARCH_ROUTE)?,
        })
    }

    /// Full request URL for `query`, percent-encoded.
    pub fn request_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("query", query);
        url
    }

    pub async fn search(&self, query: &str) -> Result<SearchResponse, ClientError> {
        let response = self.client.get(self.request_url(query)).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<SearchResponse>().await?);
        }

        let message = response
            .json::<ErrorEnvelope>()
            .await
            .map(|envelope| envelope.error)
            .unwrap_or_else(|_| format!("Request failed with status {}", status.as_u16()));
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
