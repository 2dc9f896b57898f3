use serde::{Deserialize, Deserializer, Serialize};

/// Question asked when a request arrives without a usable `query`.
pub const DEFAULT_QUERY: &str = "What is the capital of France?";

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One source as the front end displays it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SearchResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    /// May carry inline HTML.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub site_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub site_long_name: String,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_safe: bool,
    #[serde(default)]
    pub favicon: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub snippets: Vec<String>,
}

/// Decoded view of a provider reply, used only by the front end; the proxy
/// forwards the raw JSON. Order of `results` and `image_urls` is the
/// provider's ranking and is never changed.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SearchResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub query: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ai_overview: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_safe: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<SearchResult>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Resolves the inbound `query` parameter, falling back to [`DEFAULT_QUERY`].
pub fn resolve_query(query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => q.to_string(),
        _ => DEFAULT_QUERY.to_string(),
    }
}
