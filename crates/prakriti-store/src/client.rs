use std::fmt;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Where the hosted store lives and how to authenticate against it.
#[derive(Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Project base URL, e.g. `https://abcd.supabase.co`.
    pub url: String,
    /// Public anon key, sent as `apikey` on every request.
    pub anon_key: String,
    /// The signed-in user's access token. Requests fall back to the anon
    /// key when absent, so row-level rules see an anonymous caller.
    #[serde(default)]
    pub access_token: Option<String>,
}

impl StoreConfig {
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.url.trim_end_matches('/'))
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("url", &self.url)
            .field("anon_key", &"<redacted>")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Build an HTTP client that sends the store's auth headers on every
/// request.
pub fn build_client(config: &StoreConfig) -> Result<reqwest::Client, StoreError> {
    if config.url.trim().is_empty() {
        return Err(StoreError::Config("store url is empty".to_string()));
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        "apikey",
        HeaderValue::from_str(&config.anon_key)
            .map_err(|e| StoreError::Config(format!("invalid anon key: {e}")))?,
    );
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", config.bearer()))
            .map_err(|e| StoreError::Config(format!("invalid access token: {e}")))?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(StoreError::Http)
}
