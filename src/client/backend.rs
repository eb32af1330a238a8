//! Backend HTTP client
//!
//! Provides `BackendClient` for making API requests to the project backend.

use crate::config::BackendConfig;
use eyre::{Result, eyre};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use std::collections::HashMap;
use url::Url;

/// Header carrying the access token on every request
pub const TOKEN_HEADER: &str = "x-digia-github-token";

/// Backend client for making API requests
///
/// Paths are resolved relative to the configured base URL, so a base of
/// `https://host/backend` and a path of `api/v1/x` yield
/// `https://host/backend/api/v1/x`.
///
/// # Example
/// ```no_run
/// use digia_sync::client::BackendClient;
/// use digia_sync::config::BackendConfig;
/// use std::collections::HashMap;
/// use url::Url;
///
/// # async fn example() -> eyre::Result<()> {
/// let config = BackendConfig::new(Url::parse("https://api.example.com")?, "token");
/// let client = BackendClient::try_new(&config)?;
///
/// let response = client
///     .post_json_value("api/v1/ping", &HashMap::new(), &serde_json::json!({}))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct BackendClient {
    client: Client,
    url: Url,
}

impl BackendClient {
    /// Create a new client from backend settings
    ///
    /// # Errors
    /// Returns an error if the token is not a valid header value or the
    /// HTTP client cannot be built.
    pub fn try_new(config: &BackendConfig) -> Result<Self> {
        let mut token = HeaderValue::from_str(&config.token)?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, token);
        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

    /// Get the base URL.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Resolve an API path against the base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let mut base = self.url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }

    /// Send a request to a given path.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `headers` - Additional headers
    /// * `path` - API path, relative to the base URL
    /// * `body` - Optional request body
    pub async fn request(
        &self,
        method: Method,
        headers: &HashMap<String, String>,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response> {
        let headers = headers
            .iter()
            .map(|(k, v)| Ok((HeaderName::from_bytes(k.as_bytes())?, HeaderValue::from_str(v)?)))
            .collect::<Result<HeaderMap>>()?;

        let url = self.endpoint(path)?;
        log::debug!("{} {}", method, url);

        let request = self.client.request(method, url).headers(headers);
        let request = match body {
            Some(body) => request.body(body),
            None => request,
        };

        request
            .send()
            .await
            .map_err(|e| eyre!("Failed to send request: {}", e))
    }

    /// Helper for POST requests with JSON value.
    pub async fn post_json_value(
        &self,
        path: &str,
        headers: &HashMap<String, String>,
        value: &serde_json::Value,
    ) -> Result<reqwest::Response> {
        let body = serde_json::to_vec(value)?;
        let mut headers = headers.clone();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        self.request(Method::POST, &headers, path, Some(body)).await
    }
}

impl std::fmt::Display for BackendClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}
