//! Response-header probing of compiled assets.

use std::time::Duration;

use lantern_core::config::HttpConfig;
use lantern_core::errors::FetchError;
use reqwest::blocking::Client;
use reqwest::header::CACHE_CONTROL;
use reqwest::{Method, StatusCode, Url};

/// Status and caching headers of one asset URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResponse {
    pub url: String,
    pub status: u16,
    pub cache_control: Option<String>,
}

impl AssetResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can fetch response headers for an asset URL.
pub trait AssetFetcher: Send + Sync {
    fn fetch_headers(&self, url: &str) -> Result<AssetResponse, FetchError>;
}

/// Blocking `reqwest` implementation.
pub struct HttpAssetFetcher {
    client: Client,
}

impl HttpAssetFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| FetchError::Client {
                message: e.to_string(),
            })?;
        Ok(Self { client })
    }

    fn send(&self, method: Method, url: &Url) -> Result<AssetResponse, FetchError> {
        let response = self
            .client
            .request(method, url.clone())
            .send()
            .map_err(|e| FetchError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        let cache_control = response
            .headers()
            .get(CACHE_CONTROL)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        Ok(AssetResponse {
            url: url.to_string(),
            status: response.status().as_u16(),
            cache_control,
        })
    }
}

impl AssetFetcher for HttpAssetFetcher {
    /// `HEAD` first; servers that refuse it get a `GET`.
    fn fetch_headers(&self, url: &str) -> Result<AssetResponse, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let head = self.send(Method::HEAD, &parsed)?;
        let refused = [StatusCode::METHOD_NOT_ALLOWED, StatusCode::NOT_IMPLEMENTED]
            .iter()
            .any(|s| s.as_u16() == head.status);
        if refused {
            tracing::debug!(url, status = head.status, "HEAD refused; retrying with GET");
            return self.send(Method::GET, &parsed);
        }
        Ok(head)
    }
}
