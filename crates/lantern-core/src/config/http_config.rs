//! HTTP probing settings for the asset cache-header check.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpConfig {
    /// Overrides `app.url` as the base of every probed asset URL.
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    /// Probing stops once this many uncached assets have been found.
    pub uncached_asset_threshold: usize,
    /// Maximum import depth followed through a Vite manifest.
    pub max_manifest_depth: usize,
    pub user_agent: String,
    pub accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: 10,
            uncached_asset_threshold: 5,
            max_manifest_depth: 32,
            user_agent: concat!("lantern/", env!("CARGO_PKG_VERSION")).to_string(),
            accept_invalid_certs: false,
        }
    }
}
