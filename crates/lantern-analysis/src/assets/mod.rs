//! Compiled front-end assets: Mix/Vite manifests, the Vite import graph,
//! `Cache-Control` evaluation and HTTP header probing.

pub mod cache_control;
pub mod fetcher;
pub mod graph;
pub mod manifest;

pub use cache_control::{is_long_lived, CacheControl, ONE_DAY_SECS};
pub use fetcher::{AssetFetcher, AssetResponse, HttpAssetFetcher};
pub use graph::collect_vite_files;
pub use manifest::{MixManifest, ViteChunk, ViteManifest};

/// Join a base URL and a path with exactly one slash between them.
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
