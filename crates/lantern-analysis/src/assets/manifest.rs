//! `mix-manifest.json` and Vite `manifest.json` models.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use lantern_core::errors::ProjectError;
use serde::Deserialize;

use crate::project::composer::read_json;

/// Logical path to versioned path, e.g. `/js/app.js` → `/js/app.js?id=abc`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MixManifest {
    pub entries: BTreeMap<String, String>,
}

impl MixManifest {
    pub const FILE_NAME: &'static str = "mix-manifest.json";

    pub fn load(public_path: &Path) -> Result<Option<Self>, ProjectError> {
        read_json(&public_path.join(Self::FILE_NAME))
    }

    /// Versioned paths only; unversioned entries are not cache-busted and
    /// would be unfair to flag.
    pub fn versioned_paths(&self) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .map(String::as_str)
            .filter(|p| p.contains("?id="))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViteChunk {
    pub file: String,
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default)]
    pub is_entry: bool,
    #[serde(default)]
    pub is_dynamic_entry: bool,
    #[serde(default)]
    pub imports: Vec<String>,
    #[serde(default)]
    pub dynamic_imports: Vec<String>,
    #[serde(default)]
    pub css: Vec<String>,
    #[serde(default)]
    pub assets: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ViteManifest {
    pub chunks: BTreeMap<String, ViteChunk>,
}

impl ViteManifest {
    pub const DEFAULT_BUILD_DIR: &'static str = "build";

    /// `public/<build>/manifest.json`, or the Vite 5 location
    /// `public/<build>/.vite/manifest.json`.
    pub fn locate(public_path: &Path, build_dir: &str) -> Option<PathBuf> {
        let dir = public_path.join(build_dir);
        [dir.join("manifest.json"), dir.join(".vite").join("manifest.json")]
            .into_iter()
            .find(|p| p.is_file())
    }

    pub fn load(public_path: &Path, build_dir: &str) -> Result<Option<Self>, ProjectError> {
        match Self::locate(public_path, build_dir) {
            Some(path) => read_json(&path),
            None => Ok(None),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ViteChunk> {
        self.chunks.get(key)
    }

    /// Keys of the chunks the graph walk starts from.
    pub fn roots(&self) -> Vec<&str> {
        let entries: Vec<&str> = self
            .chunks
            .iter()
            .filter(|(_, c)| c.is_entry)
            .map(|(k, _)| k.as_str())
            .collect();
        if entries.is_empty() {
            self.chunks.keys().map(String::as_str).collect()
        } else {
            entries
        }
    }
}
