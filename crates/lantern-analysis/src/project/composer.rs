//! Composer manifests: `composer.json`, `composer.lock` and
//! `vendor/composer/installed.json`.

use std::collections::BTreeMap;
use std::path::Path;

use lantern_core::errors::ProjectError;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComposerJson {
    #[serde(default)]
    pub require: BTreeMap<String, String>,
    #[serde(default, rename = "require-dev")]
    pub require_dev: BTreeMap<String, String>,
    #[serde(default)]
    pub autoload: Autoload,
    #[serde(default)]
    pub config: ComposerConfig,
}

impl ComposerJson {
    pub fn requires(&self, package: &str) -> bool {
        self.require.contains_key(package)
    }

    /// Directories mapped by PSR-4 autoload rules, without trailing slashes.
    pub fn psr4_directories(&self) -> Vec<String> {
        self.autoload
            .psr4
            .values()
            .flat_map(Psr4Paths::paths)
            .map(|p| p.trim_end_matches('/').to_string())
            .filter(|p| !p.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Autoload {
    #[serde(default, rename = "psr-4")]
    pub psr4: BTreeMap<String, Psr4Paths>,
    #[serde(default)]
    pub classmap: Vec<String>,
}

/// A PSR-4 prefix maps to one directory or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Psr4Paths {
    One(String),
    Many(Vec<String>),
}

impl Psr4Paths {
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::One(p) => vec![p.as_str()],
            Self::Many(ps) => ps.iter().map(String::as_str).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComposerConfig {
    #[serde(default, rename = "optimize-autoloader")]
    pub optimize_autoloader: bool,
    #[serde(default, rename = "classmap-authoritative")]
    pub classmap_authoritative: bool,
}

impl ComposerConfig {
    pub fn optimizes_autoloader(&self) -> bool {
        self.optimize_autoloader || self.classmap_authoritative
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComposerLock {
    #[serde(default)]
    pub packages: Vec<LockedPackage>,
    #[serde(default, rename = "packages-dev")]
    pub packages_dev: Vec<LockedPackage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LockedPackage {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// `vendor/composer/installed.json` in either Composer 2 or Composer 1 form.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InstalledJson {
    V2 {
        packages: Vec<LockedPackage>,
        #[serde(default)]
        dev: Option<bool>,
        #[serde(default, rename = "dev-package-names")]
        dev_package_names: Vec<String>,
    },
    V1(Vec<LockedPackage>),
}

impl InstalledJson {
    pub fn package_names(&self) -> Vec<&str> {
        let packages = match self {
            Self::V2 { packages, .. } => packages,
            Self::V1(packages) => packages,
        };
        packages.iter().map(|p| p.name.as_str()).collect()
    }
}

/// Read and deserialize a JSON file. A missing file yields `None`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ProjectError> {
    if !path.is_file() {
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path).map_err(|e| ProjectError::io(path, e))?;
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| ProjectError::InvalidManifest {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn composer_json_reads_autoload_and_flags() {
        let json: ComposerJson = serde_json::from_str(
            r#"{
                "require": {"php": "^8.2", "laravel/framework": "^11.0"},
                "autoload": {"psr-4": {"App\\": "app/", "Domain\\": ["src/", "lib/"]}},
                "config": {"optimize-autoloader": true, "sort-packages": true}
            }"#,
        )
        .unwrap();
        assert!(json.requires("laravel/framework"));
        assert!(json.config.optimizes_autoloader());
        let mut dirs = json.psr4_directories();
        dirs.sort();
        assert_eq!(dirs, vec!["app", "lib", "src"]);
    }

    #[test]
    fn installed_json_accepts_both_formats() {
        let v2: InstalledJson = serde_json::from_str(
            r#"{"packages": [{"name": "a/b"}], "dev": true, "dev-package-names": ["a/b"]}"#,
        )
        .unwrap();
        assert!(matches!(v2, InstalledJson::V2 { dev: Some(true), .. }));

        let v1: InstalledJson = serde_json::from_str(r#"[{"name": "a/b", "version": "1.0.0"}]"#).unwrap();
        assert_eq!(v1.package_names(), vec!["a/b"]);
    }
}
