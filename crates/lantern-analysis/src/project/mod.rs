//! Static model of the Laravel application under inspection.

pub mod composer;
pub mod config_repository;
pub mod dotenv;

use std::path::{Path, PathBuf};

use lantern_core::errors::ProjectError;
use lantern_core::AppEnvironment;

pub use composer::{ComposerJson, ComposerLock, InstalledJson};
pub use config_repository::{ConfigRepository, ConfigSource};
pub use dotenv::EnvFile;

const DEFAULT_CONFIG_CACHE: &str = "bootstrap/cache/config.php";
const DEFAULT_ROUTES_CACHE: &str = "bootstrap/cache/routes-v7.php";

/// An installed Laravel application on disk.
#[derive(Debug)]
pub struct LaravelProject {
    root: PathBuf,
    env: EnvFile,
    config: ConfigRepository,
    environment: AppEnvironment,
    composer: Option<ComposerJson>,
}

impl LaravelProject {
    /// Open the application rooted at `root`.
    pub fn open(root: &Path) -> Result<Self, ProjectError> {
        if !root.is_dir() {
            return Err(ProjectError::NotFound {
                path: root.to_path_buf(),
            });
        }
        let root = root
            .canonicalize()
            .map_err(|e| ProjectError::io(root, e))?;

        let composer: Option<ComposerJson> = composer::read_json(&root.join("composer.json"))?;
        let requires_framework = composer
            .as_ref()
            .is_some_and(|c| c.requires("laravel/framework"));
        if !root.join("artisan").is_file() && !requires_framework {
            return Err(ProjectError::NotLaravel { path: root });
        }

        let env = EnvFile::load(&root.join(".env"))?;
        let cached_config = resolve_cache_path(&root, &env, "APP_CONFIG_CACHE", DEFAULT_CONFIG_CACHE);
        let config = ConfigRepository::load(&root, &root.join("config"), &cached_config, &env)?;

        let environment = config
            .get_str("app.env")
            .map(AppEnvironment::parse_str)
            .unwrap_or_default();

        tracing::info!(
            root = %root.display(),
            environment = %environment,
            config_cached = config.is_cached(),
            "opened Laravel project"
        );

        Ok(Self {
            root,
            env,
            config,
            environment,
            composer,
        })
    }

    /// Override the environment read from `app.env`.
    pub fn with_environment(mut self, environment: AppEnvironment) -> Self {
        self.environment = environment;
        self
    }

    pub fn environment(&self) -> &AppEnvironment {
        &self.environment
    }

    pub fn config(&self) -> &ConfigRepository {
        &self.config
    }

    pub fn env(&self) -> &EnvFile {
        &self.env
    }

    pub fn base_path(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    pub fn app_path(&self) -> PathBuf {
        self.path("app")
    }

    pub fn config_path(&self) -> PathBuf {
        self.path("config")
    }

    pub fn bootstrap_cache_path(&self) -> PathBuf {
        self.path("bootstrap/cache")
    }

    pub fn public_path(&self) -> PathBuf {
        self.path("public")
    }

    pub fn storage_path(&self) -> PathBuf {
        self.path("storage")
    }

    pub fn vendor_path(&self) -> PathBuf {
        self.path("vendor")
    }

    pub fn config_cache_path(&self) -> PathBuf {
        resolve_cache_path(&self.root, &self.env, "APP_CONFIG_CACHE", DEFAULT_CONFIG_CACHE)
    }

    pub fn routes_cache_path(&self) -> PathBuf {
        resolve_cache_path(&self.root, &self.env, "APP_ROUTES_CACHE", DEFAULT_ROUTES_CACHE)
    }

    pub fn is_config_cached(&self) -> bool {
        self.config_cache_path().is_file()
    }

    pub fn is_routes_cached(&self) -> bool {
        self.routes_cache_path().is_file()
    }

    pub fn composer_json(&self) -> Option<&ComposerJson> {
        self.composer.as_ref()
    }

    pub fn composer_lock(&self) -> Result<Option<ComposerLock>, ProjectError> {
        composer::read_json(&self.path("composer.lock"))
    }

    pub fn installed_packages(&self) -> Result<Option<InstalledJson>, ProjectError> {
        composer::read_json(&self.vendor_path().join("composer/installed.json"))
    }

    /// Contents of `vendor/composer/autoload_classmap.php`, if generated.
    pub fn autoload_classmap(&self) -> Result<Option<String>, ProjectError> {
        let path = self.vendor_path().join("composer/autoload_classmap.php");
        if !path.is_file() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| ProjectError::io(path, e))
    }
}

/// Cache file location, honouring the environment override. Relative
/// overrides are taken from the project root.
fn resolve_cache_path(root: &Path, env: &EnvFile, key: &str, default: &str) -> PathBuf {
    match env.raw(key).filter(|v| !v.is_empty()) {
        Some(custom) => {
            let custom = Path::new(custom);
            if custom.is_absolute() {
                custom.to_path_buf()
            } else {
                root.join(custom)
            }
        }
        None => root.join(default),
    }
}
