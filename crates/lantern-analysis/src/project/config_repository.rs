//! Read-only view of the application's configuration, as `config()` would
//! see it.

use std::path::{Path, PathBuf};

use lantern_core::errors::ParseError;

use super::dotenv::EnvFile;
use crate::php::{ConfigEvaluator, PhpArray, PhpKey, PhpParser, PhpValue};

/// Where the configuration values came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// `bootstrap/cache/config.php` produced by `php artisan config:cache`.
    Cached(PathBuf),
    /// Individual files under `config/`.
    Files(PathBuf),
    /// Neither exists.
    Empty,
}

#[derive(Debug, Clone)]
pub struct ConfigRepository {
    values: PhpValue,
    source: ConfigSource,
}

impl ConfigRepository {
    /// Load the cached config if present, otherwise evaluate `config/*.php`.
    pub fn load(
        base_path: &Path,
        config_dir: &Path,
        cached_config: &Path,
        env: &EnvFile,
    ) -> Result<Self, ParseError> {
        let mut parser = PhpParser::new()?;
        let evaluator = ConfigEvaluator::new(env, base_path);

        if cached_config.is_file() {
            match read_and_evaluate(&evaluator, &mut parser, cached_config) {
                Some(values @ PhpValue::Array(_)) => {
                    tracing::debug!(path = %cached_config.display(), "using cached configuration");
                    return Ok(Self {
                        values,
                        source: ConfigSource::Cached(cached_config.to_path_buf()),
                    });
                }
                _ => tracing::warn!(
                    path = %cached_config.display(),
                    "cached configuration is unreadable; falling back to config files"
                ),
            }
        }

        if !config_dir.is_dir() {
            return Ok(Self::from_value(PhpValue::Array(PhpArray::new())));
        }

        let mut root = PhpArray::new();
        load_dir(&evaluator, &mut parser, config_dir, &mut root);
        Ok(Self {
            values: PhpValue::Array(root),
            source: ConfigSource::Files(config_dir.to_path_buf()),
        })
    }

    /// Build a repository from an already evaluated value.
    pub fn from_value(values: PhpValue) -> Self {
        Self {
            values,
            source: ConfigSource::Empty,
        }
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    pub fn is_cached(&self) -> bool {
        matches!(self.source, ConfigSource::Cached(_))
    }

    /// Dot-path lookup, e.g. `cache.stores.redis.driver`.
    pub fn get(&self, key: &str) -> Option<&PhpValue> {
        self.values.get_path(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key)?.as_str()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.get(key)? {
            PhpValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn get_array(&self, key: &str) -> Option<&PhpArray> {
        self.get(key)?.as_array()
    }

    /// True when the key exists and is neither null nor an empty array/string.
    pub fn is_filled(&self, key: &str) -> bool {
        match self.get(key) {
            None | Some(PhpValue::Null) => false,
            Some(PhpValue::String(s)) => !s.is_empty(),
            Some(PhpValue::Array(a)) => !a.is_empty(),
            Some(_) => true,
        }
    }
}

fn read_and_evaluate(
    evaluator: &ConfigEvaluator,
    parser: &mut PhpParser,
    path: &Path,
) -> Option<PhpValue> {
    let source = match std::fs::read(path) {
        Ok(source) => source,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read config file");
            return None;
        }
    };
    match evaluator.evaluate_file(parser, &source, path) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot evaluate config file");
            None
        }
    }
}

/// Evaluate every `*.php` file in `dir` into `target`, keyed by file stem.
/// Sub-directories become nested keys, as Laravel's loader does.
fn load_dir(evaluator: &ConfigEvaluator, parser: &mut PhpParser, dir: &Path, target: &mut PhpArray) {
    let mut entries: Vec<PathBuf> = match std::fs::read_dir(dir) {
        Ok(entries) => entries.flatten().map(|e| e.path()).collect(),
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "cannot list config directory");
            return;
        }
    };
    entries.sort();

    for path in entries {
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };
        if path.is_dir() {
            let mut nested = PhpArray::new();
            load_dir(evaluator, parser, &path, &mut nested);
            if !nested.is_empty() {
                target.insert(PhpKey::Str(stem), PhpValue::Array(nested));
            }
        } else if path.extension().is_some_and(|ext| ext == "php") {
            if let Some(value) = read_and_evaluate(evaluator, parser, &path) {
                target.insert(PhpKey::Str(stem), value);
            }
        }
    }
}
