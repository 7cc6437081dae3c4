//! Parallel source walker using the `ignore` crate's `WalkParallel`.
//!
//! Honours `.gitignore` and `.lanternignore` (gitignore syntax, hierarchical)
//! on top of the directories Laravel keeps generated or third-party code in.

use std::path::Path;

use crossbeam_channel as channel;
use lantern_core::config::ScanConfig;

use super::types::DiscoveredFile;

/// Directories, relative to the project root, that never hold application
/// sources worth scanning.
pub const DEFAULT_IGNORES: &[&str] = &[
    "config",
    "tests",
    "vendor",
    "node_modules",
    "storage",
    "bootstrap/cache",
    "public",
    ".git",
];

pub const IGNORE_FILE_NAME: &str = ".lanternignore";

/// Walk `root` in parallel and return every `*.php` file that is not a Blade
/// template, sorted by path.
pub fn walk_sources(root: &Path, config: &ScanConfig) -> Vec<DiscoveredFile> {
    let (tx, rx) = channel::unbounded();

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .require_git(false)
        .add_custom_ignore_filename(IGNORE_FILE_NAME)
        .max_filesize(Some(config.effective_max_file_size()))
        .follow_links(config.effective_follow_symlinks());

    let threads = config.effective_threads();
    if threads > 0 {
        builder.threads(threads);
    }

    // Negated overrides act as a blacklist; a leading slash anchors them to the root.
    let mut overrides = ignore::overrides::OverrideBuilder::new(root);
    for dir in DEFAULT_IGNORES {
        for pattern in [format!("!/{dir}"), format!("!/{dir}/**")] {
            if let Err(e) = overrides.add(&pattern) {
                tracing::warn!(pattern = %pattern, error = %e, "invalid built-in ignore pattern");
            }
        }
    }
    for pattern in &config.extra_ignore {
        if let Err(e) = overrides.add(&format!("!{pattern}")) {
            tracing::warn!(pattern = %pattern, error = %e, "ignoring invalid extra_ignore pattern");
        }
    }
    match overrides.build() {
        Ok(built) => {
            builder.overrides(built);
        }
        Err(e) => tracing::warn!(error = %e, "could not build ignore overrides"),
    }

    builder.build_parallel().run(|| {
        let tx = tx.clone();
        Box::new(move |entry| {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry");
                    return ignore::WalkState::Continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return ignore::WalkState::Continue;
            }

            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                return ignore::WalkState::Continue;
            };
            if !name.ends_with(".php") || name.ends_with(".blade.php") {
                return ignore::WalkState::Continue;
            }

            let file_size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            let _ = tx.send(DiscoveredFile {
                path: path.to_path_buf(),
                file_size,
            });
            ignore::WalkState::Continue
        })
    });

    drop(tx);
    let mut files: Vec<DiscoveredFile> = rx.into_iter().collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(count = files.len(), root = %root.display(), "walked PHP sources");
    files
}
