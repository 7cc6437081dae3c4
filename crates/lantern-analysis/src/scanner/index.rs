//! Parsed view of every application source file, shared by the
//! source-level analyzers.

use std::path::{Path, PathBuf};

use lantern_core::config::ScanConfig;
use lantern_core::errors::ParseError;
use rayon::prelude::*;

use super::walker::walk_sources;
use crate::php::{extract_calls, extract_chains, CallChain, CallSite, PhpParser};

/// Calls and method chains of one source file.
#[derive(Debug, Clone)]
pub struct ScannedFile {
    /// Path relative to the project root.
    pub path: PathBuf,
    pub calls: Vec<CallSite>,
    pub chains: Vec<CallChain>,
}

#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    files: Vec<ScannedFile>,
}

impl SourceIndex {
    /// Walk `root` and parse every source file in parallel. Unreadable or
    /// unparsable files are logged and skipped.
    pub fn build(root: &Path, config: &ScanConfig) -> Result<Self, ParseError> {
        // Surface a broken grammar once instead of per worker.
        PhpParser::new()?;

        let discovered = walk_sources(root, config);
        let mut files: Vec<ScannedFile> = discovered
            .par_iter()
            .map_init(
                || PhpParser::new().ok(),
                |parser, file| {
                    let parser = parser.as_mut()?;
                    scan_file(parser, root, &file.path)
                },
            )
            .flatten()
            .collect();
        files.sort_by(|a, b| a.path.cmp(&b.path));

        tracing::debug!(
            discovered = discovered.len(),
            bytes = discovered.iter().map(|f| f.file_size).sum::<u64>(),
            parsed = files.len(),
            "built source index"
        );
        Ok(Self { files })
    }

    pub fn from_files(files: Vec<ScannedFile>) -> Self {
        Self { files }
    }

    pub fn files(&self) -> &[ScannedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Every call site paired with the file it appears in.
    pub fn calls(&self) -> impl Iterator<Item = (&Path, &CallSite)> {
        self.files
            .iter()
            .flat_map(|f| f.calls.iter().map(move |c| (f.path.as_path(), c)))
    }

    pub fn chains(&self) -> impl Iterator<Item = (&Path, &CallChain)> {
        self.files
            .iter()
            .flat_map(|f| f.chains.iter().map(move |c| (f.path.as_path(), c)))
    }
}

fn scan_file(parser: &mut PhpParser, root: &Path, path: &Path) -> Option<ScannedFile> {
    let source = match std::fs::read(path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read source file");
            return None;
        }
    };
    let tree = match parser.parse(&source, path) {
        Ok(t) => t,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to parse source file");
            return None;
        }
    };
    let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
    Some(ScannedFile {
        path: relative,
        calls: extract_calls(&tree, &source),
        chains: extract_chains(&tree, &source),
    })
}
