use std::path::PathBuf;

/// A PHP source file found by the walker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub file_size: u64,
}
