//! PHP source discovery and the per-run parsed source index.

pub mod index;
pub mod types;
pub mod walker;

pub use index::{ScannedFile, SourceIndex};
pub use types::DiscoveredFile;
pub use walker::walk_sources;
