//! Storage layer: logical reference resolution and file metadata.
//!
//! Maps a stored storage reference to a physical, readable file across the
//! configured roots, and classifies it by extension. Nothing here outlives
//! a single request.

pub mod mime;
pub mod resolver;

use std::path::{Path, PathBuf};

pub use mime::mime_for_path;
pub use resolver::{FsProbe, PathProbe, resolve};

/// A physical file ready for delivery. Derived per request, never
/// persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub path: PathBuf,
    pub size: u64,
    pub mime_type: &'static str,
}

impl ResolvedFile {
    /// Stats `path` and derives the content type from its extension.
    ///
    /// Returns `None` when the path cannot be stat'd or is not a regular
    /// file. Zero-length files are returned as-is; rejecting them is the
    /// request handler's call.
    pub async fn stat(path: &Path) -> Option<Self> {
        let metadata = tokio::fs::metadata(path).await.ok()?;
        if !metadata.is_file() {
            return None;
        }

        Some(Self {
            path: path.to_path_buf(),
            size: metadata.len(),
            mime_type: mime_for_path(path),
        })
    }
}
