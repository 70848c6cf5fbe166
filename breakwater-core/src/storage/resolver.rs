//! Layered resolution of storage references to physical paths.
//!
//! Media references are historically inconsistent: absolute paths from one
//! era, API-relative paths from another, and multiple storage volumes. The
//! resolver generates an ordered list of candidate paths and takes the
//! first one that exists. Existence checking is injected through
//! [`PathProbe`] so the ordering policy is testable without a filesystem.

use std::path::{Path, PathBuf};

/// Filesystem existence check capability.
pub trait PathProbe: Send + Sync {
    /// True when `path` names an existing regular file. Nonexistence is
    /// non-exceptional control flow here, never an error.
    fn exists(&self, path: &Path) -> bool;
}

/// Production probe backed by the real filesystem.
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// Strips the configured API prefix from a reference, if present.
///
/// Also drops a single leading slash from the remainder so it joins
/// cleanly onto a root directory.
fn strip_api_prefix<'a>(reference: &'a str, api_prefix: &str) -> &'a str {
    let stripped = reference.strip_prefix(api_prefix).unwrap_or(reference);
    stripped.strip_prefix('/').unwrap_or(stripped)
}

/// Generates candidate paths in resolution order.
fn candidates(
    reference: &str,
    api_prefix: &str,
    base_dir: &Path,
    library_root: Option<&str>,
) -> Vec<PathBuf> {
    let mut out = Vec::with_capacity(4);
    let reference_path = Path::new(reference);
    let stripped = strip_api_prefix(reference, api_prefix);

    // 1. The reference verbatim, when already absolute
    if reference_path.is_absolute() {
        out.push(reference_path.to_path_buf());
    }

    // 2. Prefix-stripped, under the service base directory
    out.push(base_dir.join(stripped));

    // 3. Prefix-stripped, under the configured library root
    if let Some(root) = library_root {
        out.push(Path::new(root).join(stripped));
    }

    // 4. The reference verbatim, relative to the process cwd
    out.push(reference_path.to_path_buf());

    out
}

/// Resolves a storage reference to the first existing physical path.
///
/// Candidates are probed lazily in order; returns `None` when no candidate
/// exists.
pub fn resolve(
    reference: &str,
    api_prefix: &str,
    base_dir: &Path,
    library_root: Option<&str>,
    probe: &dyn PathProbe,
) -> Option<PathBuf> {
    candidates(reference, api_prefix, base_dir, library_root)
        .into_iter()
        .find(|candidate| probe.exists(candidate))
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const PREFIX: &str = "/api/media/";

    /// Probe answering from a fixed set of known paths.
    struct FakeProbe {
        existing: HashSet<PathBuf>,
    }

    impl FakeProbe {
        fn new(paths: &[&str]) -> Self {
            Self {
                existing: paths.iter().map(PathBuf::from).collect(),
            }
        }
    }

    impl PathProbe for FakeProbe {
        fn exists(&self, path: &Path) -> bool {
            self.existing.contains(path)
        }
    }

    #[test]
    fn test_absolute_existing_reference_wins() {
        let probe = FakeProbe::new(&["/volumes/old/clip.mp4"]);

        let resolved = resolve(
            "/volumes/old/clip.mp4",
            PREFIX,
            Path::new("/srv/base"),
            Some("/mnt/library"),
            &probe,
        );

        assert_eq!(resolved, Some(PathBuf::from("/volumes/old/clip.mp4")));
    }

    #[test]
    fn test_base_dir_candidate_before_library_root() {
        let probe = FakeProbe::new(&[
            "/srv/base/uploads/clip.mp4",
            "/mnt/library/uploads/clip.mp4",
        ]);

        let resolved = resolve(
            "/api/media/uploads/clip.mp4",
            PREFIX,
            Path::new("/srv/base"),
            Some("/mnt/library"),
            &probe,
        );

        assert_eq!(resolved, Some(PathBuf::from("/srv/base/uploads/clip.mp4")));
    }

    #[test]
    fn test_library_root_fallback_when_base_dir_misses() {
        let probe = FakeProbe::new(&["/mnt/library/uploads/clip.mp4"]);

        let resolved = resolve(
            "/api/media/uploads/clip.mp4",
            PREFIX,
            Path::new("/srv/base"),
            Some("/mnt/library"),
            &probe,
        );

        assert_eq!(
            resolved,
            Some(PathBuf::from("/mnt/library/uploads/clip.mp4"))
        );
    }

    #[test]
    fn test_unconfigured_library_root_is_skipped() {
        let probe = FakeProbe::new(&["/mnt/library/uploads/clip.mp4"]);

        let resolved = resolve(
            "/api/media/uploads/clip.mp4",
            PREFIX,
            Path::new("/srv/base"),
            None,
            &probe,
        );

        assert_eq!(resolved, None);
    }

    #[test]
    fn test_relative_reference_last_resort() {
        let probe = FakeProbe::new(&["legacy/clip.mp4"]);

        let resolved = resolve(
            "legacy/clip.mp4",
            PREFIX,
            Path::new("/srv/base"),
            Some("/mnt/library"),
            &probe,
        );

        assert_eq!(resolved, Some(PathBuf::from("legacy/clip.mp4")));
    }

    #[test]
    fn test_nothing_exists_resolves_to_none() {
        let probe = FakeProbe::new(&[]);

        let resolved = resolve(
            "/api/media/uploads/clip.mp4",
            PREFIX,
            Path::new("/srv/base"),
            Some("/mnt/library"),
            &probe,
        );

        assert_eq!(resolved, None);
    }

    #[test]
    fn test_prefix_stripping() {
        assert_eq!(
            strip_api_prefix("/api/media/uploads/clip.mp4", PREFIX),
            "uploads/clip.mp4"
        );
        assert_eq!(strip_api_prefix("uploads/clip.mp4", PREFIX), "uploads/clip.mp4");
        assert_eq!(strip_api_prefix("/uploads/clip.mp4", PREFIX), "uploads/clip.mp4");
    }

    #[test]
    fn test_fs_probe_against_real_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"x").unwrap();

        let probe = FsProbe;
        assert!(probe.exists(&path));
        assert!(!probe.exists(&dir.path().join("missing.mp4")));
        assert!(!probe.exists(dir.path())); // directories are not files
    }
}
