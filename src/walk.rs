//! Directory walking.
//!
//! Roots are checked up front with [`validate_root`]. Below a root, nothing
//! is an error: unreadable directories and entries that vanish mid-walk are
//! skipped silently.

use std::fs;
use std::path::Path;

use log::trace;
use walkdir::{DirEntry, WalkDir};

use crate::buckets::SizeBuckets;
use crate::error::ScanError;
use crate::types::FileEntry;

/// Check that `root` exists, is a directory, and can be listed.
///
/// # Errors
/// Returns [`ScanError::InvalidRoot`] describing the first check that failed.
pub fn validate_root(root: &Path) -> Result<(), ScanError> {
    let invalid = |reason: String| ScanError::InvalidRoot {
        path: root.to_path_buf(),
        reason,
    };

    let metadata = fs::metadata(root).map_err(|e| invalid(format!("unable to open: {e}")))?;
    if !metadata.is_dir() {
        return Err(invalid("not a directory".to_string()));
    }
    fs::read_dir(root).map_err(|e| invalid(format!("unable to list: {e}")))?;

    Ok(())
}

/// Walk `root` and add every regular file beneath it to `buckets`.
///
/// Returns the number of files added. The root is assumed valid.
pub fn collect_into(root: &Path, buckets: &mut SizeBuckets, follow_symlinks: bool) -> usize {
    let walker = WalkDir::new(root)
        .follow_links(follow_symlinks)
        .sort_by_file_name();

    let mut found = 0;
    for file in walker.into_iter().filter_map(|e| e.ok()).filter_map(regular_file) {
        trace!("found {} ({} bytes)", file.path.display(), file.size);
        buckets.add(file.size, file.path);
        found += 1;
    }

    found
}

fn regular_file(entry: DirEntry) -> Option<FileEntry> {
    if !entry.file_type().is_file() {
        return None;
    }
    let size = entry.metadata().ok()?.len();
    Some(FileEntry {
        path: entry.into_path(),
        size,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(path: &Path, content: &[u8]) {
        File::create(path).unwrap().write_all(content).unwrap();
    }

    #[test]
    fn test_validate_root_accepts_directory() {
        let dir = TempDir::new().unwrap();
        assert!(validate_root(dir.path()).is_ok());
    }

    #[test]
    fn test_validate_root_rejects_missing() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = validate_root(&missing).unwrap_err();
        assert!(matches!(err, ScanError::InvalidRoot { .. }));
        assert_eq!(err.path(), missing.as_path());
    }

    #[test]
    fn test_validate_root_rejects_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        write(&file, b"data");

        let err = validate_root(&file).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_collect_recurses_into_subdirectories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        write(&dir.path().join("top.txt"), b"12345");
        write(&nested.join("deep.txt"), b"12345");
        write(&nested.join("other.bin"), b"1");

        let mut buckets = SizeBuckets::new();
        let found = collect_into(dir.path(), &mut buckets, false);

        assert_eq!(found, 3);
        let five: Vec<&PathBuf> = buckets.get(5).unwrap().iter().collect();
        assert_eq!(five.len(), 2);
        assert!(five.contains(&&dir.path().join("top.txt")));
        assert!(five.contains(&&nested.join("deep.txt")));
        assert_eq!(buckets.get(1).unwrap(), &[nested.join("other.bin")]);
    }

    #[test]
    fn test_collect_skips_directories_themselves() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();

        let mut buckets = SizeBuckets::new();
        assert_eq!(collect_into(dir.path(), &mut buckets, false), 0);
        assert!(buckets.is_empty());
    }

    #[test]
    fn test_collect_records_empty_files() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("e1")).unwrap();
        File::create(dir.path().join("e2")).unwrap();

        let mut buckets = SizeBuckets::new();
        collect_into(dir.path(), &mut buckets, false);

        assert_eq!(buckets.get(0).unwrap().len(), 2);
    }

    #[cfg(unix)]
    #[test]
    fn test_collect_ignores_symlinks_by_default() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("target.txt");
        write(&target, b"abc");
        std::os::unix::fs::symlink(&target, dir.path().join("link.txt")).unwrap();

        let mut buckets = SizeBuckets::new();
        assert_eq!(collect_into(dir.path(), &mut buckets, false), 1);

        let mut followed = SizeBuckets::new();
        assert_eq!(collect_into(dir.path(), &mut followed, true), 2);
    }
}
