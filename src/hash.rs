//! Prefix hashing for duplicate detection.
//!
//! Only the first [`HASH_WINDOW`] bytes of a file are hashed, with BLAKE3.
//! Files are compared only against files of the same size, so hashing the
//! bytes actually read is enough: a short read is the end of the file, not
//! an error.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::error::ScanError;
use crate::types::ContentHash;

/// Maximum number of bytes read from the start of each file.
pub const HASH_WINDOW: u64 = 1024 * 1024;

const CHUNK_SIZE: usize = 64 * 1024;

/// Compute the BLAKE3 hash of the first `HASH_WINDOW` bytes of a file.
///
/// # Errors
/// Returns [`ScanError::Open`] if the file cannot be opened and
/// [`ScanError::Read`] if reading it fails.
pub fn hash_prefix(path: &Path) -> Result<ContentHash, ScanError> {
    let file = File::open(path).map_err(|source| ScanError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = file.take(HASH_WINDOW);
    let mut hasher = blake3::Hasher::new();

    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(ScanError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(ContentHash(*hasher.finalize().as_bytes()))
}

/// Check if two files start with the same `HASH_WINDOW` bytes.
///
/// # Errors
/// Returns an error if either file cannot be read.
pub fn prefixes_match(a: &Path, b: &Path) -> Result<bool, ScanError> {
    Ok(hash_prefix(a)? == hash_prefix(b)?)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn file_with(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_identical_content_same_hash() {
        let file1 = file_with(b"hello");
        let file2 = file_with(b"hello");

        assert_eq!(
            hash_prefix(file1.path()).unwrap(),
            hash_prefix(file2.path()).unwrap()
        );
    }

    #[test]
    fn test_different_content_different_hash() {
        let file1 = file_with(b"content A");
        let file2 = file_with(b"content B");

        assert!(!prefixes_match(file1.path(), file2.path()).unwrap());
    }

    #[test]
    fn test_short_file_hashes_bytes_read() {
        let file = file_with(b"hello");

        let expected = ContentHash(*blake3::hash(b"hello").as_bytes());
        assert_eq!(hash_prefix(file.path()).unwrap(), expected);
    }

    #[test]
    fn test_short_file_is_not_zero_padded() {
        let short = file_with(b"abc");
        let padded = file_with(b"abc\0\0\0");

        assert!(!prefixes_match(short.path(), padded.path()).unwrap());
    }

    #[test]
    fn test_empty_file() {
        let file = NamedTempFile::new().unwrap();

        let hash = hash_prefix(file.path()).unwrap();
        assert_eq!(hash, ContentHash(*blake3::hash(b"").as_bytes()));
    }

    #[test]
    fn test_exact_window_file() {
        let content = vec![7u8; HASH_WINDOW as usize];
        let file = file_with(&content);

        let expected = ContentHash(*blake3::hash(&content).as_bytes());
        assert_eq!(hash_prefix(file.path()).unwrap(), expected);
    }

    #[test]
    fn test_only_window_is_hashed() {
        let mut a = vec![1u8; HASH_WINDOW as usize];
        let mut b = a.clone();
        a.extend_from_slice(b"tail one");
        b.extend_from_slice(b"tail two");

        let file1 = file_with(&a);
        let file2 = file_with(&b);

        assert!(prefixes_match(file1.path(), file2.path()).unwrap());
    }

    #[test]
    fn test_difference_inside_window_detected() {
        let mut a = vec![0u8; 2 * HASH_WINDOW as usize];
        let b = a.clone();
        a[HASH_WINDOW as usize - 1] = 1;

        let file1 = file_with(&a);
        let file2 = file_with(&b);

        assert!(!prefixes_match(file1.path(), file2.path()).unwrap());
    }

    #[test]
    fn test_nonexistent_file_is_open_error() {
        let result = hash_prefix(Path::new("/nonexistent/file.txt"));
        assert!(matches!(result, Err(ScanError::Open { .. })));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        // Opening a directory succeeds on Unix; reading it does not.
        assert!(hash_prefix(dir.path()).is_err());
    }
}
