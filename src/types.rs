//! Domain types for prefix-dupes.

use serde::{Serialize, Serializer};
use std::path::PathBuf;

// ============================================================================
// PRIMITIVES
// ============================================================================

/// Content identity of a file prefix.
///
/// Wraps a 32-byte BLAKE3 digest of the first (at most) `HASH_WINDOW`
/// bytes of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    /// Returns the hash as a lowercase hex string.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl Serialize for ContentHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

// ============================================================================
// STRUCTS
// ============================================================================

/// A regular file found during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub size: u64,
}

/// Two or more files sharing a size and a prefix digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// Size in bytes of every member.
    pub size: u64,
    /// Prefix digest shared by every member.
    pub hash: ContentHash,
    /// Members, in the order they were hashed.
    pub paths: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Bytes freed if all but one member were removed.
    pub fn bytes_recoverable(&self) -> u64 {
        self.size
            .saturating_mul(self.paths.len().saturating_sub(1) as u64)
    }
}

/// A non-fatal error that was logged during the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanIssue {
    pub path: PathBuf,
    pub message: String,
}

/// Complete scan results.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    /// Duplicate groups, in first-seen order.
    pub groups: Vec<DuplicateGroup>,
    /// Bad roots and files that could not be hashed.
    pub errors: Vec<ScanIssue>,
    /// Regular files found across all roots.
    pub files_scanned: usize,
    /// Files whose size was shared with at least one other file.
    pub files_hashed: usize,
}

impl ScanReport {
    /// The aggregate error flag: whether anything went wrong during the run.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn bytes_recoverable(&self) -> u64 {
        self.groups
            .iter()
            .map(DuplicateGroup::bytes_recoverable)
            .fold(0, u64::saturating_add)
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Output format for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable duplicate listing.
    #[default]
    Human,
    /// Machine-readable JSON.
    Json,
}

/// Configuration for scanning operations.
#[derive(Debug, Clone, Default)]
pub struct ScanConfig {
    /// Root directories to scan, as given on the command line.
    pub roots: Vec<PathBuf>,
    /// Whether the walk descends through symbolic links.
    pub follow_symlinks: bool,
}
