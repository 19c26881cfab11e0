//! Size and hash buckets.
//!
//! Equal size is a precondition for equal content, so the walk fills
//! [`SizeBuckets`] and only buckets with two or more members are hashed into
//! [`HashBuckets`].

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use crate::types::{ContentHash, DuplicateGroup};

/// Multi-map from file size to the paths seen with that size.
#[derive(Debug, Default)]
pub struct SizeBuckets {
    buckets: BTreeMap<u64, Vec<PathBuf>>,
}

impl SizeBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` to the bucket for `size`.
    pub fn add(&mut self, size: u64, path: PathBuf) {
        self.buckets.entry(size).or_default().push(path);
    }

    /// Buckets holding at least two paths, smallest size first.
    pub fn candidates(&self) -> impl Iterator<Item = (u64, &[PathBuf])> {
        self.buckets
            .iter()
            .filter(|(_, paths)| paths.len() > 1)
            .map(|(size, paths)| (*size, paths.as_slice()))
    }

    /// Number of distinct sizes.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn get(&self, size: u64) -> Option<&[PathBuf]> {
        self.buckets.get(&size).map(Vec::as_slice)
    }
}

/// Multi-map from `(size, prefix digest)` to paths, in first-seen key order.
#[derive(Debug, Default)]
pub struct HashBuckets {
    index: HashMap<(u64, ContentHash), usize>,
    buckets: Vec<DuplicateGroup>,
}

impl HashBuckets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, size: u64, hash: ContentHash, path: PathBuf) {
        match self.index.get(&(size, hash)) {
            Some(&slot) => self.buckets[slot].paths.push(path),
            None => {
                self.index.insert((size, hash), self.buckets.len());
                self.buckets.push(DuplicateGroup {
                    size,
                    hash,
                    paths: vec![path],
                });
            }
        }
    }

    /// Number of distinct keys, including single-member buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Drop single-member buckets and return the rest as duplicate groups.
    pub fn into_groups(self) -> Vec<DuplicateGroup> {
        self.buckets
            .into_iter()
            .filter(|group| group.paths.len() > 1)
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
