//! Directory scanning for duplicate files.
//!
//! Orchestrates the pipeline: walk every root into size buckets, hash the
//! files whose size is shared, group by digest. The walk finishes before any
//! hashing starts.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::PathBuf;

use log::{debug, error, info};
use rayon::prelude::*;

use crate::buckets::{HashBuckets, SizeBuckets};
use crate::error::ScanError;
use crate::hash::hash_prefix;
use crate::types::{ScanConfig, ScanIssue, ScanReport};
use crate::walk::{collect_into, validate_root};

/// Progress notifications emitted by [`scan_with_progress`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanProgress {
    /// A root has been walked; `files` is the running total.
    Walked { files: usize },
    /// Hashing is about to start on `total` files.
    HashingStarted { total: usize },
    /// One more file has been hashed (successfully or not).
    Hashed,
}

/// Outcome of the walk phase.
#[derive(Debug, Default)]
pub struct Collected {
    pub buckets: SizeBuckets,
    pub files: usize,
    pub issues: Vec<ScanIssue>,
}

/// Outcome of the hashing phase.
#[derive(Debug, Default)]
pub struct Hashed {
    pub buckets: HashBuckets,
    pub files: usize,
    pub issues: Vec<ScanIssue>,
}

/// Scan all configured roots and report duplicate groups.
///
/// Never fails: bad roots and unreadable files end up in
/// [`ScanReport::errors`].
pub fn scan(config: &ScanConfig) -> ScanReport {
    scan_with_progress(config, |_| {})
}

/// Like [`scan`], calling `on_progress` as the pipeline advances.
///
/// The callback may be invoked from several threads during hashing.
pub fn scan_with_progress<F>(config: &ScanConfig, on_progress: F) -> ScanReport
where
    F: Fn(ScanProgress) + Sync,
{
    let collected = collect_sizes(config, |files| on_progress(ScanProgress::Walked { files }));

    on_progress(ScanProgress::HashingStarted {
        total: candidate_count(&collected.buckets),
    });
    let hashed = hash_candidates(&collected.buckets, || on_progress(ScanProgress::Hashed));

    let mut errors = collected.issues;
    errors.extend(hashed.issues);

    let groups = hashed.buckets.into_groups();
    info!(
        "{} files scanned, {} hashed, {} duplicate groups",
        collected.files,
        hashed.files,
        groups.len()
    );

    ScanReport {
        groups,
        errors,
        files_scanned: collected.files,
        files_hashed: hashed.files,
    }
}

/// Keep the first occurrence of each root, compared as given.
///
/// No canonicalization: `dir` and `dir/` are two different roots.
pub fn dedupe_roots(roots: &[PathBuf]) -> Vec<&PathBuf> {
    let mut seen: HashSet<&OsStr> = HashSet::new();
    roots
        .iter()
        .filter(|root| seen.insert(root.as_os_str()))
        .collect()
}

/// Validate and walk every distinct root into size buckets.
///
/// `on_walked` receives the running file count after each root.
pub fn collect_sizes<F>(config: &ScanConfig, on_walked: F) -> Collected
where
    F: Fn(usize),
{
    let mut collected = Collected::default();

    for root in dedupe_roots(&config.roots) {
        if let Err(e) = validate_root(root) {
            error!("{}", e);
            collected.issues.push(issue(&e));
            continue;
        }

        debug!("walking {}", root.display());
        collected.files += collect_into(root, &mut collected.buckets, config.follow_symlinks);
        on_walked(collected.files);
    }

    collected
}

/// Number of files that [`hash_candidates`] will hash.
pub fn candidate_count(buckets: &SizeBuckets) -> usize {
    buckets.candidates().map(|(_, paths)| paths.len()).sum()
}

/// Hash every file that shares its size with another file.
///
/// Files are hashed in parallel, but results are folded back in bucket
/// order, so groups and their members come out in a stable order.
pub fn hash_candidates<F>(buckets: &SizeBuckets, on_hashed: F) -> Hashed
where
    F: Fn() + Sync,
{
    let jobs: Vec<(u64, &PathBuf)> = buckets
        .candidates()
        .flat_map(|(size, paths)| paths.iter().map(move |path| (size, path)))
        .collect();

    let results: Vec<_> = jobs
        .par_iter()
        .map(|&(size, path)| {
            let result = hash_prefix(path);
            on_hashed();
            (size, path, result)
        })
        .collect();

    let mut hashed = Hashed {
        files: results.len(),
        ..Default::default()
    };

    for (size, path, result) in results {
        match result {
            Ok(hash) => hashed.buckets.add(size, hash, path.clone()),
            Err(e) => {
                error!("{}", e);
                hashed.issues.push(issue(&e));
            }
        }
    }

    hashed
}

fn issue(err: &ScanError) -> ScanIssue {
    ScanIssue {
        path: err.path().to_path_buf(),
        message: err.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
