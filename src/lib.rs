//! prefix-dupes: find duplicate files by size and content prefix hash.

pub mod buckets;
pub mod error;
pub mod hash;
pub mod logging;
pub mod report;
pub mod scanner;
pub mod types;
pub mod walk;
