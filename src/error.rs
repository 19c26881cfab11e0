//! Errors raised while scanning.
//!
//! None of these abort a run. Each one is logged where it happens, the
//! offending root or file is skipped, and the aggregate error flag is set.
//! Failures while walking below a root are not errors at all: those entries
//! are skipped silently.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    /// A root that does not exist, cannot be opened, or is not a directory.
    #[error("unable to use directory \"{path}\": {reason}, skipping")]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("skipping \"{path}\": unable to open: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("skipping \"{path}\": unable to read: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ScanError {
    /// The root or file this error refers to.
    pub fn path(&self) -> &Path {
        match self {
            ScanError::InvalidRoot { path, .. }
            | ScanError::Open { path, .. }
            | ScanError::Read { path, .. } => path.as_path(),
        }
    }
}
