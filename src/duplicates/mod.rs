//! Duplicate detection module.
//!
//! This module proves files byte-identical without hashing:
//! - [`tracked`]: lazily opened files with append-only block caches
//! - [`compare`]: the comparison strategy seam and its block-wise default
//! - [`groups`]: groups of proven-identical files plus match statistics
//! - [`matcher`]: first-match-wins placement of candidates into groups
//!
//! Equality is established incrementally. Two files are compared one block
//! at a time, stopping at the first difference, and every block read is
//! cached so later comparisons of the same file start from memory.

pub mod compare;
pub mod groups;
pub mod matcher;
pub mod tracked;

use std::path::{Path, PathBuf};

// Re-export main types
pub use compare::{BlockwiseComparator, ContentComparator};
pub use groups::{Group, MatchStats};
pub use matcher::Matcher;
pub use tracked::TrackedFile;

/// Errors that can occur while reading file content for comparison.
#[derive(thiserror::Error, Debug)]
pub enum CompareError {
    /// The file was not found; it may have been deleted since discovery.
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl CompareError {
    /// Classify an I/O error against the path that produced it.
    #[must_use]
    pub fn from_io(path: &Path, error: std::io::Error) -> Self {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: error,
            },
        }
    }
}
