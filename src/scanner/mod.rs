//! Scanner module for filtered directory traversal.
//!
//! This module discovers the files eligible for comparison:
//! - [`walker`]: multi-root directory traversal with depth, size, name, and
//!   exclusion filters
//!
//! Every [`Candidate`] carries a canonical path, so the same underlying file
//! reached through overlapping roots or symlinked aliases is yielded at most
//! once per walk.
//!
//! # Example
//!
//! ```no_run
//! use dupeblock::config::Config;
//! use dupeblock::scanner::Walker;
//! use std::path::PathBuf;
//!
//! let config = Config::default()
//!     .with_include_dir(PathBuf::from("."))
//!     .with_min_file_size(1024); // skip files of 1 KiB or less
//!
//! let walker = Walker::new(config);
//! for candidate in walker.walk() {
//!     match candidate {
//!         Ok(c) => println!("{}: {} bytes", c.path.display(), c.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod walker;

use std::path::{Path, PathBuf};

// Re-export main types
pub use walker::Walker;

/// A file discovered by scanning, eligible for comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Canonical path to the file
    pub path: PathBuf,
    /// File size in bytes at discovery time
    pub size: u64,
}

impl Candidate {
    /// Create a new candidate.
    ///
    /// # Arguments
    ///
    /// * `path` - Canonical path to the file
    /// * `size` - File size in bytes
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a path.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
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
