//! Directory walker built on `walkdir`.
//!
//! # Overview
//!
//! This module provides the [`Walker`] struct for traversing the configured
//! include roots and collecting comparison candidates. Traversal is
//! single-threaded and lazy: candidates are produced one at a time as the
//! consuming iterator advances.
//!
//! # Features
//!
//! - Depth-limited traversal (depth 0 keeps only files directly in a root)
//! - Subtree pruning for excluded directories, matched by canonical path
//! - Strictly-greater-than minimum size filter
//! - Whole-name regular expression filters
//! - Symlink following with cycle detection (reported by walkdir)
//! - Canonical-path deduplication across overlapping roots
//! - Name-sorted traversal so repeated runs yield identical output
//!
//! # Example
//!
//! ```no_run
//! use dupeblock::config::Config;
//! use dupeblock::scanner::Walker;
//! use std::path::PathBuf;
//!
//! let config = Config::default().with_include_dir(PathBuf::from("/home/user/photos"));
//!
//! let walker = Walker::new(config);
//! for candidate in walker.walk() {
//!     match candidate {
//!         Ok(c) => println!("{}: {} bytes", c.path.display(), c.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use walkdir::{DirEntry, WalkDir};

use super::{Candidate, ScanError};
use crate::config::Config;

/// Directory walker for filtered candidate discovery.
///
/// Walks every configured include root in order and applies the exclusion,
/// depth, name, and size filters. Paths are canonicalized before they are
/// yielded, and a path seen once is never yielded again within one walk.
#[derive(Debug)]
pub struct Walker {
    /// Run configuration holding roots and filters
    config: Config,
}

impl Walker {
    /// Create a new walker over the roots in `config`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupeblock::config::Config;
    /// use dupeblock::scanner::Walker;
    /// use std::path::PathBuf;
    ///
    /// let config = Config::default().with_include_dir(PathBuf::from("."));
    /// let walker = Walker::new(config);
    /// ```
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Walk all include roots, yielding candidates.
    ///
    /// Returns an iterator over [`Candidate`] results. Errors are yielded as
    /// [`ScanError`] values rather than stopping iteration; the caller
    /// decides whether to skip or abort.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dupeblock::config::Config;
    /// use dupeblock::scanner::Walker;
    /// use std::path::PathBuf;
    ///
    /// let config = Config::default().with_include_dir(PathBuf::from("."));
    /// let walker = Walker::new(config);
    /// let candidates: Vec<_> = walker.walk().filter_map(Result::ok).collect();
    /// println!("Found {} candidates", candidates.len());
    /// ```
    pub fn walk(&self) -> impl Iterator<Item = Result<Candidate, ScanError>> + '_ {
        let seen = Rc::new(RefCell::new(HashSet::new()));

        self.config
            .include_dirs
            .iter()
            .flat_map(move |root| self.walk_root(root, Rc::clone(&seen)))
    }

    /// Walk a single root directory.
    fn walk_root<'a>(
        &'a self,
        root: &'a Path,
        seen: Rc<RefCell<HashSet<PathBuf>>>,
    ) -> impl Iterator<Item = Result<Candidate, ScanError>> + 'a {
        log::debug!("Scanning root: {}", root.display());

        // Sort children for deterministic output
        let mut walk = WalkDir::new(root).follow_links(true).sort_by_file_name();
        if let Some(depth) = self.config.max_depth {
            // Files directly in the root sit at walkdir depth 1.
            let limit = usize::try_from(depth).unwrap_or(usize::MAX);
            walk = walk.max_depth(limit.saturating_add(1));
        }

        walk.into_iter()
            .filter_entry(move |entry| !self.is_excluded(entry))
            .filter_map(move |entry_result| match entry_result {
                Ok(entry) => self.process_entry(&entry, &seen),
                Err(e) => Some(self.handle_walk_error(root, e)),
            })
    }

    /// Check whether a directory entry falls under an excluded directory.
    ///
    /// Only directories are checked; pruning a directory skips its whole
    /// subtree, so files never need to be tested individually.
    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if self.config.exclude_dirs.is_empty() || !entry.file_type().is_dir() {
            return false;
        }

        match entry.path().canonicalize() {
            Ok(canonical) => {
                if self.config.exclude_dirs.contains(&canonical) {
                    log::debug!("Excluding directory: {}", entry.path().display());
                    true
                } else {
                    false
                }
            }
            Err(e) => {
                log::trace!(
                    "Could not canonicalize {}: {}",
                    entry.path().display(),
                    e
                );
                false
            }
        }
    }

    /// Apply the file filters to an entry and turn it into a candidate.
    fn process_entry(
        &self,
        entry: &DirEntry,
        seen: &Rc<RefCell<HashSet<PathBuf>>>,
    ) -> Option<Result<Candidate, ScanError>> {
        // Roots must be directories.
        if entry.depth() == 0 && !entry.file_type().is_dir() {
            log::warn!("Skipping root {}: not a directory", entry.path().display());
            return None;
        }

        // Directories and other non-files are traversal structure, not
        // candidates.
        if !entry.file_type().is_file() {
            return None;
        }

        if !self.passes_name_filter(entry) {
            log::trace!(
                "Skipping file due to name filter: {}",
                entry.path().display()
            );
            return None;
        }

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => return Some(self.handle_walk_error(entry.path(), e)),
        };

        let size = metadata.len();
        if !self.passes_size_filter(size) {
            log::trace!(
                "Skipping file due to size filter ({}): {}",
                size,
                entry.path().display()
            );
            return None;
        }

        let path = match entry.path().canonicalize() {
            Ok(p) => p,
            Err(e) => return Some(self.handle_io_error(entry.path(), e)),
        };

        if !seen.borrow_mut().insert(path.clone()) {
            log::debug!("Skipping already seen file: {}", path.display());
            return None;
        }

        Some(Ok(Candidate::new(path, size)))
    }

    /// Check if a file passes the minimum size filter.
    ///
    /// The bound is exclusive: a file the exact configured size is dropped.
    /// A negative minimum disables the filter.
    fn passes_size_filter(&self, size: u64) -> bool {
        let min = self.config.min_file_size;
        min < 0 || size > min as u64
    }

    /// Check if a file name matches at least one configured pattern.
    fn passes_name_filter(&self, entry: &DirEntry) -> bool {
        if self.config.name_patterns.is_empty() {
            return true;
        }

        let name = entry.file_name().to_string_lossy();
        self.config
            .name_patterns
            .iter()
            .any(|re| re.is_match(&name))
    }

    /// Handle I/O errors during file access.
    fn handle_io_error(&self, path: &Path, error: std::io::Error) -> Result<Candidate, ScanError> {
        use std::io::ErrorKind;

        match error.kind() {
            ErrorKind::PermissionDenied => {
                log::warn!("Permission denied: {}", path.display());
            }
            ErrorKind::NotFound => {
                log::debug!("Path not found (may have been deleted): {}", path.display());
            }
            _ => {
                log::warn!("I/O error for {}: {}", path.display(), error);
            }
        }
        Err(ScanError::from_io(path, error))
    }

    /// Handle walkdir errors, including symlink cycles.
    fn handle_walk_error(
        &self,
        fallback: &Path,
        error: walkdir::Error,
    ) -> Result<Candidate, ScanError> {
        let path = error
            .path()
            .map_or_else(|| fallback.to_path_buf(), Path::to_path_buf);

        if let Some(ancestor) = error.loop_ancestor() {
            log::warn!(
                "Symlink cycle at {} (back to {})",
                path.display(),
                ancestor.display()
            );
            return Err(ScanError::Io {
                path,
                source: std::io::Error::other(error.to_string()),
            });
        }

        // At depth zero the root itself could not be read.
        if error.depth() == 0 {
            log::warn!("Cannot scan root {}: {}", path.display(), error);
            return Err(match error.into_io_error() {
                Some(io) => ScanError::from_io(&path, io),
                None => ScanError::Io {
                    path,
                    source: std::io::Error::other("unknown traversal error"),
                },
            });
        }

        match error.into_io_error() {
            Some(io) => self.handle_io_error(&path, io),
            None => Err(ScanError::Io {
                path,
                source: std::io::Error::other("unknown traversal error"),
            }),
        }
    }
}
