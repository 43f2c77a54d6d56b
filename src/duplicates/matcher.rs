//! First-match-wins placement of candidates into groups.
//!
//! # Overview
//!
//! The [`Matcher`] is the accumulator at the end of the pipeline. Candidates
//! arrive one at a time; each is compared against the representatives of the
//! existing groups in creation order and joins the first group whose
//! representative matches. A candidate matching no group starts a new one.
//!
//! Only representatives are ever compared against, so a group of N
//! duplicates costs N-1 comparisons, not N*(N-1)/2, and the representative's
//! block cache warms up once and serves every later comparison.
//!
//! # Example
//!
//! ```no_run
//! use dupeblock::duplicates::Matcher;
//! use dupeblock::scanner::Candidate;
//! use std::path::PathBuf;
//!
//! let mut matcher = Matcher::new(1024);
//! let candidate = Candidate::new(PathBuf::from("/data/a.bin"), 4096);
//! if let Err(e) = matcher.insert(candidate) {
//!     eprintln!("Warning: {}", e);
//! }
//!
//! for group in matcher.groups().iter().filter(|g| g.has_duplicates()) {
//!     for path in group.paths() {
//!         println!("{}", path.display());
//!     }
//!     println!();
//! }
//! ```

use super::compare::{BlockwiseComparator, ContentComparator};
use super::groups::{Group, MatchStats};
use super::tracked::TrackedFile;
use super::CompareError;
use crate::scanner::Candidate;

/// Incremental partitioner of candidates into groups of identical files.
pub struct Matcher {
    /// Comparison strategy
    comparator: Box<dyn ContentComparator>,
    /// All groups in creation order
    groups: Vec<Group>,
    /// Candidates offered so far
    candidates: usize,
    /// Content comparisons performed
    comparisons: usize,
    /// Candidates dropped after read errors
    dropped: usize,
}

impl std::fmt::Debug for Matcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Matcher")
            .field("comparator", &"<dyn ContentComparator>")
            .field("groups", &self.groups.len())
            .field("candidates", &self.candidates)
            .field("comparisons", &self.comparisons)
            .field("dropped", &self.dropped)
            .finish()
    }
}

impl Matcher {
    /// Create a matcher using the block-wise comparator at the given block
    /// size.
    #[must_use]
    pub fn new(block_size: u64) -> Self {
        Self::with_comparator(Box::new(BlockwiseComparator::new(block_size)))
    }

    /// Create a matcher with a custom comparison strategy.
    #[must_use]
    pub fn with_comparator(comparator: Box<dyn ContentComparator>) -> Self {
        Self {
            comparator,
            groups: Vec::new(),
            candidates: 0,
            comparisons: 0,
            dropped: 0,
        }
    }

    /// Place a candidate into the first group whose representative matches,
    /// creating a new group if none does.
    ///
    /// Returns the index of the group the candidate landed in. Groups are
    /// checked in creation order and only same-size groups are compared at
    /// all, so candidates of a unique size cost no I/O.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError`] if a comparison fails to read; the candidate
    /// is dropped and every existing group is left exactly as it was.
    pub fn insert(&mut self, candidate: Candidate) -> Result<usize, CompareError> {
        self.candidates += 1;
        let mut file = TrackedFile::from(candidate);

        for (index, group) in self.groups.iter_mut().enumerate() {
            if group.size() != file.size() {
                continue;
            }

            self.comparisons += 1;
            match self.comparator.equal(&mut file, group.representative_mut()) {
                Ok(true) => {
                    log::debug!("{} joins group {}", file.path().display(), index);
                    group.add(file);
                    return Ok(index);
                }
                Ok(false) => {}
                Err(e) => {
                    self.dropped += 1;
                    return Err(e);
                }
            }
        }

        log::debug!(
            "{} starts group {}",
            file.path().display(),
            self.groups.len()
        );
        self.groups.push(Group::new(file));
        Ok(self.groups.len() - 1)
    }

    /// All groups in creation order, singletons included.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Consume the matcher, returning the groups in creation order.
    #[must_use]
    pub fn into_groups(self) -> Vec<Group> {
        self.groups
    }

    /// Snapshot of the matching statistics.
    ///
    /// Block and byte counts are computed from the live caches, so reads
    /// performed for candidates that were later dropped are not included.
    #[must_use]
    pub fn stats(&self) -> MatchStats {
        let mut stats = MatchStats {
            candidates: self.candidates,
            comparisons: self.comparisons,
            dropped: self.dropped,
            groups: self.groups.len(),
            ..MatchStats::default()
        };

        for group in &self.groups {
            if group.has_duplicates() {
                stats.duplicate_groups += 1;
                stats.duplicate_files += group.len() - 1;
                stats.wasted_bytes += group.wasted_space();
            }
            for file in group.files() {
                stats.blocks_read += file.cached_blocks() as u64;
                stats.bytes_read += file.cached_bytes();
            }
        }

        stats
    }
}
