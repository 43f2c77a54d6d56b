//! Duplicate groups and match statistics.
//!
//! # Overview
//!
//! A [`Group`] is a maximal set of files proven byte-identical by the
//! comparator. Its first member is the representative: every later candidate
//! of the same size is compared against the representative only, never
//! against the other members.
//!
//! [`MatchStats`] summarizes a matching run, including how much I/O the
//! lazy block caches saved.

use std::path::Path;

use super::TrackedFile;

/// A group of files proven byte-identical.
///
/// Groups only grow. A group is created from its first member and gains a
/// member each time a candidate's content matches the representative's.
#[derive(Debug)]
pub struct Group {
    /// File size shared by every member
    size: u64,
    /// Members in insertion order; the first is the representative
    files: Vec<TrackedFile>,
}

impl Group {
    /// Create a group containing its first member.
    #[must_use]
    pub fn new(file: TrackedFile) -> Self {
        Self {
            size: file.size(),
            files: vec![file],
        }
    }

    /// File size shared by every member.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// The representative member. A group is never empty, so this always
    /// exists.
    #[must_use]
    pub fn representative(&self) -> &TrackedFile {
        &self.files[0]
    }

    /// Mutable access to the representative, for comparisons that populate
    /// its block cache.
    pub(crate) fn representative_mut(&mut self) -> &mut TrackedFile {
        &mut self.files[0]
    }

    /// Add a file proven identical to the representative.
    ///
    /// # Panics
    ///
    /// Debug assertion fails if the file size doesn't match the group size.
    pub fn add(&mut self, file: TrackedFile) {
        debug_assert_eq!(
            file.size(),
            self.size,
            "File size {} doesn't match group size {}",
            file.size(),
            self.size
        );
        self.files.push(file);
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty. Construction guarantees a first
    /// member, so this is always false.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Check if this group holds actual duplicates (2+ files).
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.files.len() > 1
    }

    /// Members in insertion order.
    #[must_use]
    pub fn files(&self) -> &[TrackedFile] {
        &self.files
    }

    /// Member paths in insertion order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(|f| f.path())
    }

    /// Space reclaimable by keeping a single copy.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        if self.files.len() > 1 {
            self.size * (self.files.len() as u64 - 1)
        } else {
            0
        }
    }
}

/// Statistics from a matching run.
///
/// Collected by the matcher; the block and byte counts reflect what is
/// cached across all live files and show how little of the tree the
/// incremental comparison actually read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchStats {
    /// Candidates offered to the matcher
    pub candidates: usize,
    /// Content comparisons performed (same-size pairs only)
    pub comparisons: usize,
    /// Candidates dropped after a read error
    pub dropped: usize,
    /// Total groups, including singletons
    pub groups: usize,
    /// Groups holding 2+ files
    pub duplicate_groups: usize,
    /// Redundant copies across all duplicate groups (each group's count
    /// minus its original)
    pub duplicate_files: usize,
    /// Bytes reclaimable by deduplicating every group to one copy
    pub wasted_bytes: u64,
    /// Blocks read from disk across all tracked files
    pub blocks_read: u64,
    /// Bytes read from disk across all tracked files
    pub bytes_read: u64,
}
