//! Content comparison strategies.
//!
//! [`ContentComparator`] is the seam for deciding whether two files have
//! identical content; [`BlockwiseComparator`] is the default strategy. It
//! walks both files in lockstep one block at a time and stops at the first
//! difference, so distinguishing two files costs only as many reads as it
//! takes to find a differing block.

use super::{CompareError, TrackedFile};

/// Strategy for proving two tracked files byte-identical.
///
/// Implementations may read through the files' block caches; they must not
/// report equality for files whose content differs.
pub trait ContentComparator {
    /// Compare the full content of two files.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError`] if a required block cannot be read from
    /// either file.
    fn equal(&self, a: &mut TrackedFile, b: &mut TrackedFile) -> Result<bool, CompareError>;
}

/// Incremental block-by-block comparator.
///
/// Blocks are fetched through each file's cache, so bytes already read by
/// earlier comparisons are never read from disk again. Files of equal size
/// are equal exactly when every block matches; the final short block is
/// compared clipped to the file size.
#[derive(Debug, Clone, Copy)]
pub struct BlockwiseComparator {
    /// Block size in bytes, at least 1
    block_size: u64,
}

impl BlockwiseComparator {
    /// Create a comparator with the given block size, clamped to at least
    /// one byte.
    #[must_use]
    pub fn new(block_size: u64) -> Self {
        Self {
            block_size: block_size.max(1),
        }
    }

    /// Block size in bytes.
    #[must_use]
    pub fn block_size(&self) -> u64 {
        self.block_size
    }
}

impl ContentComparator for BlockwiseComparator {
    fn equal(&self, a: &mut TrackedFile, b: &mut TrackedFile) -> Result<bool, CompareError> {
        if a.size() != b.size() {
            return Ok(false);
        }

        let mut index = 0;
        loop {
            match (
                a.has_block(index, self.block_size),
                b.has_block(index, self.block_size),
            ) {
                // Both exhausted with every block equal so far.
                (false, false) => return Ok(true),
                (true, true) => {}
                // Equal recorded sizes exhaust at the same index, so the
                // mixed arms cannot be reached; a file that shrank on disk
                // surfaces as a read error instead.
                _ => return Ok(false),
            }

            if a.block(index, self.block_size)? != b.block(index, self.block_size)? {
                log::trace!(
                    "Files differ at block {}: {} vs {}",
                    index,
                    a.path().display(),
                    b.path().display()
                );
                return Ok(false);
            }
            index += 1;
        }
    }
}
