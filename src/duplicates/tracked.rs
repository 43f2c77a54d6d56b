//! Lazily read files with append-only block caches.
//!
//! A [`TrackedFile`] starts as nothing but a path and a size. Its handle is
//! opened on the first block read and kept for the file's lifetime, and each
//! block is read from disk exactly once: later requests for the same block
//! are served from the cache.

use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use super::CompareError;
use crate::scanner::Candidate;

/// A candidate file plus its lazily populated block cache.
///
/// Blocks are cached in order, so the cache always holds a prefix of the
/// file's content. Requesting block `i` reads blocks up to `i` if they are
/// not cached yet. The cache never shrinks and cached bytes are never read
/// from disk again.
pub struct TrackedFile {
    /// Canonical path to the file
    path: PathBuf,
    /// Size recorded at discovery time
    size: u64,
    /// Read handle, opened on first block access and then retained
    handle: Option<File>,
    /// Blocks read so far, in order from the start of the file
    blocks: Vec<Vec<u8>>,
}

impl std::fmt::Debug for TrackedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedFile")
            .field("path", &self.path)
            .field("size", &self.size)
            .field("handle", &self.handle.as_ref().map(|_| "<open>"))
            .field("cached_blocks", &self.blocks.len())
            .finish()
    }
}

impl TrackedFile {
    /// Create a tracked file. No I/O happens until the first block read.
    ///
    /// # Arguments
    ///
    /// * `path` - Canonical path to the file
    /// * `size` - File size in bytes at discovery time
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self {
            path,
            size,
            handle: None,
            blocks: Vec::new(),
        }
    }

    /// Path to the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size recorded at discovery time.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Number of blocks currently cached.
    #[must_use]
    pub fn cached_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Total bytes currently cached.
    #[must_use]
    pub fn cached_bytes(&self) -> u64 {
        self.blocks.iter().map(|b| b.len() as u64).sum()
    }

    /// Whether the file's content extends into the given block.
    ///
    /// Block `i` covers the byte range `[i * block_size, (i + 1) * block_size)`
    /// clipped to the file size; it exists when that range is non-empty.
    /// Pure arithmetic on the recorded size, no I/O.
    #[must_use]
    pub fn has_block(&self, index: usize, block_size: u64) -> bool {
        (index as u64).saturating_mul(block_size) < self.size
    }

    /// Return the block at `index`, reading it on first access.
    ///
    /// Blocks are read in file order, so requesting a block beyond the cache
    /// also reads and caches everything before it. The final block of a file
    /// whose size is not a multiple of `block_size` is short. Callers must
    /// check [`has_block`](Self::has_block) first; an index past the end of
    /// the file is a logic error.
    ///
    /// # Errors
    ///
    /// Returns [`CompareError`] if the file cannot be opened or the read
    /// fails, including the case where the file shrank since discovery.
    ///
    /// # Panics
    ///
    /// Debug assertion fails if the requested block starts past the end of
    /// the file.
    pub fn block(&mut self, index: usize, block_size: u64) -> Result<&[u8], CompareError> {
        while self.blocks.len() <= index {
            let next = self.blocks.len();
            let block = self.read_block(next, block_size)?;
            self.blocks.push(block);
        }
        Ok(&self.blocks[index])
    }

    /// Read one block from disk, seeking to its start offset first. Seeking
    /// every time keeps the handle position well defined even after a failed
    /// read, so a later retry cannot read from the wrong offset.
    fn read_block(&mut self, index: usize, block_size: u64) -> Result<Vec<u8>, CompareError> {
        let start = (index as u64).saturating_mul(block_size);
        debug_assert!(
            start < self.size,
            "block {} starts past the end of {}",
            index,
            self.path.display()
        );
        let len = self.size.saturating_sub(start).min(block_size) as usize;

        let handle = match self.handle.take() {
            Some(file) => file,
            None => File::open(&self.path).map_err(|e| {
                log::warn!("Failed to open {}: {}", self.path.display(), e);
                CompareError::from_io(&self.path, e)
            })?,
        };
        let handle = self.handle.insert(handle);

        let mut buf = vec![0u8; len];
        handle
            .seek(SeekFrom::Start(start))
            .and_then(|_| handle.read_exact(&mut buf))
            .map_err(|e| {
                log::warn!(
                    "Failed to read block {} of {}: {}",
                    index,
                    self.path.display(),
                    e
                );
                CompareError::from_io(&self.path, e)
            })?;

        log::trace!(
            "Read block {} ({} bytes) of {}",
            index,
            len,
            self.path.display()
        );
        Ok(buf)
    }
}

impl From<Candidate> for TrackedFile {
    fn from(candidate: Candidate) -> Self {
        Self::new(candidate.path, candidate.size)
    }
}
