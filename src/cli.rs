//! Command-line interface definitions.
//!
//! All flags are defined with the clap derive API; the doc comments below
//! double as `--help` text. There are no subcommands: one invocation is one
//! scan.
//!
//! # Example
//!
//! ```bash
//! # Group duplicates under two roots, skipping a build directory
//! dupeblock -i ~/photos -i /mnt/backup/photos -e ~/photos/cache
//!
//! # Only .iso images over 1 MiB, compared in 64 KiB blocks
//! dupeblock -i /srv/images -f '.*\.iso' -s 1048576 -b 65536
//!
//! # Shallow scan: files directly in the root only
//! dupeblock -i /tmp -d 0
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Duplicate file finder using lazy block-wise comparison.
///
/// dupeblock walks the include roots, filters files by size and name, and
/// partitions the survivors into groups of byte-identical files. Content is
/// read in fixed-size blocks, on demand, and never more than once per file.
#[derive(Debug, Parser)]
#[command(name = "dupeblock")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Root directory to scan; repeat for multiple roots
    ///
    /// Without at least one include directory no traversal occurs.
    #[arg(short = 'i', long = "include-dir", value_name = "DIR")]
    pub include_dirs: Vec<PathBuf>,

    /// Directory to skip entirely; repeat for multiple exclusions
    ///
    /// Matched by canonical path, so symlinked aliases are also skipped.
    #[arg(short = 'e', long = "exclude-dir", value_name = "DIR")]
    pub exclude_dirs: Vec<PathBuf>,

    /// Recursion depth limit below each root
    ///
    /// 0 scans only files directly in the root. Absent or negative means
    /// unlimited.
    #[arg(short = 'd', long, value_name = "N", allow_negative_numbers = true)]
    pub max_depth: Option<i64>,

    /// Minimum file size in bytes; only strictly larger files are considered
    ///
    /// Pass a negative value to admit zero-byte files.
    #[arg(
        short = 's',
        long,
        value_name = "BYTES",
        default_value_t = 1,
        allow_negative_numbers = true
    )]
    pub file_size: i64,

    /// File name pattern (regular expression, matched against the whole name)
    ///
    /// May be repeated; a file must match at least one pattern if any are
    /// given.
    #[arg(short = 'f', long = "file", value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Comparison block size in bytes
    #[arg(
        short = 'b',
        long,
        value_name = "BYTES",
        default_value_t = 1024,
        allow_negative_numbers = true
    )]
    pub block_size: i64,

    /// Abort on the first scan or read error instead of skipping
    #[arg(long)]
    pub strict: bool,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors and results
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
