//! dupeblock - Duplicate File Finder
//!
//! A CLI tool that finds byte-identical files under one or more directory
//! roots. Instead of hashing whole files, content is proven equal by
//! incremental block-wise comparison: files are read lazily, one block at a
//! time, and comparison stops at the first differing block. Blocks are
//! cached per file, so no block is ever read from disk twice.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod scanner;

use anyhow::{Context, Result};
use bytesize::ByteSize;

use crate::cli::Cli;
use crate::config::Config;
use crate::duplicates::Matcher;
use crate::error::ExitCode;
use crate::output::TextOutput;
use crate::scanner::Walker;

/// Run the application: scan, match, print.
///
/// This is the whole pipeline behind `main`. Scan errors and comparison
/// read errors are skipped with a log message unless `--strict` was given,
/// in which case the first one aborts the run.
///
/// # Errors
///
/// Returns an error for an invalid configuration, for a failure to write
/// results to stdout, or (in strict mode) for the first scan or comparison
/// error.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let config = Config::from_cli(&cli).context("invalid configuration")?;

    if config.include_dirs.is_empty() {
        log::warn!("No include directories given; nothing to scan");
        return Ok(ExitCode::Success);
    }

    log::info!(
        "Scanning {} root(s), comparing in {} blocks",
        config.include_dirs.len(),
        ByteSize::b(config.block_size)
    );

    let strict = config.strict;
    let block_size = config.block_size;
    let walker = Walker::new(config);
    let mut matcher = Matcher::new(block_size);

    let mut scan_errors = 0usize;
    for candidate in walker.walk() {
        let candidate = match candidate {
            Ok(c) => c,
            Err(e) => {
                if strict {
                    return Err(e).context("scan failed");
                }
                // Already logged at the point of failure.
                scan_errors += 1;
                continue;
            }
        };

        if let Err(e) = matcher.insert(candidate) {
            if strict {
                return Err(e).context("comparison failed");
            }
            log::debug!("Dropped candidate: {}", e);
        }
    }

    let stats = matcher.stats();
    let groups = matcher.into_groups();

    TextOutput::new(&groups)
        .write_to(std::io::stdout().lock())
        .context("failed to write results")?;

    log::info!(
        "{} candidate(s) in {} group(s): {} duplicate(s) in {} group(s), {} reclaimable",
        stats.candidates,
        stats.groups,
        stats.duplicate_files,
        stats.duplicate_groups,
        ByteSize::b(stats.wasted_bytes)
    );
    log::info!(
        "Read {} block(s) ({}) over {} comparison(s); {} scan error(s), {} dropped candidate(s)",
        stats.blocks_read,
        ByteSize::b(stats.bytes_read),
        stats.comparisons,
        scan_errors,
        stats.dropped
    );

    Ok(ExitCode::Success)
}
