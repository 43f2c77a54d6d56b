//! Run configuration assembled from command-line flags.
//!
//! [`Config`] is the single explicit bundle of settings threaded through the
//! scanner and the matcher. It is built from [`Cli`] by [`Config::from_cli`],
//! which also validates the block size and compiles the name patterns.

use log::warn;
use regex::Regex;
use std::collections::HashSet;
use std::path::PathBuf;
use thiserror::Error;

use crate::cli::Cli;

/// Errors raised while assembling the run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The comparison block size must cover at least one byte.
    #[error("block size must be at least 1 byte, got {0}")]
    InvalidBlockSize(i64),

    /// A `--file` pattern failed to compile as a regular expression.
    #[error("invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Settings for a single scan-and-match run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directories to traverse.
    pub include_dirs: Vec<PathBuf>,

    /// Canonicalized directories that are skipped entirely, subtrees included.
    pub exclude_dirs: HashSet<PathBuf>,

    /// Recursion depth limit below each root; `None` means unlimited.
    /// Zero keeps only files directly inside a root.
    pub max_depth: Option<u64>,

    /// Minimum size filter; only strictly larger files are kept.
    /// Negative values disable the filter and admit empty files.
    pub min_file_size: i64,

    /// Name patterns anchored to the whole file name; a file must match at
    /// least one if any are present.
    pub name_patterns: Vec<Regex>,

    /// Comparison block size in bytes, always at least 1.
    pub block_size: u64,

    /// Abort on the first scan or read error instead of skipping.
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_dirs: Vec::new(),
            exclude_dirs: HashSet::new(),
            max_depth: None,
            min_file_size: 1,
            name_patterns: Vec::new(),
            block_size: 1024,
            strict: false,
        }
    }
}

impl Config {
    /// Build a configuration from parsed command-line flags.
    ///
    /// Exclude directories that cannot be canonicalized are logged and
    /// dropped; a path that does not resolve cannot match anything the walk
    /// visits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBlockSize`] for a block size below one
    /// byte and [`ConfigError::InvalidPattern`] for a pattern that is not a
    /// valid regular expression.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        if cli.block_size < 1 {
            return Err(ConfigError::InvalidBlockSize(cli.block_size));
        }

        let mut name_patterns = Vec::with_capacity(cli.patterns.len());
        for pattern in &cli.patterns {
            // Anchor so the pattern must cover the whole file name.
            let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
                ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                }
            })?;
            name_patterns.push(regex);
        }

        let mut exclude_dirs = HashSet::new();
        for dir in &cli.exclude_dirs {
            match dir.canonicalize() {
                Ok(canonical) => {
                    exclude_dirs.insert(canonical);
                }
                Err(e) => {
                    warn!("Ignoring exclude directory {}: {}", dir.display(), e);
                }
            }
        }

        Ok(Self {
            include_dirs: cli.include_dirs.clone(),
            exclude_dirs,
            max_depth: cli.max_depth.and_then(|d| u64::try_from(d).ok()),
            min_file_size: cli.file_size,
            name_patterns,
            block_size: cli.block_size as u64,
            strict: cli.strict,
        })
    }

    /// Add a root directory to scan.
    #[must_use]
    pub fn with_include_dir(mut self, dir: PathBuf) -> Self {
        self.include_dirs.push(dir);
        self
    }

    /// Add a directory to skip. The path should already be canonical;
    /// [`Config::from_cli`] handles canonicalization for flag input.
    #[must_use]
    pub fn with_exclude_dir(mut self, dir: PathBuf) -> Self {
        self.exclude_dirs.insert(dir);
        self
    }

    /// Set the recursion depth limit.
    #[must_use]
    pub fn with_max_depth(mut self, depth: Option<u64>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set the minimum size filter.
    #[must_use]
    pub fn with_min_file_size(mut self, size: i64) -> Self {
        self.min_file_size = size;
        self
    }

    /// Add a compiled name pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.name_patterns.push(pattern);
        self
    }

    /// Set the comparison block size, clamped to at least one byte.
    #[must_use]
    pub fn with_block_size(mut self, size: u64) -> Self {
        self.block_size = size.max(1);
        self
    }

    /// Set fail-fast on any error.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[test]
    fn test_from_cli_defaults() {
        let cli = Cli::try_parse_from(["dupeblock"]).unwrap();
        let config = Config::from_cli(&cli).unwrap();
        assert!(config.include_dirs.is_empty());
        assert!(config.exclude_dirs.is_empty());
        assert_eq!(config.max_depth, None);
        assert_eq!(config.min_file_size, 1);
        assert!(config.name_patterns.is_empty());
        assert_eq!(config.block_size, 1024);
        assert!(!config.strict);
    }

    #[test]
    fn test_negative_depth_means_unlimited() {
        let cli = Cli::try_parse_from(["dupeblock", "-d", "-5"]).unwrap();
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_depth_is_preserved() {
        let cli = Cli::try_parse_from(["dupeblock", "-d", "0"]).unwrap();
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.max_depth, Some(0));
    }

    #[test]
    fn test_invalid_block_size_rejected() {
        for size in ["0", "-16"] {
            let cli = Cli::try_parse_from(["dupeblock", "-b", size]).unwrap();
            assert!(matches!(
                Config::from_cli(&cli),
                Err(ConfigError::InvalidBlockSize(_))
            ));
        }
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let cli = Cli::try_parse_from(["dupeblock", "-f", "*.txt"]).unwrap();
        let err = Config::from_cli(&cli).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPattern { .. }));
    }

    #[test]
    fn test_patterns_match_whole_name() {
        let cli = Cli::try_parse_from(["dupeblock", "-f", "a.c"]).unwrap();
        let config = Config::from_cli(&cli).unwrap();
        let regex = &config.name_patterns[0];
        assert!(regex.is_match("abc"));
        assert!(!regex.is_match("abcd"));
        assert!(!regex.is_match("xabc"));
    }

    #[test]
    fn test_missing_exclude_dir_is_dropped() {
        let dir = tempdir().unwrap();
        let existing = dir.path().join("keep");
        std::fs::create_dir(&existing).unwrap();

        let cli = Cli::try_parse_from([
            "dupeblock",
            "-e",
            existing.to_str().unwrap(),
            "-e",
            "/no/such/directory",
        ])
        .unwrap();
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.exclude_dirs.len(), 1);
        assert!(config.exclude_dirs.contains(&existing.canonicalize().unwrap()));
    }
}
