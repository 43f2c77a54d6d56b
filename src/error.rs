//! Process exit codes.

/// Exit codes for the dupeblock binary.
///
/// The contract is deliberately narrow:
/// - 0: normal completion, including `--help` and runs where individual
///   files were skipped under the default error policy
/// - 1: fatal error (invalid configuration, strict-mode abort, output failure)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Normal completion.
    Success = 0,
    /// An unrecoverable error occurred.
    GeneralError = 1,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
