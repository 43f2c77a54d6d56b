//! Plain-text output for duplicate groups.
//!
//! The result format is line oriented and made for piping: each duplicate
//! group is printed as its member paths, one canonical path per line, in
//! insertion order, with a blank line between groups. Groups holding a
//! single file are not duplicates and are not printed. Everything else the
//! program has to say goes through the logger to stderr.
//!
//! # Example
//!
//! ```no_run
//! use dupeblock::duplicates::Matcher;
//! use dupeblock::output::TextOutput;
//!
//! let matcher = Matcher::new(1024);
//! // ... insert candidates ...
//! let groups = matcher.into_groups();
//!
//! let output = TextOutput::new(&groups);
//! output.write_to(std::io::stdout()).unwrap();
//! ```

use std::io;

use crate::duplicates::Group;

/// Plain-text group printer.
pub struct TextOutput<'a> {
    groups: &'a [Group],
}

impl<'a> TextOutput<'a> {
    /// Create a printer over the given groups.
    #[must_use]
    pub fn new(groups: &'a [Group]) -> Self {
        Self { groups }
    }

    /// Write the duplicate groups to the given writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the writer.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> io::Result<()> {
        let mut first = true;
        for group in self.groups.iter().filter(|g| g.has_duplicates()) {
            if !first {
                writeln!(writer)?;
            }
            first = false;

            for path in group.paths() {
                writeln!(writer, "{}", path.display())?;
            }
        }
        writer.flush()
    }
}
