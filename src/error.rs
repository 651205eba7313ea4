//! Errors surfaced by the loader.
//!
//! Only failures of the source itself are errors. Malformed rows, empty
//! groups and failed lookups are ordinary results (`Option`, skip counters).

use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The source could not be opened at all.
    #[error("cannot open {}: {source}", .path.display())]
    SourceUnreadable { path: PathBuf, source: io::Error },

    /// An I/O failure interrupted reading after the source was opened.
    #[error("read failed near line {line}: {source}")]
    Read { line: u64, source: csv::Error },
}

impl LoadError {
    pub fn is_source_unreadable(&self) -> bool {
        matches!(self, LoadError::SourceUnreadable { .. })
    }
}
