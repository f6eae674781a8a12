//! Parsed log entry.

use serde::Serialize;

/// One entry of the build log.
///
/// An entry starts on a line of the form `SEVERITY - message` and owns every
/// following line up to the next entry start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    /// Uppercase severity token (`DEBUG`, `INFO`, `WARNING`, or any other).
    pub severity: String,
    /// Bracketed origin tag (e.g. `macros`), empty if absent.
    pub source: String,
    /// Remainder of the first line.
    pub title: String,
    /// Following lines, trimmed; empty if none.
    pub payload: String,
}

impl LogEntry {
    /// Whether the entry carries a bracketed source tag.
    #[must_use]
    pub fn has_source(&self) -> bool {
        !self.source.is_empty()
    }

    /// Whether the entry has continuation lines.
    #[must_use]
    pub fn has_payload(&self) -> bool {
        !self.payload.is_empty()
    }
}
