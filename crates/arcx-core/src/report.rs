//! Extraction operation reporting.

use std::time::Duration;

/// Statistics about a successful extraction call.
///
/// Hosts that only need "done" can discard it.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Number of archive members written as files.
    pub files_extracted: usize,

    /// Number of directories created for archive members.
    pub directories_created: usize,

    /// Number of PDF pages rendered to images.
    pub pages_rendered: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the call.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total number of items produced.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.files_extracted + self.directories_created + self.pages_rendered
    }
}
