//! Report rows produced by the directory ranker.
use super::size::format_size;
use std::fmt;
use std::path::PathBuf;

/// One immediate subdirectory of a scanned root and its recursive size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Full path of the subdirectory.
    pub path: PathBuf,
    /// Sum of all regular files beneath it, in bytes.
    pub size: u64,
}

impl DirectoryEntry {
    pub fn new(path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            path: path.into(),
            size,
        }
    }
}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), format_size(self.size))
    }
}

/// Subdirectories of one root, largest first.
///
/// Entries of equal size keep the order in which they were enumerated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RankedReport {
    pub entries: Vec<DirectoryEntry>,
    /// Number of entries that could not be read while building the report.
    pub error_count: u64,
}

impl RankedReport {
    /// Rank `entries` by size, descending. The sort is stable.
    pub fn from_unsorted(mut entries: Vec<DirectoryEntry>, error_count: u64) -> Self {
        entries.sort_by(|a, b| b.size.cmp(&a.size));
        Self {
            entries,
            error_count,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Combined size of every ranked subdirectory.
    pub fn total_size(&self) -> u64 {
        self.entries
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.size))
    }

    /// Rendered report rows, one `"<path>: <size>"` line per entry.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(ToString::to_string)
    }
}

impl fmt::Display for RankedReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}
