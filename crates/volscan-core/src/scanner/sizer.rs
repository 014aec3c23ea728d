//! Recursive directory sizing.
//!
//! The sizer folds over a [`TreeWalker`] sequence. Regular files add their
//! size, error entries add nothing and are reported, and the fold always
//! produces a number: one locked subtree never aborts the total.
use super::progress::{ProgressSink, ScanProgress};
use super::walk::{TreeWalker, WalkEntry};
use crate::error::AccessError;
use std::path::Path;
use tracing::debug;

/// Running result of sizing one directory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub bytes: u64,
    pub files: u64,
    pub errors: u64,
}

impl Tally {
    fn fold(mut self, entry: WalkEntry, sink: &mut dyn ProgressSink) -> Self {
        match entry {
            WalkEntry::File { size, .. } => {
                self.bytes = self.bytes.saturating_add(size);
                self.files += 1;
            }
            WalkEntry::Dir { .. } | WalkEntry::Other { .. } => {}
            WalkEntry::Error(err) => {
                self.errors += 1;
                report_error(&err, sink);
            }
        }
        self
    }
}

/// Total size in bytes of every regular file under `path`.
///
/// Never fails: unreadable entries are reported to `sink` and skipped, and an
/// unreadable `path` sizes to 0.
pub fn size_of(walker: &dyn TreeWalker, path: &Path, sink: &mut dyn ProgressSink) -> u64 {
    tally(walker, path, sink).bytes
}

/// Like [`size_of`], but also returns file and error counts.
pub fn tally(walker: &dyn TreeWalker, path: &Path, sink: &mut dyn ProgressSink) -> Tally {
    match walker.walk(path) {
        Ok(entries) => entries.fold(Tally::default(), |acc, entry| acc.fold(entry, sink)),
        Err(err) => {
            report_error(&err, sink);
            Tally {
                errors: 1,
                ..Tally::default()
            }
        }
    }
}

pub(crate) fn report_error(err: &AccessError, sink: &mut dyn ProgressSink) {
    debug!("{err}");
    sink.send(ScanProgress::Error {
        path: err.path.to_string_lossy().into_owned(),
        message: err.message.clone(),
    });
}
