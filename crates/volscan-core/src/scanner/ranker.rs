//! Ranking of a root's immediate subdirectories by recursive size.
use super::progress::{ProgressSink, ScanProgress};
use super::sizer::{self, report_error};
use super::walk::TreeWalker;
use crate::model::{DirectoryEntry, RankedReport};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Size every immediate subdirectory of `root` and rank them, largest first.
///
/// Each subtree collapses to one row. A `ScanProgress::Update` is sent after
/// every subdirectory so a frontend can show "N of M". An unreadable `root`
/// or one without subdirectories yields an empty report.
pub fn rank(walker: &dyn TreeWalker, root: &Path, sink: &mut dyn ProgressSink) -> RankedReport {
    let start = Instant::now();

    let listing = match walker.subdirectories(root) {
        Ok(listing) => listing,
        Err(err) => {
            report_error(&err, sink);
            sink.send(ScanProgress::Started { total: 0 });
            sink.send(ScanProgress::Complete {
                duration: start.elapsed(),
                error_count: 1,
            });
            return RankedReport {
                entries: Vec::new(),
                error_count: 1,
            };
        }
    };

    // A child whose type could not be read is dropped from the ranking but
    // still counted and reported.
    let mut error_count: u64 = 0;
    let mut children = Vec::with_capacity(listing.len());
    for child in listing {
        match child {
            Ok(path) => children.push(path),
            Err(err) => {
                error_count += 1;
                report_error(&err, sink);
            }
        }
    }

    let total = children.len() as u64;
    info!("Ranking {total} subdirectories of {}", root.display());
    sink.send(ScanProgress::Started { total });

    let mut entries = Vec::with_capacity(children.len());
    for (i, child) in children.into_iter().enumerate() {
        let tally = sizer::tally(walker, &child, sink);
        error_count += tally.errors;
        debug!(
            "{}: {} bytes in {} files ({} errors)",
            child.display(),
            tally.bytes,
            tally.files,
            tally.errors
        );

        sink.send(ScanProgress::Update {
            processed: i as u64 + 1,
            total,
            current_path: child.to_string_lossy().into_owned(),
        });
        entries.push(DirectoryEntry::new(child, tally.bytes));
    }

    let duration = start.elapsed();
    info!(
        "Ranked {} of {} in {duration:?} with {error_count} errors",
        total,
        root.display()
    );
    sink.send(ScanProgress::Complete {
        duration,
        error_count,
    });

    RankedReport::from_unsorted(entries, error_count)
}
