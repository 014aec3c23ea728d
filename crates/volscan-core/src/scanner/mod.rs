//! Scanner module — directory sizing and ranking.
//!
//! Everything here runs on the caller's thread and blocks until the
//! subtree is exhausted. Progress leaves through a [`ProgressSink`];
//! access failures are reported and skipped, never returned.
pub mod progress;
pub mod ranker;
pub mod sizer;
pub mod walk;

#[cfg(test)]
pub(crate) mod fake;

pub use progress::{NoProgress, ProgressSink, ScanProgress};
pub use ranker::rank;
pub use sizer::{size_of, tally, Tally};
pub use walk::{ChildDirs, JwalkWalker, TreeWalker, WalkEntry, WalkIter};
