//! Scan progress reporting — lightweight events emitted while a root is
//! being ranked.
//!
//! The scanner never touches the terminal. A frontend implements
//! [`ProgressSink`] to draw a progress line, and tests collect the events
//! through a crossbeam channel.
use crossbeam_channel::Sender;
use std::time::Duration;

/// Progress updates sent from the ranker to whoever is watching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanProgress {
    /// Subdirectories have been listed; `total` of them will be sized.
    Started { total: u64 },
    /// One more subdirectory finished.
    Update {
        processed: u64,
        total: u64,
        current_path: String,
    },
    /// A non-fatal error (e.g. permission denied on one file).
    Error { path: String, message: String },
    /// Every subdirectory has been sized.
    Complete { duration: Duration, error_count: u64 },
}

/// Receiver of [`ScanProgress`] events.
pub trait ProgressSink {
    fn send(&mut self, event: ScanProgress);
}

impl ProgressSink for Sender<ScanProgress> {
    fn send(&mut self, event: ScanProgress) {
        // A dropped receiver only means nobody is watching any more.
        let _ = Sender::send(self, event);
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for &mut S {
    fn send(&mut self, event: ScanProgress) {
        (**self).send(event);
    }
}

/// Sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn send(&mut self, _event: ScanProgress) {}
}
