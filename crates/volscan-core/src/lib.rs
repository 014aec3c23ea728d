//! VolScan Core — volume capacity and directory-size reporting.
//!
//! This crate contains all reporting logic with zero console dependencies.
//! The frontend supplies the output streams and a [`scanner::ProgressSink`].
//!
//! # Modules
//!
//! - [`model`] — Report rows, volume snapshots, and size formatting.
//! - [`scanner`] — Recursive sizing and subdirectory ranking with progress events.
//! - [`report`] — Per-volume report driver.
//! - [`platform`] — Volume enumeration and capacity queries.
//! - [`config`] — Session settings.
//! - [`error`] — Error types.
pub mod config;
pub mod error;
pub mod model;
pub mod platform;
pub mod report;
pub mod scanner;

pub use config::ScanSettings;
pub use error::{AccessError, VolumeError};
pub use report::{VolumeOutcome, VolumeReporter};
