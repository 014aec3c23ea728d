//! Data model for VolScan reports.
//!
//! Everything here is transient: built for one scan and dropped once printed.
pub mod entry;
pub mod size;
pub mod volume;

pub use entry::{DirectoryEntry, RankedReport};
pub use size::format_size;
pub use volume::{Capacity, VolumeId, VolumeSnapshot, VolumeTotals};
