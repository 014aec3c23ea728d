//! Runtime settings for a reporting session.

/// Bytes in one GiB.
pub const GIB: u64 = 1024 * 1024 * 1024;

/// Volumes larger than this get a "this may take a while" notice.
pub const DEFAULT_LARGE_VOLUME_THRESHOLD: u64 = 50 * GIB;

/// Knobs for [`crate::report::VolumeReporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSettings {
    /// Total capacity above which the slow-scan advisory is printed.
    pub large_volume_threshold: u64,
}

impl ScanSettings {
    /// Settings with the advisory threshold given in GiB.
    pub fn with_threshold_gib(gib: u64) -> Self {
        Self {
            large_volume_threshold: gib.saturating_mul(GIB),
        }
    }
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            large_volume_threshold: DEFAULT_LARGE_VOLUME_THRESHOLD,
        }
    }
}
