//! Platform-specific functionality — volume enumeration and capacity
//! queries behind the [`VolumeProvider`] trait.
//!
//! The scanner core only ever talks to the trait, so it runs unchanged
//! against [`SystemVolumes`] or a test double.
use crate::error::VolumeError;
use crate::model::{Capacity, VolumeId};

#[cfg(unix)]
mod unix;
#[cfg(windows)]
mod win32;

#[cfg(unix)]
pub use unix::{parse_mounts, SystemVolumes};
#[cfg(windows)]
pub use win32::SystemVolumes;

/// Source of volume identifiers and their capacity.
pub trait VolumeProvider {
    /// Every currently mounted volume, primary first where the platform
    /// has one.
    fn list_volumes(&self) -> Result<Vec<VolumeId>, VolumeError>;

    /// Total and free bytes of `volume`.
    fn query_capacity(&self, volume: &VolumeId) -> Result<Capacity, VolumeError>;

    /// The volume the operating system lives on.
    fn primary_volume(&self) -> VolumeId;
}

/// Decode a `GetLogicalDrives` style bitmask (bit 0 = `A:`) into drive roots.
pub fn drives_from_mask(mask: u32) -> Vec<VolumeId> {
    (b'A'..=b'Z')
        .filter(|letter| mask & (1 << (letter - b'A')) != 0)
        .map(|letter| VolumeId::new(format!("{}:\\", letter as char)))
        .collect()
}
