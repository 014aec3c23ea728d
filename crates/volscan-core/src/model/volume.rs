//! Volume identity and capacity accounting.
use super::size::format_size;
use std::fmt;
use std::path::Path;

/// Opaque identifier of a mounted volume as handed out by the platform
/// (`"C:\"` on Windows, a mount point such as `"/home"` on Unix).
///
/// The identifier doubles as the volume's root path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VolumeId(String);

impl VolumeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Root directory of the volume.
    pub fn root(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for VolumeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VolumeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Raw capacity figures returned by a volume query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capacity {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

/// Capacity of one volume at the moment it was queried.
///
/// Used space is always derived from the other two figures and is never
/// stored separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSnapshot {
    id: VolumeId,
    total_bytes: u64,
    free_bytes: u64,
}

impl VolumeSnapshot {
    /// Build a snapshot. `free_bytes` is clamped to `total_bytes`, keeping
    /// `used == total - free` well defined.
    pub fn new(id: VolumeId, capacity: Capacity) -> Self {
        Self {
            id,
            total_bytes: capacity.total_bytes,
            free_bytes: capacity.free_bytes.min(capacity.total_bytes),
        }
    }

    pub fn id(&self) -> &VolumeId {
        &self.id
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn free_bytes(&self) -> u64 {
        self.free_bytes
    }

    pub fn used_bytes(&self) -> u64 {
        self.total_bytes - self.free_bytes
    }
}

impl fmt::Display for VolumeSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Drive: {}", self.id)?;
        writeln!(f, "Total Space: {}", format_size(self.total_bytes))?;
        writeln!(f, "Free Space: {}", format_size(self.free_bytes))?;
        writeln!(f, "Used Space: {}", format_size(self.used_bytes()))
    }
}

/// Running totals over several volumes, used by the "scan all" report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeTotals {
    pub volumes: u64,
    pub failed: u64,
    pub total_bytes: u64,
    pub free_bytes: u64,
}

impl VolumeTotals {
    pub fn add(&mut self, snapshot: &VolumeSnapshot) {
        self.volumes += 1;
        self.total_bytes = self.total_bytes.saturating_add(snapshot.total_bytes());
        self.free_bytes = self.free_bytes.saturating_add(snapshot.free_bytes());
    }

    pub fn add_failure(&mut self) {
        self.failed += 1;
    }

    pub fn used_bytes(&self) -> u64 {
        self.total_bytes.saturating_sub(self.free_bytes)
    }
}

impl fmt::Display for VolumeTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Aggregate across {} drive(s):", self.volumes)?;
        writeln!(f, "Total Space: {}", format_size(self.total_bytes))?;
        writeln!(f, "Free Space: {}", format_size(self.free_bytes))?;
        writeln!(f, "Used Space: {}", format_size(self.used_bytes()))?;
        if self.failed > 0 {
            writeln!(f, "Drives that could not be read: {}", self.failed)?;
        }
        Ok(())
    }
}
