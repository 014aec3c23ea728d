//! Mount-point enumeration and capacity queries for Unix systems.
use super::VolumeProvider;
use crate::error::VolumeError;
use crate::model::{Capacity, VolumeId};
use nix::errno::Errno;
use nix::sys::statvfs::statvfs;
use std::fs;

const MOUNT_TABLE: &str = "/proc/self/mounts";
const ROOT: &str = "/";

/// Mount points of the running system.
///
/// Only block-device backed mounts are listed; pseudo filesystems such as
/// `proc` or `tmpfs` have no disk behind them.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemVolumes;

impl SystemVolumes {
    pub fn new() -> Self {
        Self
    }
}

impl VolumeProvider for SystemVolumes {
    fn list_volumes(&self) -> Result<Vec<VolumeId>, VolumeError> {
        match fs::read_to_string(MOUNT_TABLE) {
            Ok(table) => Ok(parse_mounts(&table)),
            Err(err) => {
                tracing::debug!("{MOUNT_TABLE} unavailable ({err}), listing only {ROOT}");
                Ok(vec![VolumeId::new(ROOT)])
            }
        }
    }

    fn query_capacity(&self, volume: &VolumeId) -> Result<Capacity, VolumeError> {
        let stat = statvfs(volume.root()).map_err(classify)?;
        let fragment = stat.fragment_size() as u64;
        Ok(Capacity {
            total_bytes: (stat.blocks() as u64).saturating_mul(fragment),
            free_bytes: (stat.blocks_free() as u64).saturating_mul(fragment),
        })
    }

    fn primary_volume(&self) -> VolumeId {
        VolumeId::new(ROOT)
    }
}

fn classify(errno: Errno) -> VolumeError {
    match errno {
        Errno::EACCES | Errno::EPERM => VolumeError::AccessDenied,
        Errno::ENODEV | Errno::ENXIO | Errno::EBUSY | Errno::EAGAIN | Errno::ENOENT => {
            VolumeError::NotReady
        }
        other => VolumeError::Unknown {
            code: other as i32,
            message: other.desc().to_string(),
        },
    }
}

/// Extract disk-backed mount points from a `/proc/mounts` style table.
///
/// `/` always comes first, even when its source is an overlay. Loop devices
/// are skipped and repeated mount points are listed once.
pub fn parse_mounts(table: &str) -> Vec<VolumeId> {
    let mut volumes = vec![VolumeId::new(ROOT)];
    for line in table.lines() {
        let mut fields = line.split_whitespace();
        let (Some(source), Some(target)) = (fields.next(), fields.next()) else {
            continue;
        };
        if !source.starts_with('/') || source.starts_with("/dev/loop") {
            continue;
        }
        let id = VolumeId::new(unescape(target));
        if !volumes.contains(&id) {
            volumes.push(id);
        }
    }
    volumes
}

/// Undo the octal escaping (`\040` for space) the kernel applies to mount paths.
fn unescape(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            if let Some(digits) = bytes.get(i + 1..i + 4) {
                if digits.iter().all(|b| (b'0'..=b'7').contains(b)) {
                    let value = digits
                        .iter()
                        .fold(0u32, |acc, b| acc * 8 + u32::from(b - b'0'));
                    if let Ok(byte) = u8::try_from(value) {
                        out.push(byte);
                        i += 4;
                        continue;
                    }
                }
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}
