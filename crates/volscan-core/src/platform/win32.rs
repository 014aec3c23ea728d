//! Drive enumeration and capacity queries using the Windows API.
use super::{drives_from_mask, VolumeProvider};
use crate::error::VolumeError;
use crate::model::{Capacity, VolumeId};
use windows::Win32::Foundation::{ERROR_ACCESS_DENIED, ERROR_NOT_READY};
use windows::Win32::Storage::FileSystem::{GetDiskFreeSpaceExW, GetLogicalDrives};

/// Drive letters reported by the running Windows system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemVolumes;

impl SystemVolumes {
    pub fn new() -> Self {
        Self
    }
}

impl VolumeProvider for SystemVolumes {
    fn list_volumes(&self) -> Result<Vec<VolumeId>, VolumeError> {
        let mask = unsafe { GetLogicalDrives() };
        if mask == 0 {
            let err = windows::core::Error::from_win32();
            tracing::warn!("GetLogicalDrives returned 0: {err}");
            return Err(classify(&err));
        }
        Ok(drives_from_mask(mask))
    }

    fn query_capacity(&self, volume: &VolumeId) -> Result<Capacity, VolumeError> {
        let root_wide: Vec<u16> = volume
            .as_str()
            .encode_utf16()
            .chain(std::iter::once(0))
            .collect();
        let root_pcwstr = windows::core::PCWSTR(root_wide.as_ptr());

        let mut free_caller: u64 = 0;
        let mut total: u64 = 0;
        let mut free_total: u64 = 0;
        unsafe {
            GetDiskFreeSpaceExW(
                root_pcwstr,
                Some(&mut free_caller as *mut u64),
                Some(&mut total as *mut u64),
                Some(&mut free_total as *mut u64),
            )
        }
        .map_err(|err| classify(&err))?;

        Ok(Capacity {
            total_bytes: total,
            free_bytes: free_total,
        })
    }

    fn primary_volume(&self) -> VolumeId {
        VolumeId::new("C:\\")
    }
}

fn classify(err: &windows::core::Error) -> VolumeError {
    let code = err.code();
    if code == ERROR_ACCESS_DENIED.to_hresult() {
        VolumeError::AccessDenied
    } else if code == ERROR_NOT_READY.to_hresult() {
        VolumeError::NotReady
    } else {
        VolumeError::Unknown {
            code: code.0,
            message: err.message().to_string(),
        }
    }
}
