//! Error types shared across the core.
use std::path::PathBuf;
use thiserror::Error;

/// Why a volume's capacity (or the volume list) could not be read.
///
/// Each class maps to its own operator-facing advice line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VolumeError {
    #[error("access denied")]
    AccessDenied,

    #[error("device not ready")]
    NotReady,

    #[error("error {code}: {message}")]
    Unknown { code: i32, message: String },
}

impl VolumeError {
    /// The advice printed under the raw error for this class.
    pub fn advice(&self) -> &'static str {
        match self {
            Self::AccessDenied => "Access denied. Try running the program as an administrator.",
            Self::NotReady => "The drive is not ready.",
            Self::Unknown { .. } => "Unknown error.",
        }
    }
}

/// A single filesystem entry that could not be read during a walk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error accessing {}: {message}", .path.display())]
pub struct AccessError {
    pub path: PathBuf,
    pub message: String,
}

impl AccessError {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn from_io(path: impl Into<PathBuf>, err: &std::io::Error) -> Self {
        Self::new(path, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advice_per_class() {
        assert_eq!(
            VolumeError::AccessDenied.advice(),
            "Access denied. Try running the program as an administrator."
        );
        assert_eq!(VolumeError::NotReady.advice(), "The drive is not ready.");
        let unknown = VolumeError::Unknown {
            code: 87,
            message: "The parameter is incorrect.".into(),
        };
        assert_eq!(unknown.advice(), "Unknown error.");
        assert_eq!(unknown.to_string(), "error 87: The parameter is incorrect.");
    }

    #[test]
    fn test_access_error_display() {
        let err = AccessError::new("/root/secret", "Permission denied (os error 13)");
        assert_eq!(
            err.to_string(),
            "Error accessing /root/secret: Permission denied (os error 13)"
        );
    }
}
