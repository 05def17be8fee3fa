// Camera acquisition error types
//
// Error code range: 2001-2005

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Log a camera error with structured context
///
/// Logs camera errors with the numeric error code, the component, and the
/// human-readable message. Non-blocking, never panics.
pub fn log_camera_error(err: &CameraError, context: &str) {
    error!(
        "Camera error in {}: code={}, component=CameraManager, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Camera acquisition errors
///
/// These cover device enumeration, opening, the one-frame read test, and
/// per-frame reads during a running session. A camera error at session
/// startup is fatal to the session; the documented fallback scan is the
/// only automatic retry.
#[derive(Debug, Clone, PartialEq)]
pub enum CameraError {
    /// No capture device could be opened after the full fallback scan
    NoCameraAvailable,

    /// A specific device id failed to open
    OpenFailed { id: i32, reason: String },

    /// A device opened but failed the one-frame read test
    ReadTestFailed { id: i32 },

    /// A frame read failed while the pipeline was running
    FrameReadFailure,

    /// Backend-level failure (driver or capture library)
    Backend { details: String },
}

impl ErrorCode for CameraError {
    fn code(&self) -> i32 {
        match self {
            CameraError::NoCameraAvailable => 2001,
            CameraError::OpenFailed { .. } => 2002,
            CameraError::ReadTestFailed { .. } => 2003,
            CameraError::FrameReadFailure => 2004,
            CameraError::Backend { .. } => 2005,
        }
    }

    fn message(&self) -> String {
        match self {
            CameraError::NoCameraAvailable => {
                "No usable capture device found after scanning ids 0-9".to_string()
            }
            CameraError::OpenFailed { id, reason } => {
                format!("Failed to open camera id {}: {}", id, reason)
            }
            CameraError::ReadTestFailed { id } => {
                format!("Camera id {} opened but failed the read test", id)
            }
            CameraError::FrameReadFailure => {
                "Frame read failed; stopping the pipeline".to_string()
            }
            CameraError::Backend { details } => {
                format!("Capture backend error: {}", details)
            }
        }
    }
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CameraError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for CameraError {}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Backend {
            details: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_error_codes() {
        assert_eq!(CameraError::NoCameraAvailable.code(), 2001);
        assert_eq!(
            CameraError::OpenFailed {
                id: 0,
                reason: "test".to_string()
            }
            .code(),
            2002
        );
        assert_eq!(CameraError::ReadTestFailed { id: 1 }.code(), 2003);
        assert_eq!(CameraError::FrameReadFailure.code(), 2004);
        assert_eq!(
            CameraError::Backend {
                details: "test".to_string()
            }
            .code(),
            2005
        );
    }

    #[test]
    fn test_camera_error_messages() {
        let err = CameraError::OpenFailed {
            id: 3,
            reason: "busy".to_string(),
        };
        assert_eq!(err.message(), "Failed to open camera id 3: busy");

        let err = CameraError::ReadTestFailed { id: 2 };
        assert!(err.message().contains("read test"));
    }

    #[test]
    fn test_camera_error_display() {
        let err = CameraError::NoCameraAvailable;
        let display = format!("{}", err);
        assert!(display.contains("CameraError"));
        assert!(display.contains(&err.code().to_string()));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::other("device disconnected");
        let cam_err: CameraError = io_err.into();
        match cam_err {
            CameraError::Backend { details } => {
                assert!(details.contains("device disconnected"));
            }
            _ => panic!("Expected Backend"),
        }
    }
}
