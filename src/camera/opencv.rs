//! OpenCV-backed capture devices (feature = "camera")
//!
//! Wraps `opencv::videoio::VideoCapture` behind the `DeviceProbe` /
//! `CaptureDevice` seam. Resolution is applied at open time; the device
//! holds the handle exclusively until released.

use log::warn;
use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::config::CameraSettings;
use crate::error::CameraError;

use super::{CaptureDevice, DeviceProbe};

/// A VideoCapture handle opened on a specific device id
pub struct OpencvDevice {
    capture: VideoCapture,
    id: i32,
    released: bool,
}

impl OpencvDevice {
    pub fn id(&self) -> i32 {
        self.id
    }

    /// Read one frame for processing
    pub fn read_frame(&mut self) -> Result<Mat, CameraError> {
        let mut frame = Mat::default();
        let ok = self
            .capture
            .read(&mut frame)
            .map_err(|err| CameraError::Backend {
                details: err.to_string(),
            })?;
        if !ok || frame.empty() {
            return Err(CameraError::FrameReadFailure);
        }
        Ok(frame)
    }
}

impl CaptureDevice for OpencvDevice {
    fn read_test(&mut self) -> Result<(), CameraError> {
        self.read_frame()
            .map(|_| ())
            .map_err(|_| CameraError::ReadTestFailed { id: self.id })
    }

    fn backend_name(&self) -> Option<String> {
        self.capture.get_backend_name().ok()
    }

    fn release(&mut self) {
        if !self.released {
            if let Err(err) = self.capture.release() {
                warn!("[Camera] Release of id {} reported: {}", self.id, err);
            }
            self.released = true;
        }
    }
}

impl Drop for OpencvDevice {
    fn drop(&mut self) {
        self.release();
    }
}

/// Probe opening real devices through OpenCV
#[derive(Default)]
pub struct OpencvProbe;

impl DeviceProbe for OpencvProbe {
    type Device = OpencvDevice;

    fn open(&self, id: i32, settings: &CameraSettings) -> Result<OpencvDevice, CameraError> {
        let mut capture =
            VideoCapture::new(id, videoio::CAP_ANY).map_err(|err| CameraError::OpenFailed {
                id,
                reason: err.to_string(),
            })?;

        let opened = capture.is_opened().map_err(|err| CameraError::Backend {
            details: err.to_string(),
        })?;
        if !opened {
            return Err(CameraError::OpenFailed {
                id,
                reason: "device did not open".to_string(),
            });
        }

        // Resolution is best-effort; drivers silently clamp unsupported sizes
        let _ = capture.set(videoio::CAP_PROP_FRAME_WIDTH, settings.width as f64);
        let _ = capture.set(videoio::CAP_PROP_FRAME_HEIGHT, settings.height as f64);

        Ok(OpencvDevice {
            capture,
            id,
            released: false,
        })
    }
}
