//! Camera acquisition manager
//!
//! Device resolution policy over a probe seam:
//!
//! - `camera_id == -1` auto-detects: scan ids 0..=9 for a device whose
//!   backend reports a built-in name, else take the first device that
//!   opens, else fail.
//! - A configured id that fails to open or fails the one-frame read test
//!   triggers a fallback scan across all probe-able ids (skipping the
//!   failed one) until one passes the read test.
//! - The winning id is recorded back into the settings so callers can see
//!   which device the session actually runs on.
//!
//! The `DeviceProbe`/`CaptureDevice` traits keep the policy deterministic
//! under test; the real opencv-backed probe lives behind the `camera`
//! feature.

use log::{info, warn};

use crate::config::CameraSettings;
use crate::error::{log_camera_error, CameraError};

#[cfg(feature = "camera")]
pub mod opencv;

/// Sentinel camera id meaning "auto-detect the default device"
pub const AUTO_DETECT_ID: i32 = -1;

/// Device ids considered during enumeration scans
pub const PROBE_IDS: std::ops::RangeInclusive<i32> = 0..=9;

/// Backend name fragments identifying a built-in webcam
const BUILT_IN_NAMES: [&str; 2] = ["FaceTime", "Built-in"];

/// An opened capture device
pub trait CaptureDevice {
    /// Read and discard a single frame to verify the device delivers data
    fn read_test(&mut self) -> Result<(), CameraError>;

    /// Capture backend name, when the platform reports one
    fn backend_name(&self) -> Option<String>;

    /// Release the underlying handle; must be idempotent
    fn release(&mut self);
}

/// Opens capture devices by id
pub trait DeviceProbe {
    type Device: CaptureDevice;

    fn open(&self, id: i32, settings: &CameraSettings) -> Result<Self::Device, CameraError>;
}

/// Holds the exclusive device handle for a camera session
pub struct CameraManager<P: DeviceProbe> {
    probe: P,
    settings: CameraSettings,
    device: Option<P::Device>,
}

impl<P: DeviceProbe> CameraManager<P> {
    pub fn new(probe: P, settings: CameraSettings) -> Self {
        Self {
            probe,
            settings,
            device: None,
        }
    }

    /// Settings, including the resolved camera id after a successful open
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn is_open(&self) -> bool {
        self.device.is_some()
    }

    /// The opened device, for frame reads
    pub fn device_mut(&mut self) -> Option<&mut P::Device> {
        self.device.as_mut()
    }

    /// Open a capture device according to the fallback policy
    ///
    /// # Returns
    /// * `Ok(())` - A device passed the read test and is held by the manager
    /// * `Err(CameraError::NoCameraAvailable)` - Nothing usable was found
    pub fn open(&mut self) -> Result<(), CameraError> {
        let configured = self.settings.camera_id;
        let resolved = if configured == AUTO_DETECT_ID {
            let id = self.resolve_default_id()?;
            info!("[Camera] Auto-detected camera id {}", id);
            id
        } else {
            configured
        };

        match Self::open_and_test(&self.probe, resolved, &self.settings) {
            Ok(device) => {
                info!("[Camera] Using camera id {}", resolved);
                self.settings.camera_id = resolved;
                self.device = Some(device);
                return Ok(());
            }
            Err(err) => {
                log_camera_error(&err, "open");
                warn!(
                    "[Camera] Camera id {} unusable, scanning for a fallback device",
                    resolved
                );
            }
        }

        for id in PROBE_IDS {
            if id == resolved {
                continue;
            }
            match Self::open_and_test(&self.probe, id, &self.settings) {
                Ok(device) => {
                    info!("[Camera] Falling back to camera id {}", id);
                    self.settings.camera_id = id;
                    self.device = Some(device);
                    return Ok(());
                }
                Err(_) => continue,
            }
        }

        let err = CameraError::NoCameraAvailable;
        log_camera_error(&err, "open");
        Err(err)
    }

    /// Release the device handle
    ///
    /// Idempotent and safe to call when nothing was ever opened.
    pub fn release(&mut self) {
        if let Some(mut device) = self.device.take() {
            device.release();
            info!("[Camera] Released camera id {}", self.settings.camera_id);
        }
    }

    fn open_and_test(
        probe: &P,
        id: i32,
        settings: &CameraSettings,
    ) -> Result<P::Device, CameraError> {
        let mut device = probe.open(id, settings)?;
        if let Err(err) = device.read_test() {
            device.release();
            return Err(err);
        }
        Ok(device)
    }

    /// Pick the default device: prefer a built-in backend name, else the
    /// first id that opens at all.
    fn resolve_default_id(&self) -> Result<i32, CameraError> {
        let mut first_open: Option<i32> = None;

        for id in PROBE_IDS {
            match self.probe.open(id, &self.settings) {
                Ok(mut device) => {
                    let name = device.backend_name();
                    device.release();

                    if let Some(name) = &name {
                        if BUILT_IN_NAMES.iter().any(|built_in| name.contains(built_in)) {
                            return Ok(id);
                        }
                    }
                    first_open.get_or_insert(id);
                }
                Err(_) => continue,
            }
        }

        first_open.ok_or(CameraError::NoCameraAvailable)
    }
}

impl<P: DeviceProbe> Drop for CameraManager<P> {
    fn drop(&mut self) {
        self.release();
    }
}
