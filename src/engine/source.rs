//! Observation sources for the loop driver
//!
//! An observation is one frame's worth of detected hands. Consumers don't
//! need to know whether observations came from a real camera + detector or
//! from a scripted fixture; both sides of the seam implement
//! [`ObservationSource`].

use std::collections::VecDeque;

use crate::error::CameraError;
use crate::gesture::RawHand;

/// One frame's detector output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameObservation {
    pub hands: Vec<RawHand>,
}

impl FrameObservation {
    pub fn new(hands: Vec<RawHand>) -> Self {
        Self { hands }
    }
}

/// Anything that can deliver per-frame observations to the loop driver
pub trait ObservationSource {
    /// Block until the next observation is available
    ///
    /// # Returns
    /// * `Ok(Some(observation))` - A frame was acquired and detected
    /// * `Ok(None)` - The source is exhausted (scripted input ran out)
    /// * `Err(CameraError)` - The frame read failed; the driver stops
    fn next_observation(&mut self) -> Result<Option<FrameObservation>, CameraError>;

    /// Release underlying resources; must be idempotent
    fn release(&mut self);

    /// Resolved capture device id, when the source has one
    fn camera_id(&self) -> Option<i32> {
        None
    }

    /// Total frames dropped or discarded so far by the source, when it
    /// buffers internally (split-capture mode)
    fn dropped_frames(&self) -> u64 {
        0
    }
}

/// A step in a scripted source
#[derive(Debug, Clone)]
enum ScriptedStep {
    Frame(FrameObservation),
    ReadFailure,
}

/// Deterministic observation source for tests and offline runs
///
/// Plays back a fixed sequence of observations, then reports exhaustion.
/// A read failure can be scripted at any position to exercise the
/// driver's error path.
pub struct ScriptedSource {
    steps: VecDeque<ScriptedStep>,
    released: bool,
}

impl ScriptedSource {
    /// Source that yields each frame's hands in order
    pub fn new(frames: Vec<Vec<RawHand>>) -> Self {
        Self {
            steps: frames
                .into_iter()
                .map(|hands| ScriptedStep::Frame(FrameObservation::new(hands)))
                .collect(),
            released: false,
        }
    }

    /// Append a scripted read failure after the existing frames
    pub fn then_read_failure(mut self) -> Self {
        self.steps.push_back(ScriptedStep::ReadFailure);
        self
    }

    pub fn was_released(&self) -> bool {
        self.released
    }
}

impl ObservationSource for ScriptedSource {
    fn next_observation(&mut self) -> Result<Option<FrameObservation>, CameraError> {
        match self.steps.pop_front() {
            Some(ScriptedStep::Frame(observation)) => Ok(Some(observation)),
            Some(ScriptedStep::ReadFailure) => Err(CameraError::FrameReadFailure),
            None => Ok(None),
        }
    }

    fn release(&mut self) {
        self.released = true;
    }
}

#[cfg(feature = "camera")]
pub use camera_source::{CameraSource, HandDetector};

#[cfg(feature = "camera")]
mod camera_source {
    use log::warn;
    use opencv::core::{self, Mat};

    use super::{FrameObservation, ObservationSource};
    use crate::camera::opencv::{OpencvDevice, OpencvProbe};
    use crate::camera::CameraManager;
    use crate::config::CameraSettings;
    use crate::error::CameraError;
    use crate::gesture::RawHand;

    /// External vision collaborator: turns a captured frame into zero or
    /// more detected hands, each a raw handedness label plus 21 landmarks
    pub trait HandDetector: Send {
        fn detect(&mut self, frame: &Mat) -> Vec<RawHand>;
    }

    /// Live observation source: camera acquisition composed with an
    /// external hand detector
    pub struct CameraSource {
        manager: CameraManager<OpencvProbe>,
        detector: Box<dyn HandDetector>,
        flip_horizontal: bool,
    }

    impl CameraSource {
        /// Open a capture device per the fallback policy and wire it to
        /// the detector
        pub fn open(
            settings: CameraSettings,
            detector: Box<dyn HandDetector>,
        ) -> Result<Self, CameraError> {
            let flip_horizontal = settings.flip_horizontal;
            let mut manager = CameraManager::new(OpencvProbe, settings);
            manager.open()?;
            Ok(Self {
                manager,
                detector,
                flip_horizontal,
            })
        }
    }

    impl ObservationSource for CameraSource {
        fn next_observation(&mut self) -> Result<Option<FrameObservation>, CameraError> {
            let device: &mut OpencvDevice = self
                .manager
                .device_mut()
                .ok_or(CameraError::FrameReadFailure)?;
            let frame = device.read_frame()?;

            // Mirror before detection so the detector labels hands the way
            // the user sees them; role assignment inverts the labels back
            let frame = if self.flip_horizontal {
                let mut flipped = Mat::default();
                match core::flip(&frame, &mut flipped, 1) {
                    Ok(()) => flipped,
                    Err(err) => {
                        warn!("[Camera] Horizontal flip failed: {}", err);
                        frame
                    }
                }
            } else {
                frame
            };

            let hands = self.detector.detect(&frame);
            Ok(Some(FrameObservation::new(hands)))
        }

        fn release(&mut self) {
            self.manager.release();
        }

        fn camera_id(&self) -> Option<i32> {
            Some(self.manager.settings().camera_id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{Landmark, RawHand, RawHandedness};

    fn one_hand() -> Vec<RawHand> {
        vec![RawHand::new(
            RawHandedness::Left,
            vec![Landmark::default(); 21],
        )]
    }

    #[test]
    fn test_scripted_source_plays_frames_then_exhausts() {
        let mut source = ScriptedSource::new(vec![one_hand(), vec![]]);

        let first = source.next_observation().unwrap().unwrap();
        assert_eq!(first.hands.len(), 1);

        let second = source.next_observation().unwrap().unwrap();
        assert!(second.hands.is_empty());

        assert!(source.next_observation().unwrap().is_none());
    }

    #[test]
    fn test_scripted_read_failure() {
        let mut source = ScriptedSource::new(vec![one_hand()]).then_read_failure();

        assert!(source.next_observation().unwrap().is_some());
        match source.next_observation() {
            Err(CameraError::FrameReadFailure) => {}
            other => panic!("Expected FrameReadFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_release_marks_source() {
        let mut source = ScriptedSource::new(vec![]);
        assert!(!source.was_released());
        source.release();
        assert!(source.was_released());
    }
}
