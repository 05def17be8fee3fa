// Landmark feature extraction
//
// Pure per-hand computation: a 21-point landmark list in, named scalar
// features out. No state, no side effects; the temporal smoothing lives
// in the aggregator, not here.

use serde::{Deserialize, Serialize};

use crate::error::GestureError;

/// Hand landmark indices (MediaPipe hand landmark model convention)
#[allow(dead_code)]
pub mod landmark_index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Minimum landmark count required for feature extraction
///
/// The highest index the extractor touches is INDEX_FINGER_TIP (8), so
/// shorter lists cannot be processed.
pub const MIN_LANDMARKS: usize = landmark_index::INDEX_FINGER_TIP + 1;

/// A single hand landmark in normalized image coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// X coordinate (0.0 to 1.0, normalized to image width)
    pub x: f32,
    /// Y coordinate (0.0 to 1.0, normalized to image height)
    pub y: f32,
    /// Z coordinate (depth, relative to wrist)
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// 3-D Euclidean distance to another landmark
    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

/// Named scalar features extracted from one detected hand
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandFeatures {
    /// Distance between thumb tip and index finger tip
    pub thumb_index_distance: f32,
    /// Wrist x position
    pub wrist_x: f32,
    /// Wrist y position
    pub wrist_y: f32,
}

impl HandFeatures {
    /// Extract features from a landmark list
    ///
    /// # Arguments
    /// * `landmarks` - Hand landmarks, normally 21 points
    ///
    /// # Returns
    /// * `Ok(HandFeatures)` - Extracted features
    /// * `Err(GestureError::MalformedLandmarks)` - Fewer than MIN_LANDMARKS
    ///   points were supplied
    pub fn extract(landmarks: &[Landmark]) -> Result<Self, GestureError> {
        if landmarks.len() < MIN_LANDMARKS {
            return Err(GestureError::MalformedLandmarks {
                count: landmarks.len(),
            });
        }

        let thumb_tip = &landmarks[landmark_index::THUMB_TIP];
        let index_tip = &landmarks[landmark_index::INDEX_FINGER_TIP];
        let wrist = &landmarks[landmark_index::WRIST];

        Ok(Self {
            thumb_index_distance: thumb_tip.distance(index_tip),
            wrist_x: wrist.x,
            wrist_y: wrist.y,
        })
    }
}
