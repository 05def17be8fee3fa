// Dual-hand state aggregator
//
// Per-frame coordinator: assigns roles, extracts features, smooths them,
// and publishes the frame's authoritative GestureState. Owns the
// SmoothingFilter, so filter seeds survive frames where a hand drops out.

use log::debug;

use crate::config::CameraSettings;
use crate::error::log_gesture_error;
use crate::gesture::handedness::HandRole;
use crate::gesture::landmarks::{landmark_index, HandFeatures};
use crate::gesture::smoothing::{HandFeature, SmoothKey, SmoothingFilter};
use crate::gesture::state::{GestureState, RawHand};

/// GestureAggregator combines per-hand features into frame-level state
///
/// Processing order per frame:
/// 1. Reset detected flags (previous frame's hands are cleared)
/// 2. For each detected hand: role assignment, feature extraction, smoothing
/// 3. When both roles are present, compute and smooth the wrist distance
///
/// A hand whose landmark list is malformed is skipped for the frame; the
/// pipeline continues with whatever else was detected.
pub struct GestureAggregator {
    filter: SmoothingFilter,
    flip_horizontal: bool,
    state: GestureState,
}

impl GestureAggregator {
    pub fn new(settings: &CameraSettings) -> Self {
        Self {
            filter: SmoothingFilter::new(settings.smooth_landmarks),
            flip_horizontal: settings.flip_horizontal,
            state: GestureState::default(),
        }
    }

    /// Process one frame's detected hands and return the updated state
    pub fn process_frame(&mut self, hands: &[RawHand]) -> &GestureState {
        self.state.left.detected = false;
        self.state.right.detected = false;
        self.state.both_hands_detected = false;

        for hand in hands {
            let role = HandRole::from_raw(hand.handedness, self.flip_horizontal);

            let features = match HandFeatures::extract(&hand.landmarks) {
                Ok(features) => features,
                Err(err) => {
                    log_gesture_error(&err, "process_frame");
                    continue;
                }
            };

            let thumb_index = self.filter.smooth(
                SmoothKey::Hand {
                    role,
                    feature: HandFeature::ThumbIndexDistance,
                },
                features.thumb_index_distance,
            );
            let x_position = self.filter.smooth(
                SmoothKey::Hand {
                    role,
                    feature: HandFeature::XPosition,
                },
                features.wrist_x,
            );
            let y_position = self.filter.smooth(
                SmoothKey::Hand {
                    role,
                    feature: HandFeature::YPosition,
                },
                features.wrist_y,
            );

            let hand_state = self.state.hand_mut(role);
            hand_state.landmarks = Some(hand.landmarks.clone());
            hand_state.thumb_index_distance = thumb_index;
            hand_state.x_position = x_position;
            hand_state.y_position = y_position;
            hand_state.detected = true;

            debug!(
                "{} hand: thumb-index={:.3} pos=({:.3},{:.3})",
                role.name(),
                thumb_index,
                x_position,
                y_position
            );
        }

        if self.state.left.detected && self.state.right.detected {
            // Distance comes from the raw wrist landmarks and is smoothed
            // under its own key, independent of the per-hand positions
            let left_wrist = self.state.left.landmarks.as_ref().map(|l| l[landmark_index::WRIST]);
            let right_wrist = self.state.right.landmarks.as_ref().map(|l| l[landmark_index::WRIST]);

            if let (Some(left), Some(right)) = (left_wrist, right_wrist) {
                let distance = left.distance(&right);
                self.state.hands_distance =
                    self.filter.smooth(SmoothKey::HandsDistance, distance);
                self.state.both_hands_detected = true;
            }
        }

        &self.state
    }

    /// Current frame state
    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Clear frame state and all smoothing seeds
    pub fn reset(&mut self) {
        self.filter.reset();
        self.state = GestureState::default();
    }
}
