// Frame-level gesture state types
//
// HandState and GestureState are overwritten every frame by the aggregator.
// Smoothing history lives in the SmoothingFilter, not here; an undetected
// hand keeps its filter seed but its HandState reads detected=false.

use serde::{Deserialize, Serialize};

use crate::gesture::handedness::{HandRole, RawHandedness};
use crate::gesture::landmarks::Landmark;

/// One detected hand as delivered by the external vision detector:
/// a raw handedness label plus the landmark list (normally 21 points).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawHand {
    pub handedness: RawHandedness,
    pub landmarks: Vec<Landmark>,
}

impl RawHand {
    pub fn new(handedness: RawHandedness, landmarks: Vec<Landmark>) -> Self {
        Self {
            handedness,
            landmarks,
        }
    }
}

/// Per-role hand state for the current frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandState {
    /// Raw landmarks for the frame, absent when not detected
    pub landmarks: Option<Vec<Landmark>>,
    /// Smoothed thumb tip to index tip distance
    pub thumb_index_distance: f32,
    /// Smoothed wrist x position
    pub x_position: f32,
    /// Smoothed wrist y position
    pub y_position: f32,
    /// Whether this role was detected in the current frame
    pub detected: bool,
}

/// Authoritative gesture state for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureState {
    pub left: HandState,
    pub right: HandState,
    /// Smoothed wrist-to-wrist distance; only valid when
    /// `both_hands_detected` is true
    pub hands_distance: f32,
    pub both_hands_detected: bool,
}

impl GestureState {
    pub fn hand(&self, role: HandRole) -> &HandState {
        match role {
            HandRole::Left => &self.left,
            HandRole::Right => &self.right,
        }
    }

    pub fn hand_mut(&mut self, role: HandRole) -> &mut HandState {
        match role {
            HandRole::Left => &mut self.left,
            HandRole::Right => &mut self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_has_nothing_detected() {
        let state = GestureState::default();
        assert!(!state.left.detected);
        assert!(!state.right.detected);
        assert!(!state.both_hands_detected);
        assert!(state.left.landmarks.is_none());
    }

    #[test]
    fn test_hand_accessor_matches_role() {
        let mut state = GestureState::default();
        state.hand_mut(HandRole::Right).detected = true;
        assert!(state.hand(HandRole::Right).detected);
        assert!(!state.hand(HandRole::Left).detected);
    }

    #[test]
    fn test_state_json_roundtrip() {
        let mut state = GestureState::default();
        state.left.detected = true;
        state.left.thumb_index_distance = 0.12;
        let json = serde_json::to_string(&state).unwrap();
        let parsed: GestureState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
