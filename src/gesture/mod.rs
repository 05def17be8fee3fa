// Gesture pipeline - per-frame hand feature extraction and aggregation
//
// This module turns raw per-hand landmark lists from the external vision
// detector into a smoothed, role-assigned GestureState for each frame.
//
// Module organization:
// - landmarks: Landmark type, landmark indices, pure feature extraction
// - smoothing: keyed exponential moving average filter
// - handedness: raw detector label + mirroring -> canonical hand role
// - state: HandState / GestureState frame types
// - aggregator: per-frame coordinator owning the smoothing state

mod aggregator;
mod handedness;
mod landmarks;
mod smoothing;
mod state;

pub use aggregator::GestureAggregator;
pub use handedness::{HandRole, RawHandedness};
pub use landmarks::{landmark_index, HandFeatures, Landmark, MIN_LANDMARKS};
pub use smoothing::{HandFeature, SmoothKey, SmoothingFilter, SMOOTHING_FACTOR};
pub use state::{GestureState, HandState, RawHand};
