// Temporal smoothing filter
//
// Keyed exponential moving average over per-frame feature values. The first
// observation for a key seeds the filter and passes through unchanged; each
// later observation is blended with 80% weight on history:
//
//   smoothed = previous * FACTOR + value * (1 - FACTOR)
//
// Keys are never evicted. The key set is small and bounded (two hands x
// three features + one cross-hand distance), so the map stays tiny for the
// lifetime of a session. Seeds persist while a hand is undetected and
// resume blending on the next detected frame.

use std::collections::HashMap;

use crate::gesture::handedness::HandRole;

/// Weight given to the historical value in the moving average
pub const SMOOTHING_FACTOR: f32 = 0.8;

/// Per-hand feature identity for smoothing keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandFeature {
    ThumbIndexDistance,
    XPosition,
    YPosition,
}

/// Identity of a smoothed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmoothKey {
    /// A feature of one hand role
    Hand { role: HandRole, feature: HandFeature },
    /// The cross-hand wrist distance
    HandsDistance,
}

/// Stateful exponential smoother keyed by (role, feature)
pub struct SmoothingFilter {
    enabled: bool,
    previous: HashMap<SmoothKey, f32>,
}

impl SmoothingFilter {
    /// Create a filter; `enabled` mirrors the `smooth_landmarks` setting.
    /// When disabled, values pass through unmodified and unrecorded.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            previous: HashMap::new(),
        }
    }

    /// Smooth a value under a key
    ///
    /// First call for a key returns the value unchanged and seeds the
    /// filter state; later calls blend against the stored history.
    pub fn smooth(&mut self, key: SmoothKey, value: f32) -> f32 {
        if !self.enabled {
            return value;
        }

        match self.previous.get(&key).copied() {
            None => {
                self.previous.insert(key, value);
                value
            }
            Some(prev) => {
                let smoothed = prev * SMOOTHING_FACTOR + value * (1.0 - SMOOTHING_FACTOR);
                self.previous.insert(key, smoothed);
                smoothed
            }
        }
    }

    /// Drop all filter state; the next value for each key reseeds it
    pub fn reset(&mut self) {
        self.previous.clear();
    }

    /// Number of keys currently tracked
    pub fn tracked_keys(&self) -> usize {
        self.previous.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: SmoothKey = SmoothKey::Hand {
        role: HandRole::Left,
        feature: HandFeature::ThumbIndexDistance,
    };

    #[test]
    fn test_first_value_seeds_filter() {
        let mut filter = SmoothingFilter::new(true);
        assert_eq!(filter.smooth(KEY, 0.42), 0.42);
        assert_eq!(filter.tracked_keys(), 1);
    }

    #[test]
    fn test_ema_formula() {
        let mut filter = SmoothingFilter::new(true);
        filter.smooth(KEY, 1.0);
        let second = filter.smooth(KEY, 0.0);
        assert!((second - 0.8).abs() < 1e-6, "expected 0.8, got {}", second);
        let third = filter.smooth(KEY, 0.0);
        assert!((third - 0.64).abs() < 1e-6, "expected 0.64, got {}", third);
    }

    #[test]
    fn test_converges_to_constant_input() {
        let mut filter = SmoothingFilter::new(true);
        filter.smooth(KEY, 0.0);
        let mut value = 0.0;
        for _ in 0..60 {
            value = filter.smooth(KEY, 1.0);
        }
        assert!(
            (value - 1.0).abs() < 1e-4,
            "filter should converge to the constant input, got {}",
            value
        );
    }

    #[test]
    fn test_keys_are_independent() {
        let other = SmoothKey::Hand {
            role: HandRole::Right,
            feature: HandFeature::ThumbIndexDistance,
        };
        let mut filter = SmoothingFilter::new(true);
        filter.smooth(KEY, 1.0);
        // A fresh key seeds independently of the existing one
        assert_eq!(filter.smooth(other, 5.0), 5.0);
        assert_eq!(filter.tracked_keys(), 2);
    }

    #[test]
    fn test_disabled_filter_passes_through_unrecorded() {
        let mut filter = SmoothingFilter::new(false);
        assert_eq!(filter.smooth(KEY, 1.0), 1.0);
        assert_eq!(filter.smooth(KEY, 0.0), 0.0);
        assert_eq!(filter.tracked_keys(), 0);
    }

    #[test]
    fn test_reset_reseeds() {
        let mut filter = SmoothingFilter::new(true);
        filter.smooth(KEY, 1.0);
        filter.smooth(KEY, 0.0);
        filter.reset();
        assert_eq!(filter.smooth(KEY, 0.5), 0.5, "first value after reset seeds again");
    }
}
