// Gesture processing error types
//
// Error code range: 2101-2102

use crate::error::ErrorCode;
use log::warn;
use std::fmt;

/// Log a gesture error with structured context
///
/// Gesture errors are per-frame and recoverable (the offending hand is
/// skipped for the frame), so they log at warn level rather than error.
pub fn log_gesture_error(err: &GestureError, context: &str) {
    warn!(
        "Gesture error in {}: code={}, component=GestureAggregator, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Gesture processing errors
///
/// All variants are recovered locally: the hand update is skipped for the
/// current frame and the pipeline continues.
#[derive(Debug, Clone, PartialEq)]
pub enum GestureError {
    /// The detector supplied fewer landmarks than feature extraction needs
    MalformedLandmarks { count: usize },

    /// The detector supplied a handedness label other than Left/Right
    UnknownHandedness { label: String },
}

impl ErrorCode for GestureError {
    fn code(&self) -> i32 {
        match self {
            GestureError::MalformedLandmarks { .. } => 2101,
            GestureError::UnknownHandedness { .. } => 2102,
        }
    }

    fn message(&self) -> String {
        match self {
            GestureError::MalformedLandmarks { count } => {
                format!(
                    "Hand landmark list too short for feature extraction (got {} points)",
                    count
                )
            }
            GestureError::UnknownHandedness { label } => {
                format!("Unrecognized handedness label: {:?}", label)
            }
        }
    }
}

impl fmt::Display for GestureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GestureError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for GestureError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_error_codes() {
        assert_eq!(GestureError::MalformedLandmarks { count: 3 }.code(), 2101);
        assert_eq!(
            GestureError::UnknownHandedness {
                label: "Middle".to_string()
            }
            .code(),
            2102
        );
    }

    #[test]
    fn test_gesture_error_messages() {
        let err = GestureError::MalformedLandmarks { count: 3 };
        assert!(err.message().contains("3 points"));

        let err = GestureError::UnknownHandedness {
            label: "Middle".to_string(),
        };
        assert!(err.message().contains("Middle"));
    }
}
