// Error types for the gesture-to-MIDI pipeline
//
// This module defines custom error types for camera, gesture, and MIDI
// operations, providing structured error handling with numeric codes for
// consistent reporting across library, CLI, and telemetry surfaces.

mod camera;
mod gesture;
mod midi;

pub use camera::{log_camera_error, CameraError};
pub use gesture::{log_gesture_error, GestureError};
pub use midi::{log_midi_error, MidiError};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// logging and CLI surfaces.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
