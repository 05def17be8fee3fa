// MIDI generation error types
//
// Error code range: 2201-2203
//
// Invalid rhythm tokens and unknown pitch names are deliberately NOT error
// values: they are counted diagnostics on the parse/generation results, so
// callers can distinguish "defaulted" from "as-specified" without the run
// aborting.

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Log a MIDI error with structured context
pub fn log_midi_error(err: &MidiError, context: &str) {
    error!(
        "MIDI error in {}: code={}, component=MidiGenerator, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// MIDI generation errors
#[derive(Debug, Clone, PartialEq)]
pub enum MidiError {
    /// Preset tempo is zero, negative, or not finite
    InvalidTempo { tempo: f32 },

    /// Timeline contains no events (every note was skipped)
    EmptyTimeline,

    /// Writing the MIDI bytes or file failed
    WriteFailed { reason: String },
}

impl ErrorCode for MidiError {
    fn code(&self) -> i32 {
        match self {
            MidiError::InvalidTempo { .. } => 2201,
            MidiError::EmptyTimeline => 2202,
            MidiError::WriteFailed { .. } => 2203,
        }
    }

    fn message(&self) -> String {
        match self {
            MidiError::InvalidTempo { tempo } => {
                format!("Tempo must be a positive number of BPM (got {})", tempo)
            }
            MidiError::EmptyTimeline => {
                "Timeline contains no events; every note was skipped".to_string()
            }
            MidiError::WriteFailed { reason } => {
                format!("Failed to write MIDI output: {}", reason)
            }
        }
    }
}

impl fmt::Display for MidiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MidiError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for MidiError {}

impl From<std::io::Error> for MidiError {
    fn from(err: std::io::Error) -> Self {
        MidiError::WriteFailed {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midi_error_codes() {
        assert_eq!(MidiError::InvalidTempo { tempo: 0.0 }.code(), 2201);
        assert_eq!(MidiError::EmptyTimeline.code(), 2202);
        assert_eq!(
            MidiError::WriteFailed {
                reason: "test".to_string()
            }
            .code(),
            2203
        );
    }

    #[test]
    fn test_midi_error_messages() {
        let err = MidiError::InvalidTempo { tempo: -10.0 };
        assert!(err.message().contains("-10"));

        let err = MidiError::WriteFailed {
            reason: "disk full".to_string(),
        };
        assert_eq!(err.message(), "Failed to write MIDI output: disk full");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::other("permission denied");
        let midi_err: MidiError = io_err.into();
        match midi_err {
            MidiError::WriteFailed { reason } => {
                assert!(reason.contains("permission denied"));
            }
            _ => panic!("Expected WriteFailed"),
        }
    }
}
