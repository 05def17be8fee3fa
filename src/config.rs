//! Configuration management for the gesture pipeline
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling tuning without recompilation. Camera selection, capture
//! resolution, detector thresholds, and smoothing can all be adjusted
//! via the config file or overridden explicitly at initialization.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub camera: CameraSettings,
    pub midi: MidiConfig,
}

/// Camera acquisition and hand detection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Capture device id; -1 means auto-detect the default device
    pub camera_id: i32,
    /// Capture width in pixels
    pub width: u32,
    /// Capture height in pixels
    pub height: u32,
    /// Mirror the preview horizontally (inverts left/right role assignment)
    pub flip_horizontal: bool,
    /// Minimum confidence for a hand to be reported by the detector
    pub min_detection_confidence: f32,
    /// Minimum confidence for a hand to keep being tracked across frames
    pub min_tracking_confidence: f32,
    /// Maximum number of simultaneously tracked hands
    pub max_hands: u32,
    /// Apply exponential smoothing to extracted features
    pub smooth_landmarks: bool,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            camera_id: -1,
            width: 640,
            height: 480,
            flip_horizontal: true,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.5,
            max_hands: 2,
            smooth_landmarks: true,
        }
    }
}

/// MIDI generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MidiConfig {
    /// Symbolic time resolution for the persisted MIDI format
    pub ticks_per_beat: u16,
    /// Velocity assigned to generated notes
    pub velocity: u8,
}

impl Default for MidiConfig {
    fn default() -> Self {
        Self {
            ticks_per_beat: 480,
            velocity: 64,
        }
    }
}

impl Default for PipelineConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            camera: CameraSettings::default(),
            midi: MidiConfig::default(),
        }
    }
}

/// Explicit overrides applied on top of a loaded configuration
///
/// Mirrors the initialization surface of the pipeline: callers may pin a
/// camera id, a capture resolution, or the mirroring flag without touching
/// the settings file.
#[derive(Debug, Clone, Default)]
pub struct CameraOverrides {
    pub camera_id: Option<i32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub flip_horizontal: Option<bool>,
}

impl CameraOverrides {
    /// Apply the overrides to a settings struct in place
    pub fn apply(&self, settings: &mut CameraSettings) {
        if let Some(camera_id) = self.camera_id {
            settings.camera_id = camera_id;
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(flip) = self.flip_horizontal {
            settings.flip_horizontal = flip;
        }
    }
}

impl PipelineConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The loaded configuration, or the default configuration if the file
    /// doesn't exist or contains invalid JSON.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default settings path
    pub fn load() -> Self {
        Self::load_from_file("assets/pipeline_config.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.camera.camera_id, -1);
        assert_eq!(config.camera.width, 640);
        assert_eq!(config.camera.height, 480);
        assert!(config.camera.flip_horizontal);
        assert!(config.camera.smooth_landmarks);
        assert_eq!(config.camera.max_hands, 2);
        assert_eq!(config.midi.ticks_per_beat, 480);
        assert_eq!(config.midi.velocity, 64);
    }

    #[test]
    fn test_json_roundtrip() {
        let config = PipelineConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: PipelineConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.camera.camera_id, config.camera.camera_id);
        assert_eq!(parsed.camera.flip_horizontal, config.camera.flip_horizontal);
        assert_eq!(parsed.midi.ticks_per_beat, config.midi.ticks_per_beat);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let config = PipelineConfig::load_from_file("does/not/exist.json");
        assert_eq!(config.camera.width, CameraSettings::default().width);
    }

    #[test]
    fn test_overrides_apply() {
        let mut settings = CameraSettings::default();
        let overrides = CameraOverrides {
            camera_id: Some(3),
            width: Some(1280),
            height: None,
            flip_horizontal: Some(false),
        };
        overrides.apply(&mut settings);

        assert_eq!(settings.camera_id, 3);
        assert_eq!(settings.width, 1280);
        assert_eq!(settings.height, 480, "unset override should not change height");
        assert!(!settings.flip_horizontal);
    }
}
