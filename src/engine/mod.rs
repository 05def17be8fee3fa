//! PipelineSession: reusable gesture/MIDI orchestration layer.
//!
//! The session is the explicit context object for one pipeline lifetime:
//! it owns the configuration, the aggregator (and with it all smoothing
//! state), the telemetry channel, and the cooperative stop flag. Nothing
//! in the crate relies on ambient process-wide state.

pub mod capture;
pub mod source;

pub use capture::{
    capture_handoff, CaptureConsumer, CaptureProducer, ThreadedSource, DEFAULT_HANDOFF_CAPACITY,
};
pub use source::{FrameObservation, ObservationSource, ScriptedSource};

#[cfg(feature = "camera")]
pub use source::{CameraSource, HandDetector};

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::info;
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::error::{log_camera_error, CameraError, MidiError};
use crate::gesture::{GestureAggregator, GestureState};
use crate::midi::{generate_timeline, write_midi_file, Emotion, MidiTimeline, Preset};
use crate::telemetry::{PipelineEvent, PipelineEventKind, TelemetryChannel};
use tokio::sync::broadcast;

/// Loop driver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    Idle,
    Running,
    Stopped,
}

/// Session owning the gesture pipeline's mutable state
pub struct PipelineSession {
    config: PipelineConfig,
    aggregator: GestureAggregator,
    telemetry: TelemetryChannel,
    stop_flag: Arc<AtomicBool>,
    state: PipelineState,
}

impl PipelineSession {
    pub fn new(config: PipelineConfig) -> Self {
        let aggregator = GestureAggregator::new(&config.camera);
        Self {
            config,
            aggregator,
            telemetry: TelemetryChannel::new(),
            stop_flag: Arc::new(AtomicBool::new(false)),
            state: PipelineState::Idle,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    /// Latest frame's gesture state
    pub fn gesture_state(&self) -> &GestureState {
        self.aggregator.state()
    }

    /// Subscribe to pipeline telemetry events
    pub fn subscribe_telemetry(&self) -> broadcast::Receiver<PipelineEvent> {
        self.telemetry.subscribe()
    }

    /// Handle for requesting a cooperative stop from another thread
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    /// Request a cooperative stop; honored at the next loop iteration
    pub fn request_stop(&self) {
        self.stop_flag.store(true, Ordering::Relaxed);
    }

    /// Run the per-frame loop until the source is exhausted, a stop is
    /// requested, or a read fails
    ///
    /// Each iteration: acquire an observation, aggregate it into the
    /// frame's GestureState, hand the state to the sink, then check the
    /// stop flag. The source is released unconditionally on every exit
    /// path, including errors.
    ///
    /// # Returns
    /// * `Ok(())` - The source ran dry or a stop was requested
    /// * `Err(CameraError::FrameReadFailure)` - A frame read failed
    pub fn run<S: ObservationSource>(
        &mut self,
        source: &mut S,
        sink: &mut dyn FnMut(&GestureState),
    ) -> Result<(), CameraError> {
        self.stop_flag.store(false, Ordering::Relaxed);
        self.state = PipelineState::Running;

        let camera_id = source
            .camera_id()
            .unwrap_or(self.config.camera.camera_id);
        self.telemetry
            .emit(PipelineEventKind::PipelineStarted { camera_id }, None);
        info!("[Pipeline] Running on camera id {}", camera_id);

        let mut reported_drops = 0u64;
        let result = loop {
            match source.next_observation() {
                Ok(Some(observation)) => {
                    let state = self.aggregator.process_frame(&observation.hands);
                    sink(state);

                    let drops = source.dropped_frames();
                    if drops > reported_drops {
                        self.telemetry.emit(
                            PipelineEventKind::FrameDropped,
                            Some(format!("{} frames dropped so far", drops)),
                        );
                        reported_drops = drops;
                    }

                    if self.stop_flag.load(Ordering::Relaxed) {
                        info!("[Pipeline] Stop requested");
                        break Ok(());
                    }
                }
                Ok(None) => {
                    info!("[Pipeline] Observation source exhausted");
                    break Ok(());
                }
                Err(err) => {
                    log_camera_error(&err, "run");
                    self.telemetry.emit(
                        PipelineEventKind::Warning,
                        Some(format!("frame read failed: {}", err)),
                    );
                    break Err(CameraError::FrameReadFailure);
                }
            }
        };

        // Guaranteed release, error exit included
        source.release();
        self.state = PipelineState::Stopped;
        self.telemetry.emit(PipelineEventKind::PipelineStopped, None);

        result
    }

    /// Select the preset for an external emotion code
    ///
    /// Out-of-range codes fail closed to the neutral preset. The selection
    /// is published on the telemetry channel.
    pub fn select_preset(&self, emotion_code: i32) -> Preset {
        let emotion = Emotion::from_code(emotion_code);
        let preset = Preset::for_emotion(emotion);
        self.telemetry.emit(
            PipelineEventKind::PresetSelected {
                emotion,
                tempo: preset.tempo,
            },
            None,
        );
        preset
    }

    /// Generate the timeline for an emotion code
    pub fn generate_timeline(&self, emotion_code: i32) -> Result<MidiTimeline, MidiError> {
        generate_timeline(&self.select_preset(emotion_code))
    }

    /// Generate and persist a MIDI file for an emotion code
    pub fn write_midi<P: AsRef<std::path::Path>>(
        &self,
        emotion_code: i32,
        path: P,
    ) -> Result<MidiTimeline, MidiError> {
        let timeline = self.generate_timeline(emotion_code)?;
        write_midi_file(path, &timeline, self.config.midi.ticks_per_beat)?;
        Ok(timeline)
    }

    /// Reset to Idle: clears frame state and all smoothing seeds
    pub fn reset(&mut self) {
        self.aggregator.reset();
        self.stop_flag.store(false, Ordering::Relaxed);
        self.state = PipelineState::Idle;
    }
}
