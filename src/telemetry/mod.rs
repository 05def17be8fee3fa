//! Pipeline telemetry events
//!
//! Lifecycle and diagnostic events published over a tokio broadcast
//! channel. Sends never block; when nobody is subscribed the event is
//! simply dropped.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::midi::Emotion;

/// Buffer size for the telemetry channel; lagged subscribers drop the
/// oldest events
const CHANNEL_CAPACITY: usize = 128;

/// Types of telemetry events emitted by the pipeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum PipelineEventKind {
    /// The loop driver entered Running on a resolved camera id
    PipelineStarted { camera_id: i32 },
    /// The loop driver stopped and released its device
    PipelineStopped,
    /// A preset was selected for an emotion code
    PresetSelected { emotion: Emotion, tempo: f32 },
    /// The capture handoff queue overflowed and the oldest frame was dropped
    FrameDropped,
    /// Recoverable problem worth surfacing
    Warning,
}

/// Telemetry event with a session-relative timestamp
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PipelineEvent {
    pub timestamp_ms: u64,
    pub kind: PipelineEventKind,
    pub detail: Option<String>,
}

/// Publisher handle for pipeline telemetry
pub struct TelemetryChannel {
    tx: broadcast::Sender<PipelineEvent>,
    start: Instant,
}

impl TelemetryChannel {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            start: Instant::now(),
        }
    }

    /// Subscribe to telemetry; each subscriber receives an independent copy
    pub fn subscribe(&self) -> broadcast::Receiver<PipelineEvent> {
        self.tx.subscribe()
    }

    /// Publish an event; never blocks, ignores the no-subscriber case
    pub fn emit(&self, kind: PipelineEventKind, detail: Option<String>) {
        let timestamp_ms = self.start.elapsed().as_millis() as u64;
        let _ = self.tx.send(PipelineEvent {
            timestamp_ms,
            kind,
            detail,
        });
    }
}

impl Default for TelemetryChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_without_subscribers_does_not_panic() {
        let channel = TelemetryChannel::new();
        channel.emit(PipelineEventKind::PipelineStopped, None);
    }

    #[test]
    fn test_subscriber_receives_events_in_order() {
        let channel = TelemetryChannel::new();
        let mut rx = channel.subscribe();

        channel.emit(PipelineEventKind::PipelineStarted { camera_id: 2 }, None);
        channel.emit(
            PipelineEventKind::Warning,
            Some("frame read retried".to_string()),
        );

        let first = rx.try_recv().unwrap();
        assert_eq!(
            first.kind,
            PipelineEventKind::PipelineStarted { camera_id: 2 }
        );

        let second = rx.try_recv().unwrap();
        assert_eq!(second.kind, PipelineEventKind::Warning);
        assert_eq!(second.detail.as_deref(), Some("frame read retried"));
    }

    #[test]
    fn test_event_json_shape() {
        let event = PipelineEvent {
            timestamp_ms: 5,
            kind: PipelineEventKind::PresetSelected {
                emotion: Emotion::Happy,
                tempo: 120.0,
            },
            detail: None,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("preset_selected"));
        assert!(json.contains("happy"));
    }
}
