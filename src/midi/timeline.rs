// MIDI timeline generator
//
// Expands a Preset into absolute-time note events, then into delta-tick
// events at a fixed symbolic resolution. The rhythm pattern cycles when it
// is shorter than the note list. A note whose pitch name cannot be mapped
// is skipped (no on/off emitted) but the clock still advances by its
// intended duration, so the phrase keeps its rhythmic length.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::MidiError;
use crate::midi::notes::note_name_to_number;
use crate::midi::presets::Preset;
use crate::midi::rhythm::parse_rhythm;

/// Default symbolic time resolution for the persisted MIDI format
pub const DEFAULT_TICKS_PER_BEAT: u16 = 480;

/// Default velocity for generated notes
pub const DEFAULT_VELOCITY: u8 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MidiEventKind {
    NoteOn,
    NoteOff,
}

/// A note event at an absolute time in seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MidiEvent {
    pub kind: MidiEventKind,
    pub pitch: u8,
    pub velocity: u8,
    /// Absolute time in seconds from the start of the timeline
    pub time: f64,
}

/// A note event with delta-tick timing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TickEvent {
    pub kind: MidiEventKind,
    pub pitch: u8,
    pub velocity: u8,
    /// Ticks since the previous event
    pub delta: u32,
}

/// Generated timeline plus fallback diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MidiTimeline {
    /// Tempo in beats per minute, carried into the file's tempo meta event
    pub tempo: f32,
    /// Events in emission order; times are non-decreasing
    pub events: Vec<MidiEvent>,
    /// Notes dropped because their pitch name did not map
    pub skipped_notes: usize,
    /// Rhythm tokens that fell back to the default length
    pub invalid_rhythm_tokens: usize,
}

impl MidiTimeline {
    /// Total duration in seconds (time of the last event)
    pub fn duration(&self) -> f64 {
        self.events.last().map(|e| e.time).unwrap_or(0.0)
    }
}

/// Expand a preset into absolute-time note on/off events
///
/// For the note at index i the rhythm length is `rhythm[i % len]` and its
/// duration is `length * (60 / tempo)` seconds. Each note emits a NoteOn
/// at the current time and a NoteOff one duration later, then the clock
/// advances by the duration.
///
/// # Errors
/// `MidiError::InvalidTempo` when the tempo is not a positive finite number.
pub fn generate_timeline(preset: &Preset) -> Result<MidiTimeline, MidiError> {
    if !preset.tempo.is_finite() || preset.tempo <= 0.0 {
        return Err(MidiError::InvalidTempo {
            tempo: preset.tempo,
        });
    }

    let parsed = parse_rhythm(&preset.rhythm);
    let beat_duration = 60.0 / preset.tempo as f64;

    let mut events = Vec::with_capacity(preset.notes.len() * 2);
    let mut skipped_notes = 0;
    let mut current_time = 0.0_f64;

    for (i, name) in preset.notes.iter().enumerate() {
        let length = parsed.lengths[i % parsed.lengths.len()];
        let duration = length as f64 * beat_duration;

        match note_name_to_number(name) {
            Some(pitch) => {
                events.push(MidiEvent {
                    kind: MidiEventKind::NoteOn,
                    pitch,
                    velocity: DEFAULT_VELOCITY,
                    time: current_time,
                });
                events.push(MidiEvent {
                    kind: MidiEventKind::NoteOff,
                    pitch,
                    velocity: DEFAULT_VELOCITY,
                    time: current_time + duration,
                });
            }
            None => {
                warn!("[Timeline] Unknown pitch name {:?}, skipping note", name);
                skipped_notes += 1;
            }
        }

        // The clock advances whether or not the note was emitted, so a
        // skipped note leaves a rest of its intended length
        current_time += duration;
    }

    Ok(MidiTimeline {
        tempo: preset.tempo,
        events,
        skipped_notes,
        invalid_rhythm_tokens: parsed.invalid_tokens,
    })
}

/// Convert absolute-time events to delta-tick events
///
/// Deltas are `round((time - previous) * ticks_per_beat)` where the beat
/// is the timeline's quarter note and `previous` starts at zero. With
/// non-decreasing input times every delta is non-negative.
pub fn to_delta_ticks(events: &[MidiEvent], ticks_per_beat: u16) -> Vec<TickEvent> {
    let mut previous_time = 0.0_f64;
    let mut ticks = Vec::with_capacity(events.len());

    for event in events {
        let delta = ((event.time - previous_time) * ticks_per_beat as f64).round();
        ticks.push(TickEvent {
            kind: event.kind,
            pitch: event.pitch,
            velocity: event.velocity,
            delta: delta.max(0.0) as u32,
        });
        previous_time = event.time;
    }

    ticks
}
