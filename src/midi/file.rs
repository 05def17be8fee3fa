// Standard MIDI file writing
//
// Serializes a generated timeline as a single-track SMF: one set_tempo
// meta event at delta 0, the delta-tick note events, and end-of-track.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use midly::num::u7;
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};

use crate::error::MidiError;
use crate::midi::timeline::{to_delta_ticks, MidiEventKind, MidiTimeline};

/// Serialize a timeline as MIDI file bytes
///
/// # Arguments
/// * `timeline` - Generated timeline; must contain at least one event
/// * `ticks_per_beat` - Symbolic time resolution (typically 480)
///
/// # Errors
/// * `MidiError::EmptyTimeline` - Every note of the preset was skipped
/// * `MidiError::WriteFailed` - midly failed to serialize
pub fn write_midi_bytes(timeline: &MidiTimeline, ticks_per_beat: u16) -> Result<Vec<u8>, MidiError> {
    if timeline.events.is_empty() {
        return Err(MidiError::EmptyTimeline);
    }

    let mut track = Track::new();

    // Tempo meta event: microseconds per quarter note
    let micros_per_beat = (60_000_000.0 / timeline.tempo as f64).round() as u32;
    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(micros_per_beat.into())),
    });

    for event in to_delta_ticks(&timeline.events, ticks_per_beat) {
        let message = match event.kind {
            MidiEventKind::NoteOn => MidiMessage::NoteOn {
                key: u7::new(event.pitch),
                vel: u7::new(event.velocity),
            },
            MidiEventKind::NoteOff => MidiMessage::NoteOff {
                key: u7::new(event.pitch),
                vel: u7::new(event.velocity),
            },
        };
        track.push(TrackEvent {
            delta: event.delta.into(),
            kind: TrackEventKind::Midi {
                channel: 0.into(),
                message,
            },
        });
    }

    track.push(TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let mut smf = Smf::new(Header {
        format: Format::SingleTrack,
        timing: Timing::Metrical(ticks_per_beat.into()),
    });
    smf.tracks.push(track);

    let mut buffer = Vec::new();
    smf.write_std(&mut Cursor::new(&mut buffer))
        .map_err(|err| MidiError::WriteFailed {
            reason: err.to_string(),
        })?;

    Ok(buffer)
}

/// Write a timeline to a MIDI file on disk
pub fn write_midi_file<P: AsRef<Path>>(
    path: P,
    timeline: &MidiTimeline,
    ticks_per_beat: u16,
) -> Result<(), MidiError> {
    let bytes = write_midi_bytes(timeline, ticks_per_beat)?;
    fs::write(&path, bytes)?;
    log::info!(
        "[Midi] Wrote {} events to {:?}",
        timeline.events.len(),
        path.as_ref()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::midi::presets::{Emotion, Preset};
    use crate::midi::timeline::generate_timeline;

    #[test]
    fn test_bytes_start_with_midi_header() {
        let timeline = generate_timeline(&Preset::for_emotion(Emotion::Neutral)).unwrap();
        let bytes = write_midi_bytes(&timeline, 480).unwrap();
        assert_eq!(&bytes[..4], b"MThd");
    }

    #[test]
    fn test_bytes_parse_back_with_tempo_meta() {
        let timeline = generate_timeline(&Preset::for_emotion(Emotion::Excited)).unwrap();
        let bytes = write_midi_bytes(&timeline, 480).unwrap();

        let smf = Smf::parse(&bytes).expect("written bytes should parse back");
        assert_eq!(smf.tracks.len(), 1);

        let first = &smf.tracks[0][0];
        match first.kind {
            TrackEventKind::Meta(MetaMessage::Tempo(micros)) => {
                // 140 bpm -> 428571 microseconds per beat
                assert_eq!(micros.as_int(), 428_571);
            }
            other => panic!("Expected tempo meta event first, got {:?}", other),
        }

        let last = smf.tracks[0].last().unwrap();
        assert!(matches!(
            last.kind,
            TrackEventKind::Meta(MetaMessage::EndOfTrack)
        ));
    }

    #[test]
    fn test_note_count_matches_timeline() {
        let timeline = generate_timeline(&Preset::for_emotion(Emotion::Neutral)).unwrap();
        let bytes = write_midi_bytes(&timeline, 480).unwrap();
        let smf = Smf::parse(&bytes).unwrap();

        let midi_events = smf.tracks[0]
            .iter()
            .filter(|e| matches!(e.kind, TrackEventKind::Midi { .. }))
            .count();
        assert_eq!(midi_events, timeline.events.len());
    }

    #[test]
    fn test_empty_timeline_is_rejected() {
        let timeline = MidiTimeline {
            tempo: 100.0,
            events: vec![],
            skipped_notes: 4,
            invalid_rhythm_tokens: 0,
        };
        match write_midi_bytes(&timeline, 480) {
            Err(MidiError::EmptyTimeline) => {}
            other => panic!("Expected EmptyTimeline, got {:?}", other),
        }
    }
}
