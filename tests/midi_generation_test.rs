//! Integration tests for the preset -> timeline -> MIDI file path
//!
//! Exercises the offline half of the pipeline end to end: emotion code in,
//! parseable single-track MIDI bytes out.

use handtune::config::PipelineConfig;
use handtune::engine::PipelineSession;
use handtune::midi::{
    generate_timeline, to_delta_ticks, write_midi_bytes, Emotion, MidiEventKind, Preset,
};
use handtune::telemetry::PipelineEventKind;

/// The reference preset from the design contract: 120 bpm, "4,8,8,4",
/// C3 E3 G3 C4
fn reference_preset() -> Preset {
    Preset {
        tempo: 120.0,
        rhythm: "4,8,8,4".to_string(),
        notes: vec!["C3".into(), "E3".into(), "G3".into(), "C4".into()],
    }
}

#[test]
fn test_reference_preset_timing_contract() {
    let timeline = generate_timeline(&reference_preset()).unwrap();

    let ons: Vec<_> = timeline
        .events
        .iter()
        .filter(|e| e.kind == MidiEventKind::NoteOn)
        .collect();
    let offs: Vec<_> = timeline
        .events
        .iter()
        .filter(|e| e.kind == MidiEventKind::NoteOff)
        .collect();

    assert_eq!(ons.len(), 4);
    assert_eq!(offs.len(), 4);
    assert_eq!(
        ons.iter().map(|e| e.pitch).collect::<Vec<_>>(),
        vec![48, 52, 55, 60]
    );
    // (1.0 + 0.5 + 0.5 + 1.0) beats at 0.5 s per beat
    assert!((timeline.duration() - 1.5).abs() < 1e-9);
}

#[test]
fn test_delta_tick_sums_match_absolute_times() {
    let timeline = generate_timeline(&reference_preset()).unwrap();
    let ticks = to_delta_ticks(&timeline.events, 480);

    let mut sum: u64 = 0;
    for (tick, event) in ticks.iter().zip(timeline.events.iter()) {
        sum += tick.delta as u64;
        let expected = (event.time * 480.0).round() as u64;
        assert!(
            sum.abs_diff(expected) <= 1,
            "tick sum {} vs absolute {}",
            sum,
            expected
        );
    }
}

#[test]
fn test_every_emotion_produces_playable_midi() {
    for emotion in Emotion::all() {
        let preset = Preset::for_emotion(emotion);
        let timeline = generate_timeline(&preset).unwrap();
        assert_eq!(
            timeline.skipped_notes, 0,
            "table preset for {:?} must not skip notes",
            emotion
        );

        let bytes = write_midi_bytes(&timeline, 480).unwrap();
        assert_eq!(&bytes[..4], b"MThd", "output must be a standard MIDI file");
    }
}

#[test]
fn test_session_write_midi_roundtrip() {
    let dir = std::env::temp_dir().join("handtune_midi_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("happy.mid");

    let session = PipelineSession::new(PipelineConfig::default());
    let timeline = session.write_midi(4, &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"MThd");
    assert!(timeline.tempo > 0.0);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_preset_selection_is_observable_over_telemetry() {
    let session = PipelineSession::new(PipelineConfig::default());
    let mut rx = session.subscribe_telemetry();

    let preset = session.select_preset(5);
    assert_eq!(preset.tempo, 140.0);

    match rx.try_recv().unwrap().kind {
        PipelineEventKind::PresetSelected { emotion, tempo } => {
            assert_eq!(emotion, Emotion::Excited);
            assert_eq!(tempo, 140.0);
        }
        other => panic!("Expected PresetSelected, got {:?}", other),
    }
}

#[test]
fn test_unknown_emotion_code_selects_neutral() {
    let session = PipelineSession::new(PipelineConfig::default());
    let fallback = session.generate_timeline(9).unwrap();
    let neutral = session.generate_timeline(3).unwrap();
    assert_eq!(fallback, neutral);
}
