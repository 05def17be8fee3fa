// Preset mapping engine
//
// Deterministic lookup from a discrete emotion category to a declarative
// Preset {tempo, rhythm, notes}. The emotion code arrives from an external
// classifier as an integer in 1..=5; anything else fails closed to the
// neutral preset. Gesture features can be layered on top of the base
// preset as an optional modifier stage.

use std::collections::HashMap;

use log::warn;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::gesture::GestureState;

/// Tempo bounds applied when gesture modifiers scale a preset
const MIN_TEMPO: f32 = 40.0;
const MAX_TEMPO: f32 = 240.0;

/// Discrete emotion category supplied by the external classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emotion {
    Sadness,
    Calm,
    Neutral,
    Happy,
    Excited,
}

impl Emotion {
    /// Map a classifier code to an emotion
    ///
    /// Codes outside 1..=5 fail closed to Neutral (the classifier's own
    /// failure default), with a warning so the substitution is observable.
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Emotion::Sadness,
            2 => Emotion::Calm,
            3 => Emotion::Neutral,
            4 => Emotion::Happy,
            5 => Emotion::Excited,
            _ => {
                warn!("[Preset] Unknown emotion code {}, defaulting to neutral", code);
                Emotion::Neutral
            }
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Emotion::Sadness => 1,
            Emotion::Calm => 2,
            Emotion::Neutral => 3,
            Emotion::Happy => 4,
            Emotion::Excited => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Emotion::Sadness => "sadness",
            Emotion::Calm => "calm",
            Emotion::Neutral => "neutral",
            Emotion::Happy => "happy",
            Emotion::Excited => "excited",
        }
    }

    pub fn all() -> [Emotion; 5] {
        [
            Emotion::Sadness,
            Emotion::Calm,
            Emotion::Neutral,
            Emotion::Happy,
            Emotion::Excited,
        ]
    }
}

/// Declarative tempo/rhythm/note specification driving MIDI generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    /// Beats per minute, always positive for table presets
    pub tempo: f32,
    /// Comma-separated note-length denominators, parsed on demand
    pub rhythm: String,
    /// Pitch names, played in order
    pub notes: Vec<String>,
}

fn preset(tempo: f32, rhythm: &str, notes: &[&str]) -> Preset {
    Preset {
        tempo,
        rhythm: rhythm.to_string(),
        notes: notes.iter().map(|n| n.to_string()).collect(),
    }
}

/// Fixed emotion -> preset table; values are design constants
static PRESET_TABLE: Lazy<HashMap<Emotion, Preset>> = Lazy::new(|| {
    let mut table = HashMap::new();
    table.insert(Emotion::Sadness, preset(70.0, "2,4,4", &["A2", "C3", "E3", "A3"]));
    table.insert(Emotion::Calm, preset(90.0, "4,4,4,4", &["C3", "G3", "E3", "G3"]));
    table.insert(Emotion::Neutral, preset(100.0, "4,4,4,4", &["C3", "E3", "G3", "C4"]));
    table.insert(Emotion::Happy, preset(120.0, "4,8,8,4", &["G3", "B3", "D4", "G4"]));
    table.insert(
        Emotion::Excited,
        preset(140.0, "8,8,8,8,4", &["E3", "G3", "B3", "E4", "B3"]),
    );
    table
});

impl Preset {
    /// Look up the base preset for an emotion
    pub fn for_emotion(emotion: Emotion) -> Preset {
        PRESET_TABLE
            .get(&emotion)
            .expect("preset table covers every emotion")
            .clone()
    }

    /// Look up a preset directly from a classifier code
    pub fn for_emotion_code(code: i32) -> Preset {
        Self::for_emotion(Emotion::from_code(code))
    }

    /// Layer gesture features on top of the base preset
    ///
    /// Optional modifier stage: the right-hand height nudges the tempo
    /// (raising the hand speeds the phrase up, lowering slows it down,
    /// within ±25% of the base tempo). Hands that are not detected leave
    /// the preset unchanged.
    pub fn with_gesture(mut self, gesture: &GestureState) -> Preset {
        if gesture.right.detected {
            // y runs downward in image coordinates, so 0.5 - y is positive
            // when the hand is above center
            let scale = 1.0 + (0.5 - gesture.right.y_position) * 0.5;
            self.tempo = (self.tempo * scale).clamp(MIN_TEMPO, MAX_TEMPO);
        }
        self
    }
}
