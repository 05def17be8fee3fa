// MIDI generation - declarative preset to delta-timed event stream
//
// Module organization:
// - notes: pitch name -> MIDI number conversion
// - rhythm: textual rhythm pattern -> relative note lengths
// - presets: discrete emotion -> Preset lookup, gesture modifier hook
// - timeline: Preset -> absolute-time events -> delta-tick events
// - file: standard MIDI file writing via midly

mod file;
mod notes;
mod presets;
mod rhythm;
mod timeline;

pub use file::{write_midi_bytes, write_midi_file};
pub use notes::note_name_to_number;
pub use presets::{Emotion, Preset};
pub use rhythm::{parse_rhythm, ParsedRhythm, DEFAULT_NOTE_LENGTH};
pub use timeline::{
    generate_timeline, to_delta_ticks, MidiEvent, MidiEventKind, MidiTimeline, TickEvent,
    DEFAULT_TICKS_PER_BEAT, DEFAULT_VELOCITY,
};
