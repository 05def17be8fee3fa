// Pitch name to MIDI note number conversion
//
// Scientific pitch notation with the C0 = 12 convention: note number is
// 12 * (octave + 1) + semitone offset within the octave. Sharps and flats
// are accepted; anything malformed or outside 0-127 yields None and the
// caller decides how to recover (the timeline generator skips the note).

/// Convert a pitch name like "C3", "F#2", or "Bb4" to a MIDI note number
///
/// # Returns
/// * `Some(number)` - MIDI note number 0-127
/// * `None` - The name is malformed or out of MIDI range
pub fn note_name_to_number(name: &str) -> Option<u8> {
    let name = name.trim();
    let mut chars = name.chars();

    let letter = chars.next()?;
    let semitone: i32 = match letter.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };

    let rest: String = chars.collect();
    let (accidental, octave_str) = match rest.chars().next() {
        Some('#') => (1, &rest[1..]),
        Some('b') => (-1, &rest[1..]),
        _ => (0, rest.as_str()),
    };

    if octave_str.is_empty() {
        return None;
    }
    let octave: i32 = octave_str.parse().ok()?;
    if octave < 0 {
        return None;
    }

    let number = 12 * (octave + 1) + semitone + accidental;
    if (0..=127).contains(&number) {
        Some(number as u8)
    } else {
        None
    }
}
