// Rhythm pattern parser
//
// A rhythm pattern is a comma-separated list of note-length denominators:
// "4,8,8,4" is quarter, eighth, eighth, quarter. Lengths are emitted
// relative to a quarter note (4 -> 1.0, 8 -> 0.5). A token that is not a
// positive integer falls back to a quarter note; the fallback is counted
// on the result so callers can tell defaulted output from as-specified
// output.

use log::warn;

/// Fallback note length (one quarter note) for empty patterns and invalid
/// tokens
pub const DEFAULT_NOTE_LENGTH: f32 = 1.0;

/// Parse result: note lengths plus the fallback diagnostic count
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRhythm {
    /// Quarter-note-relative note lengths, never empty
    pub lengths: Vec<f32>,
    /// How many tokens fell back to the default length
    pub invalid_tokens: usize,
}

/// Parse a textual rhythm pattern into relative note lengths
///
/// An empty (or all-whitespace) pattern yields a single quarter note with
/// no invalid tokens.
pub fn parse_rhythm(pattern: &str) -> ParsedRhythm {
    if pattern.trim().is_empty() {
        return ParsedRhythm {
            lengths: vec![DEFAULT_NOTE_LENGTH],
            invalid_tokens: 0,
        };
    }

    let mut lengths = Vec::new();
    let mut invalid_tokens = 0;

    for token in pattern.split(',') {
        let token = token.trim();
        match token.parse::<i64>() {
            Ok(denominator) if denominator > 0 => {
                lengths.push(4.0 / denominator as f32);
            }
            _ => {
                warn!(
                    "[Rhythm] Invalid token {:?}, substituting a quarter note",
                    token
                );
                lengths.push(DEFAULT_NOTE_LENGTH);
                invalid_tokens += 1;
            }
        }
    }

    ParsedRhythm {
        lengths,
        invalid_tokens,
    }
}
