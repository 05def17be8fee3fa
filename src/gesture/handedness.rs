// Hand assignment and mirroring
//
// The detector reports handedness as seen in the image. When the preview is
// mirrored (flip_horizontal), the image-space label is the opposite of the
// user's actual hand, so role assignment must invert to keep "your left
// hand" bound to the left role on screen.

use serde::{Deserialize, Serialize};

use crate::error::GestureError;

/// Raw handedness label as reported by the vision detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawHandedness {
    Left,
    Right,
}

impl RawHandedness {
    /// Parse a detector label
    ///
    /// Labels are matched case-insensitively; anything other than
    /// "Left"/"Right" violates the detector contract and is an error.
    pub fn from_label(label: &str) -> Result<Self, GestureError> {
        match label.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(RawHandedness::Left),
            "right" => Ok(RawHandedness::Right),
            _ => Err(GestureError::UnknownHandedness {
                label: label.to_string(),
            }),
        }
    }
}

/// Canonical hand role after mirroring correction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandRole {
    Left,
    Right,
}

impl HandRole {
    /// Resolve a raw detector label and the mirroring flag into a role
    pub fn from_raw(raw: RawHandedness, flip_horizontal: bool) -> Self {
        if flip_horizontal {
            match raw {
                RawHandedness::Left => HandRole::Right,
                RawHandedness::Right => HandRole::Left,
            }
        } else {
            match raw {
                RawHandedness::Left => HandRole::Left,
                RawHandedness::Right => HandRole::Right,
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            HandRole::Left => "left",
            HandRole::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_assignment_with_flip() {
        assert_eq!(
            HandRole::from_raw(RawHandedness::Left, true),
            HandRole::Right
        );
        assert_eq!(
            HandRole::from_raw(RawHandedness::Right, true),
            HandRole::Left
        );
    }

    #[test]
    fn test_role_assignment_without_flip() {
        assert_eq!(
            HandRole::from_raw(RawHandedness::Left, false),
            HandRole::Left
        );
        assert_eq!(
            HandRole::from_raw(RawHandedness::Right, false),
            HandRole::Right
        );
    }

    #[test]
    fn test_label_parsing_is_case_insensitive() {
        assert_eq!(
            RawHandedness::from_label("left").unwrap(),
            RawHandedness::Left
        );
        assert_eq!(
            RawHandedness::from_label("RIGHT").unwrap(),
            RawHandedness::Right
        );
        assert_eq!(
            RawHandedness::from_label(" Left ").unwrap(),
            RawHandedness::Left
        );
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        match RawHandedness::from_label("Middle") {
            Err(GestureError::UnknownHandedness { label }) => {
                assert_eq!(label, "Middle");
            }
            other => panic!("Expected UnknownHandedness, got {:?}", other),
        }
    }
}
