use crate::parser::TransposeError;
use std::fmt;
use std::str::FromStr;

/// A natural major key. Only the seven white-key roots are supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Key {
    /// All supported keys, in the order used for key detection
    pub const ALL: [Key; 7] = [Key::C, Key::D, Key::E, Key::F, Key::G, Key::A, Key::B];

    /// The key's root letter
    pub fn letter(self) -> char {
        match self {
            Key::C => 'C',
            Key::D => 'D',
            Key::E => 'E',
            Key::F => 'F',
            Key::G => 'G',
            Key::A => 'A',
            Key::B => 'B',
        }
    }

    /// Row of this key in the key table
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Look up a key from its exact (uppercase) root letter
    pub fn from_letter(letter: char) -> Option<Key> {
        Key::ALL.into_iter().find(|key| key.letter() == letter)
    }
}

impl FromStr for Key {
    type Err = TransposeError;

    /// Parse a target key. Case-insensitive, surrounding whitespace ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let mut chars = normalized.chars();

        match (chars.next(), chars.next()) {
            (Some(letter), None) => {
                Key::from_letter(letter).ok_or_else(|| TransposeError::UnsupportedKey(s.to_string()))
            }
            _ => Err(TransposeError::UnsupportedKey(s.to_string())),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}
