// chordshift-core/src/types/key_table.rs
use crate::types::Key;
use std::fmt;

/// Number of diatonic degrees in a major key
pub const DEGREES: usize = 7;

/// Diatonic triads (I ii iii IV V vi vii°) for each key, rows in `Key::ALL` order.
/// Names are matched literally, so "A#" is not the same chord as "Bb".
const SCALES: [[&str; DEGREES]; 7] = [
    ["C", "Dm", "Em", "F", "G", "Am", "Bdim"],
    ["D", "Em", "F#m", "G", "A", "Bm", "C#dim"],
    ["E", "F#m", "G#m", "A", "B", "C#m", "D#dim"],
    ["F", "Gm", "Am", "Bb", "C", "Dm", "Edim"],
    ["G", "Am", "Bm", "C", "D", "Em", "F#dim"],
    ["A", "Bm", "C#m", "D", "E", "F#m", "G#dim"],
    ["B", "C#m", "D#m", "E", "F#", "G#m", "A#dim"],
];

/// Position of a chord within its key's scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScaleDegree {
    I,
    II,
    III,
    IV,
    V,
    VI,
    VII,
}

impl ScaleDegree {
    pub const ALL: [ScaleDegree; DEGREES] = [
        ScaleDegree::I,
        ScaleDegree::II,
        ScaleDegree::III,
        ScaleDegree::IV,
        ScaleDegree::V,
        ScaleDegree::VI,
        ScaleDegree::VII,
    ];

    /// Degree for a 0-based scale index
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ScaleDegree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Case follows triad quality: major upper, minor lower
        let numeral = match self {
            ScaleDegree::I => "I",
            ScaleDegree::II => "ii",
            ScaleDegree::III => "iii",
            ScaleDegree::IV => "IV",
            ScaleDegree::V => "V",
            ScaleDegree::VI => "vi",
            ScaleDegree::VII => "vii°",
        };
        write!(f, "{}", numeral)
    }
}

/// Read-only mapping from each key to its seven diatonic chords.
///
/// Built once and shared by reference; it is never mutated after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyTable {
    scales: &'static [[&'static str; DEGREES]; 7],
}

impl KeyTable {
    /// Create the standard table
    pub fn new() -> Self {
        KeyTable { scales: &SCALES }
    }

    /// The seven chords of `key`, ordered I through vii°
    pub fn scale_of(&self, key: Key) -> &[&'static str; DEGREES] {
        &self.scales[key.index()]
    }

    /// Degree index of `chord` in `key`, by exact string match
    pub fn degree_index_of(&self, key: Key, chord: &str) -> Option<usize> {
        self.scale_of(key).iter().position(|name| *name == chord)
    }

    /// Scale degree of `chord` in `key`
    pub fn degree_of(&self, key: Key, chord: &str) -> Option<ScaleDegree> {
        self.degree_index_of(key, chord)
            .and_then(ScaleDegree::from_index)
    }

    /// Chord sitting at `degree` in `key`
    pub fn chord_at(&self, key: Key, degree: ScaleDegree) -> &'static str {
        self.scale_of(key)[degree.index()]
    }
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for KeyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for key in Key::ALL {
            write!(f, "{}:", key)?;
            for chord in self.scale_of(key) {
                write!(f, " {:<6}", chord)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_of() {
        let table = KeyTable::new();
        assert_eq!(
            table.scale_of(Key::D),
            &["D", "Em", "F#m", "G", "A", "Bm", "C#dim"]
        );
        assert_eq!(
            table.scale_of(Key::F),
            &["F", "Gm", "Am", "Bb", "C", "Dm", "Edim"]
        );
    }

    #[test]
    fn test_degree_lookup() {
        let table = KeyTable::new();
        assert_eq!(table.degree_index_of(Key::C, "Am"), Some(5));
        assert_eq!(table.degree_of(Key::G, "F#dim"), Some(ScaleDegree::VII));
        assert_eq!(table.chord_at(Key::B, ScaleDegree::V), "F#");
    }

    #[test]
    fn test_lookup_is_literal() {
        let table = KeyTable::new();
        // Enharmonic spellings are not reduced
        assert_eq!(table.degree_of(Key::F, "Bb"), Some(ScaleDegree::IV));
        assert_eq!(table.degree_of(Key::F, "A#"), None);
        // Extensions are not part of the table
        assert_eq!(table.degree_index_of(Key::C, "G7"), None);
        assert_eq!(table.degree_index_of(Key::C, "Dm7"), None);
    }

    #[test]
    fn test_every_key_has_seven_distinct_chords() {
        let table = KeyTable::new();
        for key in Key::ALL {
            let scale = table.scale_of(key);
            assert_eq!(scale[0], key.to_string(), "tonic of {}", key);
            assert!(scale[6].ends_with("dim"));
            for (i, chord) in scale.iter().enumerate() {
                assert_eq!(table.degree_index_of(key, chord), Some(i));
            }
        }
    }

    #[test]
    fn test_degree_display() {
        let numerals: Vec<String> = ScaleDegree::ALL.iter().map(|d| d.to_string()).collect();
        assert_eq!(numerals, vec!["I", "ii", "iii", "IV", "V", "vi", "vii°"]);
        assert_eq!(ScaleDegree::from_index(7), None);
    }

    #[test]
    fn test_table_display() {
        let rendered = KeyTable::new().to_string();
        assert_eq!(rendered.lines().count(), 7);
        assert!(rendered.starts_with("C: C"));
    }
}
