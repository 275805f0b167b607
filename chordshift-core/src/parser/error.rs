use thiserror::Error;

/// Errors that abort transposition of a whole document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransposeError {
    /// Source or target key is not one of C, D, E, F, G, A, B
    #[error("Unsupported key: {0}. Use C, D, E, F, G, A, or B")]
    UnsupportedKey(String),
    /// No line of the document names a key
    #[error("No key specified in content")]
    KeyNotDetected,
    /// A chord-shaped token is not diatonic to the source key
    #[error("Invalid chord: {0}")]
    InvalidChord(String),
    /// `InvalidChord` located in a document (1-based line number)
    #[error("Invalid chord: {chord} (line {line})")]
    InvalidChordAt { line: usize, chord: String },
}

impl TransposeError {
    /// Attach a line number to an `InvalidChord`; other errors pass through
    pub fn at_line(self, line: usize) -> Self {
        match self {
            TransposeError::InvalidChord(chord) => TransposeError::InvalidChordAt { line, chord },
            other => other,
        }
    }

    /// The offending chord token, if this is a chord error
    pub fn chord(&self) -> Option<&str> {
        match self {
            TransposeError::InvalidChord(chord) | TransposeError::InvalidChordAt { chord, .. } => {
                Some(chord)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            TransposeError::InvalidChord("Z#m".to_string()).to_string(),
            "Invalid chord: Z#m"
        );
        assert_eq!(
            TransposeError::KeyNotDetected.to_string(),
            "No key specified in content"
        );
        assert_eq!(
            TransposeError::UnsupportedKey("H".to_string()).to_string(),
            "Unsupported key: H. Use C, D, E, F, G, A, or B"
        );
    }

    #[test]
    fn test_at_line() {
        let err = TransposeError::InvalidChord("G7".to_string()).at_line(3);
        assert_eq!(err.to_string(), "Invalid chord: G7 (line 3)");
        assert_eq!(err.chord(), Some("G7"));

        // Only chord errors carry a location
        assert_eq!(
            TransposeError::KeyNotDetected.at_line(3),
            TransposeError::KeyNotDetected
        );
    }
}
