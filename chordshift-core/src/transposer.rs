//! Positional transposition of chords and chord lines
//!
//! A chord at degree `i` of the source key becomes the chord at degree `i`
//! of the target key. Slash chords transpose each side independently.

use crate::parser::{is_valid_chord, Lexer, TransposeError};
use crate::types::{Key, KeyTable};
use crate::Result;
use tracing::trace;

/// Transposes chords from one key to another using a shared key table
#[derive(Debug, Clone, Copy)]
pub struct Transposer<'t> {
    table: &'t KeyTable,
    from: Key,
    to: Key,
}

/// A transposed line plus how many chords were rewritten in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransposedLine {
    pub text: String,
    pub chords: usize,
}

impl<'t> Transposer<'t> {
    pub fn new(table: &'t KeyTable, from: Key, to: Key) -> Self {
        Transposer { table, from, to }
    }

    pub fn to_key(&self) -> Key {
        self.to
    }

    /// True when source and target are the same key. Chords are still
    /// checked against the scale in that case.
    pub fn is_identity(&self) -> bool {
        self.from == self.to
    }

    /// Transpose a single chord token.
    ///
    /// The token must be one of the source key's diatonic chords, or a slash
    /// chord whose two sides both are; otherwise this fails with
    /// `InvalidChord`. The grammar is not checked here.
    pub fn transpose_chord(&self, chord: &str) -> Result<String> {
        if let Some((upper, bass)) = chord.split_once('/') {
            return Ok(format!(
                "{}/{}",
                self.transpose_chord(upper)?,
                self.transpose_chord(bass)?
            ));
        }

        let degree = self
            .table
            .degree_index_of(self.from, chord)
            .ok_or_else(|| TransposeError::InvalidChord(chord.to_string()))?;

        Ok(self.table.scale_of(self.to)[degree].to_string())
    }

    /// Transpose every chord token in `line`, copying everything else through.
    ///
    /// Whitespace runs are kept verbatim so chords stay aligned with the
    /// lyrics around them. Text runs that are not valid chords (including
    /// chords glued to punctuation) are left unchanged.
    pub fn transpose_line(&self, line: &str) -> Result<String> {
        Ok(self.transpose_line_counted(line)?.text)
    }

    /// Like `transpose_line`, also reporting how many chords were rewritten
    pub fn transpose_line_counted(&self, line: &str) -> Result<TransposedLine> {
        let mut text = String::with_capacity(line.len());
        let mut chords = 0;

        for span in Lexer::new(line) {
            if !span.is_whitespace() && is_valid_chord(span.text.trim()) {
                let transposed = self.transpose_chord(span.text.trim())?;
                trace!(from = span.text, to = %transposed, "chord");
                text.push_str(&transposed);
                chords += 1;
            } else {
                text.push_str(span.text);
            }
        }

        Ok(TransposedLine { text, chords })
    }
}

/// Transpose a single chord between two keys
pub fn transpose_chord(table: &KeyTable, chord: &str, from: Key, to: Key) -> Result<String> {
    Transposer::new(table, from, to).transpose_chord(chord)
}
