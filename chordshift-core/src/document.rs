//! Whole-document transposition
//!
//! A document is transposed in one pass that either succeeds for every line
//! or fails without producing any output. The source key is detected once,
//! before any line is touched. Lines are independent of each other and are
//! mapped in parallel; output order always matches input order.

use crate::parser::{is_chord_line, TransposeError};
use crate::transposer::Transposer;
use crate::types::{Key, KeyTable};
use crate::Result;
use rayon::prelude::*;
use tracing::{debug, info};

/// Marker word that identifies a key line (matched case-insensitively)
const KEY_MARKER: &str = "key";

/// How a line is handled during transposition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LineKind {
    /// Mentions "key"; replaced by the target key marker
    KeyMarker,
    /// Looks like a chord line; run through the transposer
    Chords,
    /// Copied through unchanged
    Text,
}

/// Decide how `line` is handled. Key markers win over the chord heuristic.
pub fn classify_line(line: &str) -> LineKind {
    if is_key_marker(line) {
        LineKind::KeyMarker
    } else if is_chord_line(line) {
        LineKind::Chords
    } else {
        LineKind::Text
    }
}

fn is_key_marker(line: &str) -> bool {
    line.to_lowercase().contains(KEY_MARKER)
}

/// Key named on a key-marker line.
///
/// This is a containment test, not a parse: the first of C, D, E, F, G, A, B
/// appearing anywhere in the line (uppercase) wins. "Key: G" gives G, but so
/// does "Great key of A".
pub fn detect_key(line: &str) -> Option<Key> {
    if !is_key_marker(line) {
        return None;
    }

    Key::ALL
        .into_iter()
        .find(|key| line.contains(key.letter()))
}

/// Source key of a document: the key of the first line that yields one
pub fn detect_source_key<S: AsRef<str>>(lines: &[S]) -> Result<Key> {
    lines
        .iter()
        .find_map(|line| detect_key(line.as_ref()))
        .ok_or(TransposeError::KeyNotDetected)
}

/// The output written in place of every key-marker line
pub fn key_marker(key: Key) -> String {
    format!("{} {}", key, KEY_MARKER)
}

/// Counts gathered while transposing a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TranspositionReport {
    pub lines: usize,
    pub key_markers: usize,
    pub chord_lines: usize,
    pub chords: usize,
}

/// An ordered set of lines with its detected source key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
    source_key: Key,
}

impl Document {
    /// Build a document, detecting its source key.
    ///
    /// Fails with `KeyNotDetected` if no line names a key.
    pub fn parse(lines: Vec<String>) -> Result<Self> {
        let source_key = detect_source_key(&lines)?;
        debug!(key = %source_key, lines = lines.len(), "detected source key");
        Ok(Document { lines, source_key })
    }

    /// Build a document from a block of text, one line per `\n`
    pub fn from_text(text: &str) -> Result<Self> {
        Self::parse(text.lines().map(str::to_string).collect())
    }

    pub fn source_key(&self) -> Key {
        self.source_key
    }

    /// Transpose the whole document to `target`
    pub fn transpose_to(&self, table: &KeyTable, target: Key) -> Result<Vec<String>> {
        self.transpose_with_report(table, target)
            .map(|(lines, _)| lines)
    }

    /// Transpose the whole document, also returning what was done.
    ///
    /// If several lines hold invalid chords, the error for the earliest one is
    /// returned, tagged with its 1-based line number.
    pub fn transpose_with_report(
        &self,
        table: &KeyTable,
        target: Key,
    ) -> Result<(Vec<String>, TranspositionReport)> {
        let transposer = Transposer::new(table, self.source_key, target);
        if transposer.is_identity() {
            debug!(key = %target, "target matches source key, checking chords only");
        }

        let results: Vec<Result<(String, LineKind, usize)>> = self
            .lines
            .par_iter()
            .enumerate()
            .map(|(idx, line)| {
                transpose_document_line(&transposer, line).map_err(|e| e.at_line(idx + 1))
            })
            .collect();

        let mut report = TranspositionReport {
            lines: self.lines.len(),
            ..Default::default()
        };
        let mut output = Vec::with_capacity(self.lines.len());

        for result in results {
            let (line, kind, chords) = result?;
            match kind {
                LineKind::KeyMarker => report.key_markers += 1,
                LineKind::Chords => report.chord_lines += 1,
                LineKind::Text => {}
            }
            report.chords += chords;
            output.push(line);
        }

        info!(
            from = %self.source_key,
            to = %target,
            lines = report.lines,
            chords = report.chords,
            "transposed document"
        );
        Ok((output, report))
    }
}

fn transpose_document_line(
    transposer: &Transposer<'_>,
    line: &str,
) -> Result<(String, LineKind, usize)> {
    let kind = classify_line(line);
    match kind {
        LineKind::KeyMarker => Ok((key_marker(transposer.to_key()), kind, 0)),
        LineKind::Chords => {
            let transposed = transposer.transpose_line_counted(line)?;
            Ok((transposed.text, kind, transposed.chords))
        }
        LineKind::Text => Ok((line.to_string(), kind, 0)),
    }
}

/// Detect the source key of `lines` and transpose them all to `target`
pub fn process_document(table: &KeyTable, lines: &[String], target: Key) -> Result<Vec<String>> {
    Document::parse(lines.to_vec())?.transpose_to(table, target)
}
