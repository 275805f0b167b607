//! # Chordshift Core
//!
//! Transposes chord charts between the seven natural major keys.
//! Provides the key table, chord classification and the line/document
//! transposition pass without any terminal or file I/O.
//!
//! ## Features
//!
//! - **serde**: Enable serialization of keys, degrees and reports
//!
//! ## Example
//!
//! ```
//! use chordshift_core::{process_document, Key, KeyTable};
//!
//! let table = KeyTable::new();
//! let lines = vec!["key: C".to_string(), "C    G    Am   F".to_string()];
//! let out = process_document(&table, &lines, Key::D).unwrap();
//! assert_eq!(out, vec!["D key", "D    A    Bm   G"]);
//! ```

pub mod document;
pub mod parser;
pub mod transposer;
pub mod types;

// Re-export commonly used types
pub use document::{
    classify_line, detect_key, detect_source_key, process_document, Document, LineKind,
    TranspositionReport,
};
pub use parser::{is_chord_line, is_valid_chord, TransposeError};
pub use transposer::{transpose_chord, TransposedLine, Transposer};
pub use types::{Key, KeyTable, ScaleDegree};

/// Result alias used throughout the core
pub type Result<T> = std::result::Result<T, TransposeError>;
