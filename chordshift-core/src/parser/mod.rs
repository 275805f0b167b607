// chordshift-core/src/parser/mod.rs

pub mod classifier;
pub mod error;
pub mod lexer;

pub use classifier::{is_chord_line, is_valid_chord};
pub use error::TransposeError;
pub use lexer::{Lexer, Span, SpanKind};
