//! # Chordshift
//!
//! Chordshift rewrites chord charts (chords over lyrics, as plain text) from
//! their written key into another major key, keeping every lyric, space and
//! line break in place.
//!
//! The transposition itself lives in `chordshift-core`; this crate is the
//! front end around it.
//!
//! ## Modules
//!
//! - `io`: Reading charts, deriving output names and writing transposed copies.
//! - `config`: Persisted user preferences (default target key, output naming).
//! - `commands`: The command registry used by the interactive prompt.
//! - `repl`: The interactive prompt, including watch mode.

pub mod commands;
pub mod config;
pub mod io;
pub mod repl;

// Re-export commonly used types and functions for convenience
pub use crate::config::Config;
pub use crate::io::{output_path, transpose_file, Outcome};
pub use chordshift_core::{Key, KeyTable, TransposeError};
