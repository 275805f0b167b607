// chordshift-core/src/types/mod.rs

pub mod key;
pub mod key_table;

pub use key::Key;
pub use key_table::{KeyTable, ScaleDegree};
