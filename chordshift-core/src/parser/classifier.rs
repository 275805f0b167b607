//! Chord token and chord line recognition
//!
//! `is_valid_chord` is a strict grammar check applied to single tokens.
//! `is_chord_line` is a cheap heuristic that only decides whether a line is
//! worth tokenizing. It misfires on some inputs (a dense all-caps lyric line
//! can pass, a lone chord with little whitespace can be missed); callers rely
//! on exactly this behavior, so keep it as is.

use regex::Regex;
use std::sync::OnceLock;

/// Minimum whitespace count (exclusive) for the letter-based line check
const CHORD_LINE_MIN_WHITESPACE: usize = 5;

static CHORD_PATTERN: OnceLock<Regex> = OnceLock::new();

fn chord_pattern() -> &'static Regex {
    CHORD_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-G][#b]?(m|maj|dim)?[0-9]?(/[A-G][#b]?(m|maj|dim)?[0-9]?)?$")
            .expect("chord pattern is a valid regex")
    })
}

/// Whether `token` is a syntactically valid chord such as `C`, `G#m7` or `D/F#`.
///
/// The whole token must match; surrounding whitespace is not trimmed.
pub fn is_valid_chord(token: &str) -> bool {
    !token.is_empty() && chord_pattern().is_match(token)
}

/// Heuristic: does this line look like it carries chords?
///
/// True for a non-blank line that contains `/` or `#`, or that has more than
/// five whitespace characters and at least one uppercase letter A-G.
pub fn is_chord_line(line: &str) -> bool {
    if line.trim().is_empty() {
        return false;
    }

    line.contains('/')
        || line.contains('#')
        || (line.chars().filter(|c| c.is_whitespace()).count() > CHORD_LINE_MIN_WHITESPACE
            && line.chars().any(|c| ('A'..='G').contains(&c)))
}
