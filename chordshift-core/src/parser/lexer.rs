//! Line tokenizer
//!
//! Whitespace is `char::is_whitespace`, which includes Unicode spaces such
//! as U+00A0 (no-break space). A chord separated by a no-break space is
//! therefore its own token.

/// What a span of a line contains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// A maximal run of whitespace
    Whitespace,
    /// A maximal run of non-whitespace characters
    Text,
}

/// A borrowed slice of a line plus its byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'a> {
    pub kind: SpanKind,
    pub text: &'a str,
    pub start: usize,
}

impl<'a> Span<'a> {
    pub fn is_whitespace(&self) -> bool {
        self.kind == SpanKind::Whitespace
    }
}

/// Splits a line into alternating whitespace and text runs.
///
/// Spans are yielded in order and cover the line exactly, so joining their
/// text gives back the original line.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given line
    pub fn new(input: &'a str) -> Self {
        Lexer { input, position: 0 }
    }

    /// Collect every span of the line
    pub fn spans(input: &'a str) -> Vec<Span<'a>> {
        Lexer::new(input).collect()
    }

    /// Byte length of the run starting at the current position
    fn run_length(&self, whitespace: bool) -> usize {
        self.input[self.position..]
            .char_indices()
            .find(|(_, ch)| ch.is_whitespace() != whitespace)
            .map(|(idx, _)| idx)
            .unwrap_or(self.input.len() - self.position)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Span<'a>;

    fn next(&mut self) -> Option<Span<'a>> {
        let first = self.input[self.position..].chars().next()?;
        let whitespace = first.is_whitespace();
        let len = self.run_length(whitespace);

        let span = Span {
            kind: if whitespace {
                SpanKind::Whitespace
            } else {
                SpanKind::Text
            },
            text: &self.input[self.position..self.position + len],
            start: self.position,
        };
        self.position += len;
        Some(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<(SpanKind, &str)> {
        Lexer::spans(line).iter().map(|s| (s.kind, s.text)).collect()
    }

    #[test]
    fn test_alternating_runs() {
        assert_eq!(
            kinds("  C   G\tAm"),
            vec![
                (SpanKind::Whitespace, "  "),
                (SpanKind::Text, "C"),
                (SpanKind::Whitespace, "   "),
                (SpanKind::Text, "G"),
                (SpanKind::Whitespace, "\t"),
                (SpanKind::Text, "Am"),
            ]
        );
    }

    #[test]
    fn test_spans_rebuild_line() {
        for line in ["", " ", "C", "  lead in, (Am)  ", "ré  mi\u{00a0}fa "] {
            let rebuilt: String = Lexer::spans(line).iter().map(|s| s.text).collect();
            assert_eq!(rebuilt, line);
        }
    }

    #[test]
    fn test_span_offsets() {
        let line = "C  Dm";
        let spans = Lexer::spans(line);
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[2].start, 3);
        assert_eq!(&line[spans[1].start..spans[2].start], "  ");
        assert!(spans[1].is_whitespace());
    }

    #[test]
    fn test_no_break_space_separates_runs() {
        assert_eq!(
            kinds("C\u{a0}G"),
            vec![
                (SpanKind::Text, "C"),
                (SpanKind::Whitespace, "\u{a0}"),
                (SpanKind::Text, "G"),
            ]
        );
    }

    #[test]
    fn test_empty_line() {
        assert!(Lexer::spans("").is_empty());
    }
}
