//! Source location types
//!
//! Rule conditions are written as text inside the knowledge file. `Span`
//! remembers where a term came from so configuration errors can point at it.

use serde::Serialize;

/// Span representing a location in rule text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn from_pest_span(span: pest::Span) -> Self {
        let (line, col) = span.start_pos().line_col();
        Self {
            start: span.start(),
            end: span.end(),
            line,
            col,
        }
    }

    /// Build a zero-width span from a 1-based line and column, as reported by serde_json
    pub fn from_line_col(text: &str, line: usize, col: usize) -> Self {
        let mut offset = 0;
        for (index, current) in text.split_inclusive('\n').enumerate() {
            if index + 1 == line {
                offset += col.saturating_sub(1).min(current.len());
                break;
            }
            offset += current.len();
        }
        let offset = offset.min(text.len());
        Self {
            start: offset,
            end: offset,
            line,
            col,
        }
    }
}
