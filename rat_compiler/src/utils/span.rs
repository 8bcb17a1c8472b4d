//! Source location tracking
//!
//! Tokens carry the span of their lexeme so structural errors can point at
//! the offending line and column. Lines and columns are 1-based and a
//! column counts characters, tabs included.
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Byte offset into the text being scanned
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    pub fn start() -> Self {
        Self::new(0, 1, 1)
    }

    /// Position just past `ch`
    pub fn advance(self, ch: char) -> Self {
        let offset = self.offset + ch.len_utf8();
        if ch == '\n' {
            Self::new(offset, self.line + 1, 1)
        } else {
            Self::new(offset, self.line, self.column + 1)
        }
    }

    pub fn advance_str(self, s: &str) -> Self {
        s.chars().fold(self, Self::advance)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Half-open region `[start, end)` of source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start.offset <= end.offset, "span ends before it starts");
        Self { start, end }
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn end(&self) -> Position {
        self.end
    }

    /// One-column span at `pos`
    pub fn single(pos: Position) -> Self {
        Self::new(pos, Position::new(pos.offset + 1, pos.line, pos.column + 1))
    }

    /// Placeholder for values with no source location
    pub fn dummy() -> Self {
        Self::new(Position::start(), Position::start())
    }

    /// Columns covered on the start line, at least one
    fn width_on_line(&self) -> usize {
        if self.start.line == self.end.line {
            (self.end.column.saturating_sub(self.start.column) as usize).max(1)
        } else {
            1
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start.line == self.end.line {
            write!(f, "{}:{}-{}", self.start.line, self.start.column, self.end.column)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Line index over a source text, used to quote the line an error points at
#[derive(Debug, Clone)]
pub struct SourceMap<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceMap<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .collect(),
        }
    }

    /// Text of a 1-based line without its terminator
    pub fn line(&self, number: u32) -> Option<&'a str> {
        let index = (number as usize).checked_sub(1)?;
        self.lines.get(index).copied()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Message followed by the offending line and a caret underline:
    ///
    /// ```text
    /// Error: Unexpected token ...
    ///   --> 2:5
    ///    |
    ///  2 | put x;
    ///    |     ^
    /// ```
    pub fn excerpt(&self, span: &Span, message: &str) -> String {
        let mut out = format!("Error: {}\n  --> {}\n", message, span.start);

        if let Some(text) = self.line(span.start.line) {
            let number = span.start.line.to_string();
            let gutter = " ".repeat(number.len());
            let indent = " ".repeat(span.start.column.saturating_sub(1) as usize);

            out.push_str(&format!(" {} |\n", gutter));
            out.push_str(&format!(" {} | {}\n", number, text));
            out.push_str(&format!(
                " {} | {}{}\n",
                gutter,
                indent,
                "^".repeat(span.width_on_line())
            ));
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_advance() {
        let pos = Position::start().advance_str("ab\n\tc");
        assert_eq!(pos, Position::new(5, 2, 3));

        let pos = Position::start().advance('é');
        assert_eq!(pos.offset, 2);
        assert_eq!(pos.column, 2);
    }

    #[test]
    fn test_span_display() {
        let start = Position::new(2, 1, 3);
        let span = Span::new(start, start.advance_str("<="));
        assert_eq!(span.to_string(), "1:3-5");

        let multi = Span::new(Position::start(), Position::new(9, 3, 2));
        assert_eq!(multi.to_string(), "1:1-3:2");
        assert_eq!(Span::single(start).end().column, 4);
    }

    #[test]
    fn test_source_map_lines() {
        let map = SourceMap::new("@\nx = 1;\r\n@");
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line(2), Some("x = 1;"));
        assert_eq!(map.line(0), None);
        assert_eq!(map.line(4), None);
    }

    #[test]
    fn test_excerpt_caret() {
        let map = SourceMap::new("@\nput x;\n@");
        let start = Position::new(6, 2, 5);
        let span = Span::new(start, start.advance('x'));
        let rendered = map.excerpt(&span, "Expected separator");

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Error: Expected separator");
        assert_eq!(lines[1], "  --> 2:5");
        assert_eq!(lines[3], " 2 | put x;");
        assert_eq!(lines[4], "   |     ^");
    }
}
