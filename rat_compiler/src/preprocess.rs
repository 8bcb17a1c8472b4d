//! Comment stripping ahead of tokenization
//!
//! `[*` ... `*]` comments may span lines and do not nest. Every character
//! inside a comment (delimiters included) becomes a space, while whitespace
//! is kept as is, so token lines and columns still match the original file.

use crate::logging::codes;
use crate::utils::{Position, Span};
use crate::{log_success, log_warning};

const OPEN: &str = "[*";
const CLOSE: &str = "*]";

/// Source text with comments blanked out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrippedSource {
    pub text: String,
    pub comments_removed: usize,
    /// Start of a comment that runs to end of input
    pub unterminated_at: Option<Position>,
}

/// Blank out every comment region in `source`
pub fn strip_comments(source: &str) -> StrippedSource {
    let mut text = String::with_capacity(source.len());
    let mut comments_removed = 0;
    let mut unterminated_at = None;

    let mut rest = source;
    let mut position = Position::start();

    while let Some(open) = rest.find(OPEN) {
        let (code, after_code) = rest.split_at(open);
        text.push_str(code);
        position = position.advance_str(code);
        comments_removed += 1;

        let comment_len = match after_code[OPEN.len()..].find(CLOSE) {
            Some(close) => OPEN.len() + close + CLOSE.len(),
            None => {
                unterminated_at = Some(position);
                after_code.len()
            }
        };

        let (comment, remainder) = after_code.split_at(comment_len);
        text.extend(comment.chars().map(blank));
        position = position.advance_str(comment);
        rest = remainder;
    }
    text.push_str(rest);

    if let Some(start) = unterminated_at {
        log_warning!(codes::warnings::UNTERMINATED_COMMENT,
            "Comment is never closed; ignoring the rest of the input",
            span = Span::single(start)
        );
    }

    if comments_removed > 0 {
        log_success!(codes::success::COMMENTS_STRIPPED, "Comments stripped",
            "count" => comments_removed
        );
    }

    StrippedSource {
        text,
        comments_removed,
        unterminated_at,
    }
}

fn blank(ch: char) -> char {
    if ch.is_whitespace() {
        ch
    } else {
        ' '
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_comments() {
        let stripped = strip_comments("@ x = 1; @");
        assert_eq!(stripped.text, "@ x = 1; @");
        assert_eq!(stripped.comments_removed, 0);
        assert!(stripped.unterminated_at.is_none());
    }

    #[test]
    fn test_inline_comment_is_blanked() {
        let stripped = strip_comments("a [* note *] b");
        assert_eq!(stripped.text, "a            b");
        assert_eq!(stripped.comments_removed, 1);
    }

    #[test]
    fn test_multiline_comment_keeps_line_structure() {
        let source = "x [* one\ntwo *] y\nz";
        let stripped = strip_comments(source);

        assert_eq!(stripped.text.lines().count(), source.lines().count());
        assert_eq!(stripped.text, "x       \n       y\nz");
    }

    #[test]
    fn test_comments_do_not_nest() {
        let stripped = strip_comments("[* [* inner *] tail *]");
        assert_eq!(stripped.comments_removed, 1);
        assert_eq!(stripped.text.trim(), "tail *]");
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        let stripped = strip_comments("a\nb [* open\nc");
        assert_eq!(stripped.text, "a\nb        \n ");
        assert_eq!(stripped.unterminated_at, Some(Position::new(4, 2, 3)));
    }

    #[test]
    fn test_multiple_comments() {
        let stripped = strip_comments("[*a*]x[*b*]y");
        assert_eq!(stripped.text, "     x     y");
        assert_eq!(stripped.comments_removed, 2);
    }
}
