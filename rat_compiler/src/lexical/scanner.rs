//! Greedy lexeme scanner
//!
//! A four-mode state machine groups consecutive characters of compatible
//! class into candidate lexemes. Completed candidates are finalized through
//! the keyword table and the validating automata. Input is fed one line at a
//! time and any open lexeme is flushed at the end of every line.

use crate::config::compile_time::lexical::{MAX_LEXEME_LENGTH, MAX_TOKEN_COUNT};
use crate::grammar::keywords::Keyword;
use crate::lexical::analyzer::LexerError;
use crate::lexical::automaton::{validate_identifier, validate_number};
use crate::lexical::classifier::{classify, CharClass};
use crate::logging::codes;
use crate::tokens::{is_operator_char, is_separator_char, Token, TokenKind};
use crate::utils::{Position, Span};

/// Coarse scanning mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    Start,
    InIdentifier,
    InNumber,
    InFloat,
}

#[derive(Debug)]
pub struct Scanner {
    tokens: Vec<Token>,
    mode: ScanMode,
    lexeme: String,
    lexeme_start: Position,
    position: Position,
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            mode: ScanMode::Start,
            lexeme: String::new(),
            lexeme_start: Position::start(),
            position: Position::start(),
        }
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Scan every line of `source`, flushing at each line end
    pub fn scan_source(&mut self, source: &str) -> Result<(), LexerError> {
        for line in source.split_inclusive('\n') {
            self.scan_line(line)?;
        }
        Ok(())
    }

    /// Scan one line. The pending lexeme is flushed when the line ends.
    pub fn scan_line(&mut self, line: &str) -> Result<(), LexerError> {
        let mut chars = line.chars().peekable();

        while let Some(&ch) = chars.peek() {
            let class = classify(ch);

            match self.mode {
                ScanMode::Start => {
                    chars.next();
                    let start = self.position;
                    self.position = self.position.advance(ch);

                    if ch.is_whitespace() {
                        continue;
                    }

                    if is_separator_char(ch) {
                        self.emit(TokenKind::Separator, ch.to_string(), start)?;
                    } else if is_operator_char(ch) {
                        let mut operator = ch.to_string();
                        if chars.peek() == Some(&'=') {
                            chars.next();
                            self.position = self.position.advance('=');
                            operator.push('=');
                        }
                        self.emit(TokenKind::Operator, operator, start)?;
                    } else if class == CharClass::Letter {
                        self.open(ScanMode::InIdentifier, ch, start);
                    } else if class == CharClass::Digit {
                        self.open(ScanMode::InNumber, ch, start);
                    } else {
                        self.emit(TokenKind::Invalid, ch.to_string(), start)?;
                    }
                }
                ScanMode::InIdentifier if class.is_alphanumeric() => {
                    self.extend(ch);
                    chars.next();
                }
                ScanMode::InNumber if class == CharClass::Digit => {
                    self.extend(ch);
                    chars.next();
                }
                ScanMode::InNumber if class == CharClass::Dot => {
                    self.extend(ch);
                    chars.next();
                    self.mode = ScanMode::InFloat;
                }
                ScanMode::InFloat if class == CharClass::Digit => {
                    self.extend(ch);
                    chars.next();
                }
                // The character that closes a lexeme is rescanned from Start
                ScanMode::InIdentifier | ScanMode::InNumber | ScanMode::InFloat => {
                    self.flush()?;
                }
            }
        }

        self.flush()
    }

    /// Flush any pending lexeme and hand back the tokens
    pub fn finish(mut self) -> Result<Vec<Token>, LexerError> {
        self.flush()?;
        Ok(self.tokens)
    }

    fn open(&mut self, mode: ScanMode, ch: char, start: Position) {
        self.mode = mode;
        self.lexeme.clear();
        self.lexeme.push(ch);
        self.lexeme_start = start;
    }

    fn extend(&mut self, ch: char) {
        self.lexeme.push(ch);
        self.position = self.position.advance(ch);
    }

    /// Finalize the open lexeme, if any, and return to Start.
    /// A lexeme over the length limit is kept as a single invalid token.
    fn flush(&mut self) -> Result<(), LexerError> {
        let kind = match self.mode {
            ScanMode::Start => return Ok(()),
            _ if self.lexeme.chars().count() > MAX_LEXEME_LENGTH => {
                crate::log_warning!(codes::lexical::LEXEME_TOO_LONG,
                    "Lexeme exceeds the length limit",
                    span = Span::new(self.lexeme_start, self.position),
                    "limit" => MAX_LEXEME_LENGTH
                );
                TokenKind::Invalid
            }
            ScanMode::InIdentifier => {
                if Keyword::from_str(&self.lexeme).is_some() {
                    TokenKind::Keyword
                } else {
                    validate_identifier(&self.lexeme)
                }
            }
            ScanMode::InNumber | ScanMode::InFloat => validate_number(&self.lexeme),
        };

        self.mode = ScanMode::Start;
        let lexeme = std::mem::take(&mut self.lexeme);
        self.emit(kind, lexeme, self.lexeme_start)
    }

    fn emit(&mut self, kind: TokenKind, lexeme: String, start: Position) -> Result<(), LexerError> {
        let span = Span::new(start, start.advance_str(&lexeme));
        if self.tokens.len() >= MAX_TOKEN_COUNT {
            return Err(LexerError::TooManyTokens {
                limit: MAX_TOKEN_COUNT,
                span,
            });
        }
        self.tokens.push(Token::new(kind, lexeme, span));
        Ok(())
    }
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str) -> Vec<(TokenKind, String)> {
        let mut scanner = Scanner::new();
        scanner.scan_source(source).unwrap();
        scanner
            .finish()
            .unwrap()
            .into_iter()
            .map(|t| (t.kind(), t.lexeme().to_string()))
            .collect()
    }

    fn pair(kind: TokenKind, lexeme: &str) -> (TokenKind, String) {
        (kind, lexeme.to_string())
    }

    #[test]
    fn test_identifier_and_keyword() {
        assert_eq!(
            scan("while whilex"),
            vec![
                pair(TokenKind::Keyword, "while"),
                pair(TokenKind::Identifier, "whilex"),
            ]
        );
    }

    #[test]
    fn test_number_modes() {
        assert_eq!(
            scan("12 3.5 7."),
            vec![
                pair(TokenKind::Integer, "12"),
                pair(TokenKind::Real, "3.5"),
                pair(TokenKind::Invalid, "7."),
            ]
        );
    }

    #[test]
    fn test_second_dot_closes_real() {
        assert_eq!(
            scan("1.2.3"),
            vec![
                pair(TokenKind::Real, "1.2"),
                pair(TokenKind::Invalid, "."),
                pair(TokenKind::Integer, "3"),
            ]
        );
    }

    #[test]
    fn test_number_followed_by_letters() {
        assert_eq!(
            scan("12abc"),
            vec![
                pair(TokenKind::Integer, "12"),
                pair(TokenKind::Identifier, "abc"),
            ]
        );
    }

    #[test]
    fn test_closing_character_is_rescanned() {
        assert_eq!(
            scan("f(x)"),
            vec![
                pair(TokenKind::Identifier, "f"),
                pair(TokenKind::Separator, "("),
                pair(TokenKind::Identifier, "x"),
                pair(TokenKind::Separator, ")"),
            ]
        );
    }

    #[test]
    fn test_pending_lexeme_flushed_at_line_end() {
        let mut scanner = Scanner::new();
        scanner.scan_line("abc").unwrap();
        assert_eq!(scanner.mode(), ScanMode::Start);
        assert_eq!(scanner.tokens().len(), 1);

        // Lines never join into one lexeme
        assert_eq!(
            scan("ab\ncd"),
            vec![
                pair(TokenKind::Identifier, "ab"),
                pair(TokenKind::Identifier, "cd"),
            ]
        );
    }

    #[test]
    fn test_spans_track_lines() {
        let mut scanner = Scanner::new();
        scanner.scan_source("x\n  <= 1").unwrap();
        let tokens = scanner.finish().unwrap();

        assert_eq!(tokens[1].lexeme(), "<=");
        assert_eq!(tokens[1].span().start().line, 2);
        assert_eq!(tokens[1].span().start().column, 3);
        assert_eq!(tokens[1].span().end().column, 5);
        assert_eq!(tokens[2].span().start().column, 6);
    }
}
