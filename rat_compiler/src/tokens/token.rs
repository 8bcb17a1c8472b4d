//! Token kinds and the immutable token record
//!
//! A token's kind is decided once, when the scanner finalizes the lexeme,
//! and never revised afterwards.
use crate::grammar::keywords::Keyword;
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator characters, each emitted as its own token
pub const SEPARATORS: [char; 9] = ['(', ')', ';', ':', ',', '{', '}', '$', '@'];

/// Characters that open an operator lexeme
pub const OPERATOR_STARTERS: [char; 8] = ['+', '-', '*', '/', '<', '>', '=', '!'];

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Keyword,
    Identifier,
    Operator,
    Integer,
    Real,
    Separator,
    Invalid,
}

impl TokenKind {
    pub const ALL: [TokenKind; 7] = [
        Self::Keyword,
        Self::Identifier,
        Self::Operator,
        Self::Integer,
        Self::Real,
        Self::Separator,
        Self::Invalid,
    ];

    /// Lowercase name used in token tables and traces
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Keyword => "keyword",
            Self::Identifier => "identifier",
            Self::Operator => "operator",
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Separator => "separator",
            Self::Invalid => "invalid",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() so width specifiers like {:<15} apply
        f.pad(self.as_str())
    }
}

/// A classified lexeme with its source location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    kind: TokenKind,
    lexeme: String,
    span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        let lexeme = lexeme.into();
        debug_assert!(!lexeme.is_empty(), "token lexeme must not be empty");
        Self { kind, lexeme, span }
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// The keyword this token spells, if it is a keyword token
    pub fn as_keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => Keyword::from_str(&self.lexeme),
            _ => None,
        }
    }

    /// Check for a specific keyword
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        self.as_keyword() == Some(keyword)
    }

    /// Check for a specific separator character
    pub fn is_separator(&self, separator: char) -> bool {
        self.kind == TokenKind::Separator && self.lexeme.chars().eq(std::iter::once(separator))
    }

    /// Check for a specific operator lexeme
    pub fn is_operator(&self, operator: &str) -> bool {
        self.kind == TokenKind::Operator && self.lexeme == operator
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10} {}", self.kind, self.lexeme)
    }
}

/// Check if a character is a separator
pub fn is_separator_char(ch: char) -> bool {
    SEPARATORS.contains(&ch)
}

/// Check if a character opens an operator
pub fn is_operator_char(ch: char) -> bool {
    OPERATOR_STARTERS.contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_display_honours_width() {
        assert_eq!(format!("{:<12}|", TokenKind::Real), "real        |");
        assert_eq!(TokenKind::Separator.to_string(), "separator");
    }

    #[test]
    fn test_token_display_matches_table_row() {
        let token = Token::new(TokenKind::Identifier, "x1", Span::dummy());
        assert_eq!(token.to_string(), "identifier x1");

        let token = Token::new(TokenKind::Operator, "<=", Span::dummy());
        assert_eq!(token.to_string(), "operator   <=");
    }

    #[test]
    fn test_token_predicates() {
        let keyword = Token::new(TokenKind::Keyword, "while", Span::dummy());
        assert!(keyword.is_keyword(Keyword::While));
        assert!(!keyword.is_keyword(Keyword::If));

        let identifier = Token::new(TokenKind::Identifier, "while2", Span::dummy());
        assert_eq!(identifier.as_keyword(), None);

        let at = Token::new(TokenKind::Separator, "@", Span::dummy());
        assert!(at.is_separator('@'));
        assert!(!at.is_separator('$'));

        let op = Token::new(TokenKind::Operator, "!=", Span::dummy());
        assert!(op.is_operator("!="));
        assert!(!op.is_operator("!"));
    }

    #[test]
    fn test_character_sets() {
        for ch in "();:,{}$@".chars() {
            assert!(is_separator_char(ch));
        }
        for ch in "+-*/<>=!".chars() {
            assert!(is_operator_char(ch));
        }
        assert!(!is_separator_char('.'));
        assert!(!is_operator_char('%'));
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&TokenKind::Integer).unwrap();
        assert_eq!(json, "\"integer\"");
    }
}
