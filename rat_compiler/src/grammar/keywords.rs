//! RAT24F reserved words
//!
//! The keyword set is fixed; a lexeme is a keyword only on an exact,
//! case-sensitive match.
use serde::{Deserialize, Serialize};

/// RAT24F reserved words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    // === DEFINITIONS ===
    Function,

    // === QUALIFIERS ===
    Integer,
    Boolean,
    Real,

    // === STATEMENTS ===
    If,
    Else,
    Fi,
    Return,
    Put,
    Get,
    While,

    // === BOOLEAN LITERALS ===
    True,
    False,
}

impl Keyword {
    /// Every keyword, in declaration order
    pub const ALL: [Keyword; 13] = [
        Self::Function,
        Self::Integer,
        Self::Boolean,
        Self::Real,
        Self::If,
        Self::Else,
        Self::Fi,
        Self::Return,
        Self::Put,
        Self::Get,
        Self::While,
        Self::True,
        Self::False,
    ];

    /// Get the exact string representation as it appears in source
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Real => "real",
            Self::If => "if",
            Self::Else => "else",
            Self::Fi => "fi",
            Self::Return => "return",
            Self::Put => "put",
            Self::Get => "get",
            Self::While => "while",
            Self::True => "true",
            Self::False => "false",
        }
    }

    /// Exact lookup; anything else is not a keyword
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "function" => Some(Self::Function),
            "integer" => Some(Self::Integer),
            "boolean" => Some(Self::Boolean),
            "real" => Some(Self::Real),
            "if" => Some(Self::If),
            "else" => Some(Self::Else),
            "fi" => Some(Self::Fi),
            "return" => Some(Self::Return),
            "put" => Some(Self::Put),
            "get" => Some(Self::Get),
            "while" => Some(Self::While),
            "true" => Some(Self::True),
            "false" => Some(Self::False),
            _ => None,
        }
    }

    /// Check if this keyword names a declaration qualifier
    pub const fn is_qualifier(self) -> bool {
        matches!(self, Self::Integer | Self::Boolean | Self::Real)
    }

    /// Check if this keyword is a boolean literal
    pub const fn is_boolean_literal(self) -> bool {
        matches!(self, Self::True | Self::False)
    }

    /// Check if this keyword opens a statement
    pub const fn starts_statement(self) -> bool {
        matches!(
            self,
            Self::If | Self::Return | Self::Put | Self::Get | Self::While
        )
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check if a word is reserved
pub fn is_reserved_keyword(word: &str) -> bool {
    Keyword::from_str(word).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_str(keyword.as_str()), Some(keyword));
        }
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert!(is_reserved_keyword("while"));
        assert!(!is_reserved_keyword("While"));
        assert!(!is_reserved_keyword("WHILE"));
        assert!(!is_reserved_keyword("whiles"));
    }

    #[test]
    fn test_keyword_classes() {
        assert!(Keyword::Real.is_qualifier());
        assert!(!Keyword::Function.is_qualifier());
        assert!(Keyword::False.is_boolean_literal());
        assert!(Keyword::Put.starts_statement());
        assert!(!Keyword::Fi.starts_statement());
        assert!(!Keyword::Else.starts_statement());
    }
}
