//! FIRST-set dispatch for grammar alternatives
//!
//! Each enum names the alternatives of one nonterminal and `from_token`
//! decides, from the lookahead token alone, which alternative applies.
//! `None` means the token is outside the nonterminal's FIRST set.

use crate::grammar::keywords::Keyword;
use crate::tokens::{Token, TokenKind};
use serde::Serialize;

/// Alternatives of `<Statement>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatementForm {
    Compound,
    Assign,
    If,
    Return,
    Print,
    Scan,
    While,
}

impl StatementForm {
    pub fn from_token(token: &Token) -> Option<Self> {
        match token.kind() {
            TokenKind::Identifier => Some(Self::Assign),
            TokenKind::Separator if token.is_separator('{') => Some(Self::Compound),
            TokenKind::Keyword => match token.as_keyword()? {
                Keyword::If => Some(Self::If),
                Keyword::Return => Some(Self::Return),
                Keyword::Put => Some(Self::Print),
                Keyword::Get => Some(Self::Scan),
                Keyword::While => Some(Self::While),
                _ => None,
            },
            _ => None,
        }
    }

    /// Nonterminal name as written in rule texts
    pub const fn nonterminal(self) -> &'static str {
        match self {
            Self::Compound => "<Compound>",
            Self::Assign => "<Assign>",
            Self::If => "<If>",
            Self::Return => "<Return>",
            Self::Print => "<Print>",
            Self::Scan => "<Scan>",
            Self::While => "<While>",
        }
    }
}

/// Whether the statement list takes another iteration.
///
/// The loop continues on any identifier, keyword or `{`; a keyword that does
/// not open a statement is then rejected by `<Statement>` itself.
pub fn continues_statement_list(token: &Token) -> bool {
    match token.kind() {
        TokenKind::Identifier | TokenKind::Keyword => true,
        TokenKind::Separator => token.is_separator('{'),
        _ => false,
    }
}

/// Alternatives of `<Factor>` decidable from the first token.
/// The call form `<Identifier> ( <IDs> )` is only known after the identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FactorForm {
    Identifier,
    Call,
    Integer,
    Real,
    Boolean,
    Parenthesized,
}

impl FactorForm {
    pub fn from_token(token: &Token) -> Option<Self> {
        match token.kind() {
            TokenKind::Identifier => Some(Self::Identifier),
            TokenKind::Integer => Some(Self::Integer),
            TokenKind::Real => Some(Self::Real),
            TokenKind::Keyword => token
                .as_keyword()
                .filter(|k| k.is_boolean_literal())
                .map(|_| Self::Boolean),
            TokenKind::Separator if token.is_separator('(') => Some(Self::Parenthesized),
            _ => None,
        }
    }
}

/// `<Qualifier>` keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Qualifier {
    Integer,
    Boolean,
    Real,
}

impl Qualifier {
    pub fn from_token(token: &Token) -> Option<Self> {
        match token.as_keyword()? {
            Keyword::Integer => Some(Self::Integer),
            Keyword::Boolean => Some(Self::Boolean),
            Keyword::Real => Some(Self::Real),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => Keyword::Integer.as_str(),
            Self::Boolean => Keyword::Boolean.as_str(),
            Self::Real => Keyword::Real.as_str(),
        }
    }
}

/// `<Relop>` operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationalOperator {
    Equal,
    NotEqual,
    Greater,
    Less,
    LessOrEqual,
    GreaterOrEqual,
}

impl RelationalOperator {
    pub fn from_token(token: &Token) -> Option<Self> {
        if token.kind() != TokenKind::Operator {
            return None;
        }
        match token.lexeme() {
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            ">" => Some(Self::Greater),
            "<" => Some(Self::Less),
            "<=" => Some(Self::LessOrEqual),
            ">=" => Some(Self::GreaterOrEqual),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Greater => ">",
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::GreaterOrEqual => ">=",
        }
    }
}

/// Operators of `<Expression Prime>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AdditiveOperator {
    Plus,
    Minus,
}

impl AdditiveOperator {
    pub fn from_token(token: &Token) -> Option<Self> {
        if token.is_operator("+") {
            Some(Self::Plus)
        } else if token.is_operator("-") {
            Some(Self::Minus)
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
        }
    }
}

/// Operators of `<Term Prime>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MultiplicativeOperator {
    Times,
    Divide,
}

impl MultiplicativeOperator {
    pub fn from_token(token: &Token) -> Option<Self> {
        if token.is_operator("*") {
            Some(Self::Times)
        } else if token.is_operator("/") {
            Some(Self::Divide)
        } else {
            None
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Times => "*",
            Self::Divide => "/",
        }
    }
}
