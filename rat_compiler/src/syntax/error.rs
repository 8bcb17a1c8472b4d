//! Structural errors raised by the recognizer
//!
//! Every error is fatal to the recognition run: the first one propagates to
//! `syntax::recognize` and nothing after it is attempted.

use crate::logging::{codes, Code};
use crate::tokens::{Token, TokenKind};
use crate::utils::Span;

pub type SyntaxResult<T> = Result<T, SyntaxError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Unexpected token {found}, expected {expected}, lexeme: {lexeme} at {span}")]
    TokenMismatch {
        expected: TokenKind,
        found: TokenKind,
        lexeme: String,
        span: Span,
    },

    #[error("Unexpected end of input, expected {expected} after '{last_lexeme}' at {span}")]
    UnexpectedEndOfInput {
        expected: String,
        last_lexeme: String,
        span: Span,
    },

    #[error("Expected a qualifier, but got: {lexeme} at {span}")]
    ExpectedQualifier { lexeme: String, span: Span },

    #[error("Unexpected token {lexeme}, expected a relational operator at {span}")]
    ExpectedRelationalOperator { lexeme: String, span: Span },

    #[error("Unexpected statement: {lexeme} at {span}")]
    InvalidStatement { lexeme: String, span: Span },

    #[error("Invalid factor: {lexeme} at {span}")]
    InvalidFactor { lexeme: String, span: Span },

    #[error("Empty token stream - no tokens to recognize")]
    EmptyTokenStream,

    #[error("Maximum nesting depth of {limit} exceeded at {span}")]
    MaxParseDepth { limit: usize, span: Span },

    #[error("Derivation trace exceeds {limit} entries")]
    TraceLimitExceeded { limit: usize },
}

impl SyntaxError {
    pub fn token_mismatch(expected: TokenKind, found: &Token) -> Self {
        Self::TokenMismatch {
            expected,
            found: found.kind(),
            lexeme: found.lexeme().to_string(),
            span: found.span(),
        }
    }

    /// `last` is the final token of the stream, if there was one
    pub fn unexpected_end_of_input(expected: impl Into<String>, last: Option<&Token>, span: Span) -> Self {
        Self::UnexpectedEndOfInput {
            expected: expected.into(),
            last_lexeme: last.map(|t| t.lexeme().to_string()).unwrap_or_default(),
            span,
        }
    }

    pub fn expected_qualifier(found: &Token) -> Self {
        Self::ExpectedQualifier {
            lexeme: found.lexeme().to_string(),
            span: found.span(),
        }
    }

    pub fn expected_relational_operator(found: &Token) -> Self {
        Self::ExpectedRelationalOperator {
            lexeme: found.lexeme().to_string(),
            span: found.span(),
        }
    }

    pub fn invalid_statement(found: &Token) -> Self {
        Self::InvalidStatement {
            lexeme: found.lexeme().to_string(),
            span: found.span(),
        }
    }

    pub fn invalid_factor(found: &Token) -> Self {
        Self::InvalidFactor {
            lexeme: found.lexeme().to_string(),
            span: found.span(),
        }
    }

    pub fn max_parse_depth(limit: usize, span: Span) -> Self {
        Self::MaxParseDepth { limit, span }
    }

    /// Get error code for global logging system
    pub fn error_code(&self) -> Code {
        match self {
            Self::TokenMismatch { .. } => codes::syntax::TOKEN_MISMATCH,
            Self::UnexpectedEndOfInput { .. } => codes::syntax::UNEXPECTED_END_OF_INPUT,
            Self::ExpectedQualifier { .. } => codes::syntax::EXPECTED_QUALIFIER,
            Self::ExpectedRelationalOperator { .. } => codes::syntax::EXPECTED_RELATIONAL_OPERATOR,
            Self::InvalidStatement { .. } => codes::syntax::INVALID_STATEMENT,
            Self::InvalidFactor { .. } => codes::syntax::INVALID_FACTOR,
            Self::EmptyTokenStream => codes::syntax::EMPTY_TOKEN_STREAM,
            Self::MaxParseDepth { .. } => codes::syntax::MAX_RECURSION_DEPTH,
            Self::TraceLimitExceeded { .. } => codes::syntax::TRACE_LIMIT_EXCEEDED,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::TokenMismatch { span, .. }
            | Self::UnexpectedEndOfInput { span, .. }
            | Self::ExpectedQualifier { span, .. }
            | Self::ExpectedRelationalOperator { span, .. }
            | Self::InvalidStatement { span, .. }
            | Self::InvalidFactor { span, .. }
            | Self::MaxParseDepth { span, .. } => Some(*span),
            Self::EmptyTokenStream | Self::TraceLimitExceeded { .. } => None,
        }
    }

    /// Resource limits, as opposed to grammar violations in the input
    pub fn is_limit_violation(&self) -> bool {
        matches!(
            self,
            Self::MaxParseDepth { .. } | Self::TraceLimitExceeded { .. }
        )
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn description(&self) -> &'static str {
        codes::get_description(self.error_code().as_str())
    }

    pub fn recommended_action(&self) -> &'static str {
        codes::get_action(self.error_code().as_str())
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Message followed by the recommended fix
    pub fn enhanced_message(&self) -> String {
        format!("{} ({})", self, self.recommended_action())
    }
}
