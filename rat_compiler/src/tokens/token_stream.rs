//! Forward-only token stream consumed by the recognizer
//!
//! The cursor never moves backwards. Advancing past the last token is a
//! no-op and the last token remains `current()`; callers that must tell a
//! consumed final token from an unconsumed one use `lookahead()`, which
//! yields `None` once every token has been consumed.

use crate::tokens::token::{Token, TokenKind};
use crate::utils::{Position, Span};

#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    /// Index of the next unconsumed token; equals `tokens.len()` once exhausted
    position: usize,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    // === CORE NAVIGATION ===

    /// Token under the cursor. Past the end this stays the last token;
    /// `None` only for an empty stream.
    pub fn current(&self) -> Option<&Token> {
        self.tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
    }

    /// Next unconsumed token, or `None` once the stream is exhausted
    pub fn lookahead(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Kind of the next unconsumed token
    pub fn lookahead_kind(&self) -> Option<TokenKind> {
        self.lookahead().map(Token::kind)
    }

    /// Peek ahead by n positions past the cursor without consuming
    pub fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    /// Move the cursor forward by one; no-op once exhausted
    pub fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Span of the current token, or a dummy span for an empty stream
    pub fn current_span(&self) -> Span {
        self.current().map(Token::span).unwrap_or_else(Span::dummy)
    }

    /// Zero-width span just after the last token, used for end-of-input errors
    pub fn end_span(&self) -> Span {
        match self.tokens.last() {
            Some(token) => Span::new(token.span().end(), token.span().end()),
            None => Span::new(Position::start(), Position::start()),
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.position >= self.tokens.len()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn remaining_count(&self) -> usize {
        self.tokens.len().saturating_sub(self.position)
    }

    /// Tokens not yet consumed
    pub fn remaining_tokens(&self) -> &[Token] {
        &self.tokens[self.position.min(self.tokens.len())..]
    }

    pub fn all_tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Diagnostic summary of cursor state
    pub fn diagnostic(&self) -> String {
        let current_info = match self.lookahead() {
            Some(token) => format!("{} '{}' at {}", token.kind(), token.lexeme(), token.span()),
            None => "<end of input>".to_string(),
        };

        format!(
            "TokenStream(pos: {}/{}, current: {})",
            self.position,
            self.tokens.len(),
            current_info
        )
    }
}

/// Builds streams from (kind, lexeme) pairs with computed spans
#[derive(Debug)]
pub struct TokenStreamBuilder {
    tokens: Vec<Token>,
    current_position: Position,
}

impl TokenStreamBuilder {
    pub fn new() -> Self {
        Self {
            tokens: Vec::new(),
            current_position: Position::start(),
        }
    }

    /// Add a token; lexemes are laid out separated by single spaces
    pub fn push_token(mut self, kind: TokenKind, lexeme: &str) -> Self {
        let start = self.current_position;
        let end = start.advance_str(lexeme);

        self.tokens.push(Token::new(kind, lexeme, Span::new(start, end)));
        self.current_position = end.advance(' ');
        self
    }

    pub fn build(self) -> TokenStream {
        TokenStream::new(self.tokens)
    }
}

impl Default for TokenStreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TokenStream {
        TokenStreamBuilder::new()
            .push_token(TokenKind::Separator, "@")
            .push_token(TokenKind::Identifier, "x")
            .push_token(TokenKind::Separator, "@")
            .build()
    }

    #[test]
    fn test_forward_navigation() {
        let mut stream = sample();
        assert_eq!(stream.current().unwrap().lexeme(), "@");
        assert_eq!(stream.peek_ahead(1).unwrap().lexeme(), "x");

        stream.advance();
        assert_eq!(stream.current().unwrap().kind(), TokenKind::Identifier);
        assert_eq!(stream.remaining_count(), 2);
    }

    #[test]
    fn test_advance_past_end_is_noop() {
        let mut stream = sample();
        for _ in 0..10 {
            stream.advance();
        }

        assert!(stream.is_at_end());
        assert_eq!(stream.position(), 3);
        assert_eq!(stream.current().unwrap().lexeme(), "@");
        assert!(stream.lookahead().is_none());
        assert!(stream.remaining_tokens().is_empty());
    }

    #[test]
    fn test_empty_stream() {
        let mut stream = TokenStream::new(Vec::new());
        assert!(stream.is_empty());
        assert!(stream.current().is_none());
        stream.advance();
        assert_eq!(stream.position(), 0);
        assert_eq!(stream.current_span(), Span::dummy());
    }

    #[test]
    fn test_builder_spans() {
        let stream = sample();
        let x = &stream.all_tokens()[1];
        assert_eq!(x.span().start().column, 3);
        assert_eq!(stream.end_span().start().column, 6);
    }

    #[test]
    fn test_diagnostic() {
        let mut stream = sample();
        assert!(stream.diagnostic().contains("pos: 0/3"));
        stream.advance();
        stream.advance();
        stream.advance();
        assert!(stream.diagnostic().contains("<end of input>"));
    }
}
