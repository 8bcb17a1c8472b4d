//! Lexical analyzer driving the scanner, with metrics and limit reporting
//!
//! Invalid lexemes are never errors: they become `invalid` tokens and the
//! scan continues. Over-long lexemes are invalid tokens too. The only failure
//! is the compile-time limit on token count.

use crate::config::compile_time::lexical::{MAX_LEXEME_LENGTH, MAX_TOKEN_COUNT};
use crate::config::runtime::LexicalPreferences;
use crate::lexical::scanner::Scanner;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind};
use crate::utils::Span;
use crate::{log_debug, log_error, log_success, log_warning};
use serde::Serialize;

/// Lexical analysis errors; raised only by the token count limit
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("Too many tokens: more than {limit} at {span}")]
    TooManyTokens { limit: usize, span: Span },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            LexerError::TooManyTokens { span, .. } => *span,
        }
    }

    pub fn severity(&self) -> codes::Severity {
        codes::get_severity(self.error_code().as_str())
    }
}

/// Per-kind token tally
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct TokenCounts {
    pub total: usize,
    pub keywords: usize,
    pub identifiers: usize,
    pub operators: usize,
    pub integers: usize,
    pub reals: usize,
    pub separators: usize,
    pub invalid: usize,
}

impl TokenCounts {
    pub fn record(&mut self, kind: TokenKind) {
        self.total += 1;
        match kind {
            TokenKind::Keyword => self.keywords += 1,
            TokenKind::Identifier => self.identifiers += 1,
            TokenKind::Operator => self.operators += 1,
            TokenKind::Integer => self.integers += 1,
            TokenKind::Real => self.reals += 1,
            TokenKind::Separator => self.separators += 1,
            TokenKind::Invalid => self.invalid += 1,
        }
    }

    pub fn count(&self, kind: TokenKind) -> usize {
        match kind {
            TokenKind::Keyword => self.keywords,
            TokenKind::Identifier => self.identifiers,
            TokenKind::Operator => self.operators,
            TokenKind::Integer => self.integers,
            TokenKind::Real => self.reals,
            TokenKind::Separator => self.separators,
            TokenKind::Invalid => self.invalid,
        }
    }

    pub fn has_invalid(&self) -> bool {
        self.invalid > 0
    }
}

/// Metrics gathered over one tokenization run
#[derive(Debug, Default, Clone, Serialize)]
pub struct LexicalMetrics {
    pub counts: TokenCounts,
    pub line_count: usize,
    pub longest_lexeme: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.counts.record(token.kind());

        if preferences.collect_detailed_metrics {
            self.longest_lexeme = self.longest_lexeme.max(token.lexeme().chars().count());
        }

        if token.kind() == TokenKind::Invalid {
            log_debug!("Invalid lexeme",
                "lexeme" => token.lexeme(),
                "at" => token.span()
            );
        }
    }
}

/// Tokenizer front end with metrics and preference handling
pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences: LexicalPreferences::default(),
        }
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    /// Tokenize comment-free source text, one line at a time
    pub fn tokenize(&mut self, source: &str) -> Result<Vec<Token>, LexerError> {
        self.metrics = LexicalMetrics::default();

        log_debug!("Starting lexical analysis",
            "bytes" => source.len(),
            "max_tokens_allowed" => MAX_TOKEN_COUNT,
            "max_lexeme_length" => MAX_LEXEME_LENGTH
        );

        let mut scanner = Scanner::new();
        let scanned = scanner.scan_source(source).and_then(|()| scanner.finish());

        let tokens = match scanned {
            Ok(tokens) => tokens,
            Err(error) => {
                log_error!(error.error_code(), &error.to_string(),
                    span = error.span(),
                    "limit" => match &error {
                        LexerError::TooManyTokens { limit, .. } => *limit,
                    }
                );
                return Err(error);
            }
        };

        self.metrics.line_count = source.lines().count();
        for token in &tokens {
            self.metrics.record_token(token, &self.preferences);
        }

        if self.metrics.counts.has_invalid() && self.preferences.warn_on_invalid_tokens {
            if let Some(first) = tokens.iter().find(|t| t.kind() == TokenKind::Invalid) {
                log_warning!(codes::warnings::INVALID_TOKENS_PRESENT,
                    "Token stream contains invalid lexemes",
                    span = first.span(),
                    "count" => self.metrics.counts.invalid,
                    "first" => first.lexeme()
                );
            }
        }

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed",
            "token_count" => tokens.len(),
            "keywords" => self.metrics.counts.keywords,
            "identifiers" => self.metrics.counts.identifiers,
            "operators" => self.metrics.counts.operators,
            "invalid" => self.metrics.counts.invalid,
            "lines" => self.metrics.line_count
        );

        Ok(tokens)
    }

    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    pub fn set_preferences(&mut self, preferences: LexicalPreferences) {
        self.preferences = preferences;
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_per_kind() {
        let mut analyzer = LexicalAnalyzer::new();
        let tokens = analyzer.tokenize("x1 = 12 + y;\nif ( 3.5 ) # fi").unwrap();

        let counts = &analyzer.metrics().counts;
        assert_eq!(counts.total, tokens.len());
        assert_eq!(counts.identifiers, 2);
        assert_eq!(counts.operators, 2);
        assert_eq!(counts.integers, 1);
        assert_eq!(counts.reals, 1);
        assert_eq!(counts.keywords, 2);
        assert_eq!(counts.separators, 3);
        assert_eq!(counts.invalid, 1);
        assert_eq!(counts.count(TokenKind::Invalid), 1);
        assert_eq!(analyzer.metrics().line_count, 2);
    }

    #[test]
    fn test_metrics_reset_between_runs() {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer.tokenize("a b c").unwrap();
        analyzer.tokenize("@").unwrap();
        assert_eq!(analyzer.metrics().counts.total, 1);
    }

    #[test]
    fn test_longest_lexeme_requires_detailed_metrics() {
        let preferences = LexicalPreferences {
            collect_detailed_metrics: true,
            ..Default::default()
        };
        let mut analyzer = LexicalAnalyzer::with_preferences(preferences);
        analyzer.tokenize("ab abcdef 1").unwrap();
        assert_eq!(analyzer.metrics().longest_lexeme, 6);

        analyzer.set_preferences(LexicalPreferences {
            collect_detailed_metrics: false,
            ..Default::default()
        });
        analyzer.tokenize("ab abcdef 1").unwrap();
        assert_eq!(analyzer.metrics().longest_lexeme, 0);
    }

    #[test]
    fn test_over_long_lexeme_counts_as_invalid() {
        let source = format!("{} 1", "a".repeat(MAX_LEXEME_LENGTH + 1));
        let mut analyzer = LexicalAnalyzer::new();
        let tokens = analyzer.tokenize(&source).unwrap();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].kind(), TokenKind::Invalid);
        assert_eq!(tokens[0].span().start().column, 1);
        assert_eq!(analyzer.metrics().counts.invalid, 1);
        assert_eq!(analyzer.metrics().counts.integers, 1);
    }

    #[test]
    fn test_lexeme_at_limit_is_accepted() {
        let exact = "a".repeat(MAX_LEXEME_LENGTH);
        let tokens = LexicalAnalyzer::new().tokenize(&exact).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind(), TokenKind::Identifier);
    }

    #[test]
    fn test_error_metadata() {
        let error = LexerError::TooManyTokens {
            limit: MAX_TOKEN_COUNT,
            span: Span::dummy(),
        };
        assert_eq!(error.error_code(), codes::lexical::TOO_MANY_TOKENS);
        assert_eq!(error.span(), Span::dummy());
    }
}
