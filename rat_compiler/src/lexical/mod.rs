//! Lexical analysis for RAT24F
//!
//! Two layers: a greedy scanner groups characters into candidate lexemes and
//! validating automata decide each candidate's final kind.

pub mod analyzer;
pub mod automaton;
pub mod classifier;
pub mod scanner;

use crate::config::compile_time::lexical::{MAX_LEXEME_LENGTH, MAX_TOKEN_COUNT};
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::Token;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics, TokenCounts};
pub use automaton::{validate_identifier, validate_number, Automaton};
pub use classifier::{classify, CharClass};
pub use scanner::{ScanMode, Scanner};

// ============================================================================
// MODULE API
// ============================================================================

/// Tokenize comment-free source text with default preferences
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexerError> {
    LexicalAnalyzer::new().tokenize(source)
}

/// Tokenize with custom runtime preferences
pub fn tokenize_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> Result<Vec<Token>, LexerError> {
    LexicalAnalyzer::with_preferences(preferences).tokenize(source)
}

pub fn create_analyzer() -> LexicalAnalyzer {
    LexicalAnalyzer::new()
}

pub fn create_analyzer_with_preferences(preferences: LexicalPreferences) -> LexicalAnalyzer {
    LexicalAnalyzer::with_preferences(preferences)
}

/// Per-kind counts for an already tokenized sequence
pub fn get_token_counts(tokens: &[Token]) -> TokenCounts {
    let mut counts = TokenCounts::default();
    for token in tokens {
        counts.record(token.kind());
    }
    counts
}

// ============================================================================
// MODULE INITIALIZATION
// ============================================================================

/// Check that every lexical code is registered
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    let required = [
        codes::lexical::INVALID_TOKEN,
        codes::lexical::LEXEME_TOO_LONG,
        codes::lexical::TOO_MANY_TOKENS,
        codes::warnings::INVALID_TOKENS_PRESENT,
        codes::warnings::UNTERMINATED_COMMENT,
    ];

    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    if MAX_TOKEN_COUNT == 0 || MAX_LEXEME_LENGTH == 0 {
        return Err("Lexical limits must be non-zero".to_string());
    }

    crate::log_debug!("Lexical limits initialized",
        "max_token_count" => MAX_TOKEN_COUNT,
        "max_lexeme_length" => MAX_LEXEME_LENGTH
    );

    Ok(())
}
