//! Syntax analysis: LL(1) recognition of RAT24F token streams
//!
//! No tree is built. The product of a run is the derivation trace together
//! with the outcome; on failure the trace holds everything recorded up to
//! the first structural error.

mod error;
mod parser;
mod trace;

pub use error::{SyntaxError, SyntaxResult};
pub use parser::{create_recognizer, Recognizer};
pub use trace::{DerivationTrace, TraceEntry};

use crate::config::compile_time::syntax::{MAX_PARSE_DEPTH, MAX_TRACE_ENTRIES};
use crate::config::runtime::SyntaxPreferences;
use crate::logging::codes;
use crate::tokens::TokenStream;
use crate::{log_debug, log_success};

/// Outcome of one recognition run
#[derive(Debug, Clone)]
pub struct Recognition {
    pub trace: DerivationTrace,
    pub result: SyntaxResult<()>,
    pub tokens_consumed: usize,
    /// Tokens left after the closing '@' of a successful run
    pub trailing_tokens: usize,
}

impl Recognition {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn error(&self) -> Option<&SyntaxError> {
        self.result.as_ref().err()
    }
}

/// Recognize a token stream with default preferences
pub fn recognize(tokens: TokenStream) -> Recognition {
    recognize_with_preferences(tokens, SyntaxPreferences::default())
}

pub fn recognize_with_preferences(
    tokens: TokenStream,
    preferences: SyntaxPreferences,
) -> Recognition {
    log_debug!("Starting syntax analysis", "tokens" => tokens.len());

    let mut recognizer = Recognizer::with_preferences(tokens, preferences);
    let result = recognizer.recognize();

    let tokens_consumed = recognizer.tokens().position();
    let trailing_tokens = match result {
        Ok(()) => recognizer.tokens().remaining_count(),
        Err(_) => 0,
    };

    if result.is_ok() {
        log_success!(codes::success::RECOGNITION_COMPLETE,
            "Syntax analysis completed successfully",
            "rules_applied" => recognizer.trace().rules().count(),
            "tokens_matched" => recognizer.trace().match_count(),
            "trailing_tokens" => trailing_tokens
        );
    }

    Recognition {
        trace: recognizer.into_trace(),
        result,
        tokens_consumed,
        trailing_tokens,
    }
}

/// Check that every syntax code is registered
pub fn init_syntax_logging() -> Result<(), String> {
    let required = [
        codes::syntax::UNEXPECTED_END_OF_INPUT,
        codes::syntax::EMPTY_TOKEN_STREAM,
        codes::syntax::EXPECTED_QUALIFIER,
        codes::syntax::EXPECTED_RELATIONAL_OPERATOR,
        codes::syntax::INVALID_STATEMENT,
        codes::syntax::INVALID_FACTOR,
        codes::syntax::TOKEN_MISMATCH,
        codes::syntax::MAX_RECURSION_DEPTH,
        codes::syntax::TRACE_LIMIT_EXCEEDED,
        codes::warnings::TRAILING_TOKENS,
    ];

    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Syntax code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("Syntax limits initialized",
        "max_parse_depth" => MAX_PARSE_DEPTH,
        "max_trace_entries" => MAX_TRACE_ENTRIES
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{FactorForm, Production, StatementForm};
    use crate::lexical;
    use crate::tokens::TokenKind;
    use assert_matches::assert_matches;

    fn run(source: &str) -> Recognition {
        let tokens = lexical::tokenize(source).unwrap();
        recognize(TokenStream::new(tokens))
    }

    fn rule_texts(recognition: &Recognition) -> Vec<String> {
        recognition.trace.rules().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_minimal_program() {
        let recognition = run("@ @");
        assert!(recognition.is_success());

        let entries = recognition.trace.entries();
        assert_matches!(
            entries.first(),
            Some(TraceEntry::Rule { production: Production::Rat24F })
        );
        assert_eq!(
            recognition.trace.matches().last(),
            Some((TokenKind::Separator, "@"))
        );
        assert_eq!(recognition.tokens_consumed, 2);
    }

    #[test]
    fn test_missing_trailing_marker() {
        let recognition = run("@ x = 1;");
        assert_matches!(
            recognition.error(),
            Some(SyntaxError::UnexpectedEndOfInput { expected, .. }) if expected == "separator"
        );
        // Everything up to the failure is kept
        assert_eq!(recognition.trace.match_count(), 5);
    }

    #[test]
    fn test_assignment_consumes_six_tokens() {
        let recognition = run("@ x1 = 12 + y; @");
        assert!(recognition.is_success());

        let matches: Vec<_> = recognition.trace.matches().collect();
        assert_eq!(
            &matches[1..7],
            &[
                (TokenKind::Identifier, "x1"),
                (TokenKind::Operator, "="),
                (TokenKind::Integer, "12"),
                (TokenKind::Operator, "+"),
                (TokenKind::Identifier, "y"),
                (TokenKind::Separator, ";"),
            ]
        );

        let rules = rule_texts(&recognition);
        let assign = rules
            .iter()
            .position(|r| r == "<Statement> -> <Assign>")
            .unwrap();
        assert_eq!(
            &rules[assign..assign + 10],
            &[
                "<Statement> -> <Assign>",
                "<Assign> -> <Identifier> = <Expression>;",
                "<Expression> -> <Term> <Expression Prime>",
                "<Term> -> <Factor> <Term Prime>",
                "<Factor> -> <Integer>",
                "<Term Prime> -> ε",
                "<Expression Prime> -> + <Term> <Expression Prime>",
                "<Term> -> <Factor> <Term Prime>",
                "<Factor> -> <Identifier>",
                "<Term Prime> -> ε",
            ]
        );
        assert_eq!(rules[assign + 10], "<Expression Prime> -> ε");
    }

    #[test]
    fn test_precedence_is_structural() {
        let recognition = run("@ x = a + b * c; @");
        assert!(recognition.is_success());

        let rules = rule_texts(&recognition);
        let plus = rules
            .iter()
            .position(|r| r.starts_with("<Expression Prime> -> +"))
            .unwrap();
        let times = rules
            .iter()
            .position(|r| r.starts_with("<Term Prime> -> *"))
            .unwrap();
        // '*' is reduced inside the term that follows '+'
        assert!(times > plus);
    }

    #[test]
    fn test_function_definitions_and_declarations() {
        let source = "\
function convert (fahr integer) integer c; { c = 5 * (fahr - 32) / 9; return c; }
function noop () { return; }
@
integer low, high;
real step;
get (low, high);
while (low <= high) { put (convert(low)); low = low + 1; }
@";
        let recognition = run(source);
        assert!(recognition.is_success(), "{:?}", recognition.error());

        let rules: Vec<Production> = recognition.trace.rules().collect();
        assert!(rules.contains(&Production::OptFunctionDefinitions));
        assert!(rules.contains(&Production::NoParameterList));
        assert!(rules.contains(&Production::Factor(FactorForm::Call)));
        assert!(rules.contains(&Production::Statement(StatementForm::Scan)));
        assert!(rules.contains(&Production::Statement(StatementForm::While)));
        assert_eq!(
            rules
                .iter()
                .filter(|p| matches!(p, Production::Function))
                .count(),
            2
        );
    }

    #[test]
    fn test_if_with_and_without_else() {
        let recognition = run("@ if (a == b) x = 1; fi if (a != b) x = 1; else { x = 2; } fi @");
        assert!(recognition.is_success(), "{:?}", recognition.error());

        let else_count = recognition
            .trace
            .matches()
            .filter(|(_, lexeme)| *lexeme == "else")
            .count();
        assert_eq!(else_count, 1);
    }

    #[test]
    fn test_boolean_and_real_factors() {
        let recognition = run("@ boolean done; done = true; r = 2.5 * (r - 1.0); @");
        assert!(recognition.is_success(), "{:?}", recognition.error());

        let rules: Vec<Production> = recognition.trace.rules().collect();
        assert!(rules.contains(&Production::Factor(FactorForm::Boolean)));
        assert!(rules.contains(&Production::Factor(FactorForm::Real)));
        assert!(rules.contains(&Production::Factor(FactorForm::Parenthesized)));
    }

    #[test]
    fn test_invalid_factor() {
        let recognition = run("@ x = * 2; @");
        assert_matches!(
            recognition.error(),
            Some(SyntaxError::InvalidFactor { lexeme, .. }) if lexeme == "*"
        );
    }

    #[test]
    fn test_terminator_keyword_is_not_a_statement() {
        let recognition = run("@ x = 1; fi @");
        assert_matches!(
            recognition.error(),
            Some(SyntaxError::InvalidStatement { lexeme, .. }) if lexeme == "fi"
        );
    }

    #[test]
    fn test_missing_qualifier() {
        let recognition = run("function f (a b) { } @ @");
        assert_matches!(
            recognition.error(),
            Some(SyntaxError::ExpectedQualifier { lexeme, .. }) if lexeme == "b"
        );

        let recognition = run("function f (a, b) { } @ @");
        assert_matches!(
            recognition.error(),
            Some(SyntaxError::ExpectedQualifier { lexeme, .. }) if lexeme == ")"
        );
    }

    #[test]
    fn test_condition_requires_relational_operator() {
        let recognition = run("@ while (x + 1) x = 0; @");
        assert_matches!(
            recognition.error(),
            Some(SyntaxError::ExpectedRelationalOperator { lexeme, .. }) if lexeme == ")"
        );
    }

    #[test]
    fn test_trailing_tokens_do_not_fail() {
        let recognition = run("@ @ x");
        assert!(recognition.is_success());
        assert_eq!(recognition.trailing_tokens, 1);
    }

    #[test]
    fn test_invalid_token_fails_match() {
        let recognition = run("@ x = 1.; @");
        assert_matches!(
            recognition.error(),
            Some(SyntaxError::InvalidFactor { lexeme, .. }) if lexeme == "1."
        );
    }

    #[test]
    fn test_init_logging() {
        assert!(init_syntax_logging().is_ok());
    }
}
