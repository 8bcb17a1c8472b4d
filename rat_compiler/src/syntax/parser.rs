//! LL(1) recursive-descent recognizer for RAT24F
//!
//! One procedure per nonterminal. Each procedure records the production it
//! applies before consuming that production's tokens, chooses alternatives
//! from the single lookahead token, and never backtracks. The first error
//! aborts the whole run.

use crate::config::compile_time::syntax::MAX_PARSE_DEPTH;
use crate::config::runtime::SyntaxPreferences;
use crate::grammar::{
    continues_statement_list, AdditiveOperator, FactorForm, Keyword, MultiplicativeOperator,
    Production, Qualifier, RelationalOperator, StatementForm,
};
use crate::logging::codes;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::syntax::trace::DerivationTrace;
use crate::tokens::{Token, TokenKind, TokenStream};
use crate::{log_debug, log_error, log_warning};

pub struct Recognizer {
    tokens: TokenStream,
    trace: DerivationTrace,
    /// Nonterminals entered and not yet completed; left in place on failure
    context_stack: Vec<&'static str>,
    preferences: SyntaxPreferences,
}

impl Recognizer {
    pub fn new(tokens: TokenStream) -> Self {
        Self::with_preferences(tokens, SyntaxPreferences::default())
    }

    pub fn with_preferences(tokens: TokenStream, preferences: SyntaxPreferences) -> Self {
        log_debug!("Creating RAT24F recognizer", "tokens" => tokens.len());

        Self {
            tokens,
            trace: DerivationTrace::new(),
            context_stack: Vec::new(),
            preferences,
        }
    }

    /// Recognize the whole stream as one `<Rat24F>` program
    pub fn recognize(&mut self) -> SyntaxResult<()> {
        if self.tokens.is_empty() {
            let error = SyntaxError::EmptyTokenStream;
            log_error!(error.error_code(), "Cannot recognize an empty token stream");
            return Err(error);
        }

        if let Err(error) = self.rat24f() {
            let message = error.to_string();
            match error.span() {
                Some(span) => log_error!(error.error_code(), &message,
                    span = span,
                    "context" => self.current_context(),
                    "tokens_consumed" => self.tokens.position()
                ),
                None => log_error!(error.error_code(), &message,
                    "context" => self.current_context(),
                    "tokens_consumed" => self.tokens.position()
                ),
            }
            return Err(error);
        }

        let trailing = self.tokens.remaining_count();
        if trailing > 0 && self.preferences.warn_on_trailing_tokens {
            if let Some(first) = self.tokens.lookahead() {
                log_warning!(codes::warnings::TRAILING_TOKENS,
                    "Tokens after the closing '@' were not recognized",
                    span = first.span(),
                    "count" => trailing,
                    "first" => first.lexeme()
                );
            }
        }

        Ok(())
    }

    pub fn trace(&self) -> &DerivationTrace {
        &self.trace
    }

    pub fn into_trace(self) -> DerivationTrace {
        self.trace
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    /// Path of nonterminals currently open, outermost first
    pub fn current_context(&self) -> String {
        if self.context_stack.is_empty() {
            "<none>".to_string()
        } else {
            self.context_stack.join(" -> ")
        }
    }

    // ========================================================================
    // PRIMITIVES
    // ========================================================================

    fn enter(&mut self, nonterminal: &'static str) -> SyntaxResult<()> {
        if self.context_stack.len() >= MAX_PARSE_DEPTH {
            return Err(SyntaxError::max_parse_depth(
                MAX_PARSE_DEPTH,
                self.tokens.current_span(),
            ));
        }
        self.context_stack.push(nonterminal);
        Ok(())
    }

    fn leave(&mut self) {
        self.context_stack.pop();
    }

    fn apply(&mut self, production: Production) -> SyntaxResult<()> {
        if self.preferences.log_trace_events {
            log_debug!("Production applied",
                "rule" => production,
                "depth" => self.context_stack.len()
            );
        }
        self.trace.push_rule(production)
    }

    /// Consume the lookahead if its kind is `expected`; only the kind is compared
    fn match_kind(&mut self, expected: TokenKind) -> SyntaxResult<()> {
        let token = self
            .tokens
            .lookahead()
            .ok_or_else(|| self.end_of_input(expected.as_str()))?;

        if token.kind() != expected {
            return Err(SyntaxError::token_mismatch(expected, token));
        }

        if self.preferences.log_trace_events {
            log_debug!("Token matched",
                "kind" => token.kind(),
                "lexeme" => token.lexeme()
            );
        }

        self.trace.push_match(token)?;
        self.tokens.advance();
        Ok(())
    }

    fn end_of_input(&self, expected: &str) -> SyntaxError {
        SyntaxError::unexpected_end_of_input(expected, self.tokens.current(), self.tokens.end_span())
    }

    /// Lookahead that must exist for a dispatch decision
    fn require_lookahead(&self, expected: &str) -> SyntaxResult<&Token> {
        self.tokens
            .lookahead()
            .ok_or_else(|| self.end_of_input(expected))
    }

    fn lookahead_is(&self, predicate: impl FnOnce(&Token) -> bool) -> bool {
        self.tokens.lookahead().is_some_and(predicate)
    }

    fn lookahead_is_qualifier(&self) -> bool {
        self.lookahead_is(|t| t.as_keyword().is_some_and(Keyword::is_qualifier))
    }

    // ========================================================================
    // PROGRAM STRUCTURE
    // ========================================================================

    fn rat24f(&mut self) -> SyntaxResult<()> {
        self.enter("<Rat24F>")?;
        self.apply(Production::Rat24F)?;
        self.opt_function_definitions()?;
        self.match_kind(TokenKind::Separator)?;
        self.opt_declaration_list()?;
        self.statement_list()?;
        self.match_kind(TokenKind::Separator)?;
        self.leave();
        Ok(())
    }

    fn opt_function_definitions(&mut self) -> SyntaxResult<()> {
        if self.lookahead_is(|t| t.is_keyword(Keyword::Function)) {
            self.apply(Production::OptFunctionDefinitions)?;
            self.function_definitions()
        } else {
            self.apply(Production::NoFunctionDefinitions)
        }
    }

    fn function_definitions(&mut self) -> SyntaxResult<()> {
        self.enter("<Function Definitions>")?;
        self.apply(Production::FunctionDefinitions)?;
        self.function()?;
        while self.lookahead_is(|t| t.is_keyword(Keyword::Function)) {
            self.function()?;
        }
        self.leave();
        Ok(())
    }

    fn function(&mut self) -> SyntaxResult<()> {
        self.enter("<Function>")?;
        self.apply(Production::Function)?;
        self.match_kind(TokenKind::Keyword)?;
        self.match_kind(TokenKind::Identifier)?;
        self.match_kind(TokenKind::Separator)?;
        self.opt_parameter_list()?;
        self.match_kind(TokenKind::Separator)?;
        self.opt_declaration_list()?;
        self.body()?;
        self.leave();
        Ok(())
    }

    fn opt_parameter_list(&mut self) -> SyntaxResult<()> {
        if self.lookahead_is(|t| t.kind() == TokenKind::Identifier) {
            self.apply(Production::OptParameterList)?;
            self.parameter_list()
        } else {
            self.apply(Production::NoParameterList)
        }
    }

    fn parameter_list(&mut self) -> SyntaxResult<()> {
        self.enter("<Parameter List>")?;
        self.apply(Production::ParameterList)?;
        self.parameter()?;
        while self.lookahead_is(|t| t.is_separator(',')) {
            self.match_kind(TokenKind::Separator)?;
            self.parameter()?;
        }
        self.leave();
        Ok(())
    }

    fn parameter(&mut self) -> SyntaxResult<()> {
        self.enter("<Parameter>")?;
        self.apply(Production::Parameter)?;
        self.ids()?;
        self.qualifier()?;
        self.leave();
        Ok(())
    }

    fn qualifier(&mut self) -> SyntaxResult<()> {
        let token = self.require_lookahead("a qualifier")?;
        let qualifier =
            Qualifier::from_token(token).ok_or_else(|| SyntaxError::expected_qualifier(token))?;

        self.apply(Production::Qualifier(qualifier))?;
        self.match_kind(TokenKind::Keyword)
    }

    fn body(&mut self) -> SyntaxResult<()> {
        self.enter("<Body>")?;
        self.apply(Production::Body)?;
        self.match_kind(TokenKind::Separator)?;
        self.statement_list()?;
        self.match_kind(TokenKind::Separator)?;
        self.leave();
        Ok(())
    }

    fn opt_declaration_list(&mut self) -> SyntaxResult<()> {
        if self.lookahead_is_qualifier() {
            self.apply(Production::OptDeclarationList)?;
            self.declaration_list()
        } else {
            self.apply(Production::NoDeclarationList)
        }
    }

    fn declaration_list(&mut self) -> SyntaxResult<()> {
        self.enter("<Declaration List>")?;
        self.apply(Production::DeclarationList)?;
        self.declaration()?;
        self.match_kind(TokenKind::Separator)?;
        while self.lookahead_is_qualifier() {
            self.declaration()?;
            self.match_kind(TokenKind::Separator)?;
        }
        self.leave();
        Ok(())
    }

    fn declaration(&mut self) -> SyntaxResult<()> {
        self.enter("<Declaration>")?;
        self.apply(Production::Declaration)?;
        self.qualifier()?;
        self.ids()?;
        self.leave();
        Ok(())
    }

    fn ids(&mut self) -> SyntaxResult<()> {
        self.apply(Production::Ids)?;
        self.match_kind(TokenKind::Identifier)?;
        while self.lookahead_is(|t| t.is_separator(',')) {
            self.match_kind(TokenKind::Separator)?;
            self.match_kind(TokenKind::Identifier)?;
        }
        Ok(())
    }

    // ========================================================================
    // STATEMENTS
    // ========================================================================

    fn statement_list(&mut self) -> SyntaxResult<()> {
        if !self.lookahead_is(continues_statement_list) {
            return self.apply(Production::EmptyStatementList);
        }

        self.enter("<Statement List>")?;
        self.apply(Production::StatementList)?;
        while self.lookahead_is(continues_statement_list) {
            self.statement()?;
        }
        self.leave();
        Ok(())
    }

    fn statement(&mut self) -> SyntaxResult<()> {
        self.enter("<Statement>")?;

        let token = self.require_lookahead("a statement")?;
        let form =
            StatementForm::from_token(token).ok_or_else(|| SyntaxError::invalid_statement(token))?;

        self.apply(Production::Statement(form))?;
        match form {
            StatementForm::Compound => self.compound()?,
            StatementForm::Assign => self.assign()?,
            StatementForm::If => self.if_statement()?,
            StatementForm::Return => self.return_statement()?,
            StatementForm::Print => self.print()?,
            StatementForm::Scan => self.scan()?,
            StatementForm::While => self.while_statement()?,
        }

        self.leave();
        Ok(())
    }

    fn compound(&mut self) -> SyntaxResult<()> {
        self.apply(Production::Compound)?;
        self.match_kind(TokenKind::Separator)?;
        self.statement_list()?;
        self.match_kind(TokenKind::Separator)
    }

    fn assign(&mut self) -> SyntaxResult<()> {
        self.apply(Production::Assign)?;
        self.match_kind(TokenKind::Identifier)?;
        self.match_kind(TokenKind::Operator)?;
        self.expression()?;
        self.match_kind(TokenKind::Separator)
    }

    fn if_statement(&mut self) -> SyntaxResult<()> {
        self.apply(Production::If)?;
        self.match_kind(TokenKind::Keyword)?;
        self.match_kind(TokenKind::Separator)?;
        self.condition()?;
        self.match_kind(TokenKind::Separator)?;
        self.statement()?;
        if self.lookahead_is(|t| t.is_keyword(Keyword::Else)) {
            self.match_kind(TokenKind::Keyword)?;
            self.statement()?;
        }
        // fi
        self.match_kind(TokenKind::Keyword)
    }

    fn return_statement(&mut self) -> SyntaxResult<()> {
        self.apply(Production::Return)?;
        self.match_kind(TokenKind::Keyword)?;
        if !self.lookahead_is(|t| t.is_separator(';')) {
            self.expression()?;
        }
        self.match_kind(TokenKind::Separator)
    }

    fn print(&mut self) -> SyntaxResult<()> {
        self.apply(Production::Print)?;
        self.match_kind(TokenKind::Keyword)?;
        self.match_kind(TokenKind::Separator)?;
        self.expression()?;
        self.match_kind(TokenKind::Separator)?;
        self.match_kind(TokenKind::Separator)
    }

    fn scan(&mut self) -> SyntaxResult<()> {
        self.apply(Production::Scan)?;
        self.match_kind(TokenKind::Keyword)?;
        self.match_kind(TokenKind::Separator)?;
        self.ids()?;
        self.match_kind(TokenKind::Separator)?;
        self.match_kind(TokenKind::Separator)
    }

    fn while_statement(&mut self) -> SyntaxResult<()> {
        self.apply(Production::While)?;
        self.match_kind(TokenKind::Keyword)?;
        self.match_kind(TokenKind::Separator)?;
        self.condition()?;
        self.match_kind(TokenKind::Separator)?;
        self.statement()
    }

    fn condition(&mut self) -> SyntaxResult<()> {
        self.apply(Production::Condition)?;
        self.expression()?;
        self.relop()?;
        self.expression()
    }

    fn relop(&mut self) -> SyntaxResult<()> {
        let token = self.require_lookahead("a relational operator")?;
        let op = RelationalOperator::from_token(token)
            .ok_or_else(|| SyntaxError::expected_relational_operator(token))?;

        self.apply(Production::Relop(op))?;
        self.match_kind(TokenKind::Operator)
    }

    // ========================================================================
    // EXPRESSIONS
    // ========================================================================

    fn expression(&mut self) -> SyntaxResult<()> {
        self.enter("<Expression>")?;
        self.apply(Production::Expression)?;
        self.term()?;
        self.expression_prime()?;
        self.leave();
        Ok(())
    }

    /// Right-recursive in the grammar; iterated here with the same trace
    fn expression_prime(&mut self) -> SyntaxResult<()> {
        loop {
            let op = self.tokens.lookahead().and_then(AdditiveOperator::from_token);
            match op {
                Some(op) => {
                    self.apply(Production::ExpressionPrime(op))?;
                    self.match_kind(TokenKind::Operator)?;
                    self.term()?;
                }
                None => return self.apply(Production::EmptyExpressionPrime),
            }
        }
    }

    fn term(&mut self) -> SyntaxResult<()> {
        self.enter("<Term>")?;
        self.apply(Production::Term)?;
        self.factor()?;
        self.term_prime()?;
        self.leave();
        Ok(())
    }

    fn term_prime(&mut self) -> SyntaxResult<()> {
        loop {
            let op = self
                .tokens
                .lookahead()
                .and_then(MultiplicativeOperator::from_token);
            match op {
                Some(op) => {
                    self.apply(Production::TermPrime(op))?;
                    self.match_kind(TokenKind::Operator)?;
                    self.factor()?;
                }
                None => return self.apply(Production::EmptyTermPrime),
            }
        }
    }

    fn factor(&mut self) -> SyntaxResult<()> {
        self.enter("<Factor>")?;

        let token = self.require_lookahead("a factor")?;
        let form = FactorForm::from_token(token).ok_or_else(|| SyntaxError::invalid_factor(token))?;

        self.apply(Production::Factor(form))?;
        match form {
            FactorForm::Identifier | FactorForm::Call => {
                self.match_kind(TokenKind::Identifier)?;
                if self.lookahead_is(|t| t.is_separator('(')) {
                    self.apply(Production::Factor(FactorForm::Call))?;
                    self.match_kind(TokenKind::Separator)?;
                    self.ids()?;
                    self.match_kind(TokenKind::Separator)?;
                }
            }
            FactorForm::Integer => self.match_kind(TokenKind::Integer)?,
            FactorForm::Real => self.match_kind(TokenKind::Real)?,
            FactorForm::Boolean => self.match_kind(TokenKind::Keyword)?,
            FactorForm::Parenthesized => {
                self.match_kind(TokenKind::Separator)?;
                self.expression()?;
                self.match_kind(TokenKind::Separator)?;
            }
        }

        self.leave();
        Ok(())
    }
}

/// Create a recognizer with default preferences
pub fn create_recognizer(tokens: TokenStream) -> Recognizer {
    Recognizer::new(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenStreamBuilder;
    use assert_matches::assert_matches;

    fn minimal_program() -> TokenStream {
        TokenStreamBuilder::new()
            .push_token(TokenKind::Separator, "@")
            .push_token(TokenKind::Separator, "@")
            .build()
    }

    #[test]
    fn test_minimal_program_trace() {
        let mut recognizer = Recognizer::new(minimal_program());
        recognizer.recognize().unwrap();

        let rendered = recognizer.trace().render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            vec![
                "\t<Rat24F> -> <Opt Function Definitions> @ <Opt Declaration List> <Statement List> @",
                "\t<Opt Function Definitions> -> ε",
                "Token: separator       Lexeme: @                   ",
                "\t<Opt Declaration List> -> ε",
                "\t<Statement List> -> ε",
                "Token: separator       Lexeme: @                   ",
            ]
        );
        assert!(recognizer.tokens().is_at_end());
    }

    #[test]
    fn test_empty_stream() {
        let mut recognizer = Recognizer::new(TokenStream::new(Vec::new()));
        assert_matches!(recognizer.recognize(), Err(SyntaxError::EmptyTokenStream));
        assert!(recognizer.trace().is_empty());
    }

    #[test]
    fn test_missing_closing_marker_hits_end_of_input() {
        let tokens = TokenStreamBuilder::new()
            .push_token(TokenKind::Separator, "@")
            .build();
        let mut recognizer = Recognizer::new(tokens);

        assert_matches!(
            recognizer.recognize(),
            Err(SyntaxError::UnexpectedEndOfInput { expected, last_lexeme, .. })
                if expected == "separator" && last_lexeme == "@"
        );
        // Failure leaves the open nonterminals in place
        assert_eq!(recognizer.current_context(), "<Rat24F>");
    }

    #[test]
    fn test_kind_mismatch_reports_both_kinds() {
        let tokens = TokenStreamBuilder::new()
            .push_token(TokenKind::Identifier, "x")
            .build();
        let mut recognizer = Recognizer::new(tokens);

        assert_matches!(
            recognizer.recognize(),
            Err(SyntaxError::TokenMismatch {
                expected: TokenKind::Separator,
                found: TokenKind::Identifier,
                ref lexeme,
                ..
            }) if lexeme == "x"
        );
    }

    #[test]
    fn test_depth_limit() {
        let mut builder = TokenStreamBuilder::new()
            .push_token(TokenKind::Separator, "@")
            .push_token(TokenKind::Identifier, "x")
            .push_token(TokenKind::Operator, "=");
        for _ in 0..MAX_PARSE_DEPTH {
            builder = builder.push_token(TokenKind::Separator, "(");
        }
        let mut recognizer = Recognizer::new(builder.build());

        assert_matches!(
            recognizer.recognize(),
            Err(SyntaxError::MaxParseDepth { limit, .. }) if limit == MAX_PARSE_DEPTH
        );
    }
}
