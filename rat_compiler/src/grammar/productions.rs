//! RAT24F productions and their rule texts
//!
//! A `Production` is the alternative actually applied at one point of a
//! derivation, so optional and operator-bearing rules render the chosen form
//! rather than the full alternation.

use crate::grammar::dispatch::{
    AdditiveOperator, FactorForm, MultiplicativeOperator, Qualifier, RelationalOperator,
    StatementForm,
};
use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Production {
    Rat24F,
    OptFunctionDefinitions,
    NoFunctionDefinitions,
    FunctionDefinitions,
    Function,
    OptParameterList,
    NoParameterList,
    ParameterList,
    Parameter,
    Qualifier(Qualifier),
    Body,
    OptDeclarationList,
    NoDeclarationList,
    DeclarationList,
    Declaration,
    Ids,
    StatementList,
    EmptyStatementList,
    Statement(StatementForm),
    Compound,
    Assign,
    If,
    Return,
    Print,
    Scan,
    While,
    Condition,
    Relop(RelationalOperator),
    Expression,
    ExpressionPrime(AdditiveOperator),
    EmptyExpressionPrime,
    Term,
    TermPrime(MultiplicativeOperator),
    EmptyTermPrime,
    Factor(FactorForm),
}

impl Production {
    /// Left-hand nonterminal
    pub const fn nonterminal(self) -> &'static str {
        match self {
            Self::Rat24F => "<Rat24F>",
            Self::OptFunctionDefinitions | Self::NoFunctionDefinitions => {
                "<Opt Function Definitions>"
            }
            Self::FunctionDefinitions => "<Function Definitions>",
            Self::Function => "<Function>",
            Self::OptParameterList | Self::NoParameterList => "<Opt Parameter List>",
            Self::ParameterList => "<Parameter List>",
            Self::Parameter => "<Parameter>",
            Self::Qualifier(_) => "<Qualifier>",
            Self::Body => "<Body>",
            Self::OptDeclarationList | Self::NoDeclarationList => "<Opt Declaration List>",
            Self::DeclarationList => "<Declaration List>",
            Self::Declaration => "<Declaration>",
            Self::Ids => "<IDs>",
            Self::StatementList | Self::EmptyStatementList => "<Statement List>",
            Self::Statement(_) => "<Statement>",
            Self::Compound => "<Compound>",
            Self::Assign => "<Assign>",
            Self::If => "<If>",
            Self::Return => "<Return>",
            Self::Print => "<Print>",
            Self::Scan => "<Scan>",
            Self::While => "<While>",
            Self::Condition => "<Condition>",
            Self::Relop(_) => "<Relop>",
            Self::Expression => "<Expression>",
            Self::ExpressionPrime(_) | Self::EmptyExpressionPrime => "<Expression Prime>",
            Self::Term => "<Term>",
            Self::TermPrime(_) | Self::EmptyTermPrime => "<Term Prime>",
            Self::Factor(_) => "<Factor>",
        }
    }

    /// Right-hand side as written in the trace
    pub fn rhs(self) -> String {
        let rhs = match self {
            Self::Rat24F => {
                "<Opt Function Definitions> @ <Opt Declaration List> <Statement List> @"
            }
            Self::OptFunctionDefinitions => "<Function Definitions>",
            Self::FunctionDefinitions => "<Function> | <Function> <Function Definitions>",
            Self::Function => {
                "function <Identifier> ( <Opt Parameter List> ) <Opt Declaration List> <Body>"
            }
            Self::OptParameterList => "<Parameter List>",
            Self::ParameterList => "<Parameter> | <Parameter>, <Parameter List>",
            Self::Parameter => "<IDs> <Qualifier>",
            Self::Qualifier(qualifier) => qualifier.as_str(),
            Self::Body => "{ <Statement List> }",
            Self::OptDeclarationList => "<Declaration List>",
            Self::DeclarationList => "<Declaration>; | <Declaration>; <Declaration List>",
            Self::Declaration => "<Qualifier> <IDs>",
            Self::Ids => "<Identifier> | <Identifier>, <IDs>",
            Self::StatementList => "<Statement> | <Statement> <Statement List>",
            Self::Statement(form) => form.nonterminal(),
            Self::Compound => "{ <Statement List> }",
            Self::Assign => "<Identifier> = <Expression>;",
            Self::If => {
                "if ( <Condition> ) <Statement> fi | if ( <Condition> ) <Statement> else <Statement> fi"
            }
            Self::Return => "return ; | return <Expression>;",
            Self::Print => "put (<Expression>);",
            Self::Scan => "get ( <IDs> );",
            Self::While => "while ( <Condition> ) <Statement>",
            Self::Condition => "<Expression> <Relop> <Expression>",
            Self::Relop(op) => op.as_str(),
            Self::Expression => "<Term> <Expression Prime>",
            Self::ExpressionPrime(op) => {
                return format!("{} <Term> <Expression Prime>", op.as_str());
            }
            Self::Term => "<Factor> <Term Prime>",
            Self::TermPrime(op) => return format!("{} <Factor> <Term Prime>", op.as_str()),
            Self::Factor(form) => match form {
                FactorForm::Identifier => "<Identifier>",
                FactorForm::Call => "<Identifier> ( <IDs> )",
                FactorForm::Integer => "<Integer>",
                FactorForm::Real => "<Real>",
                FactorForm::Boolean => "<Boolean>",
                FactorForm::Parenthesized => "( <Expression> )",
            },
            Self::NoFunctionDefinitions
            | Self::NoParameterList
            | Self::NoDeclarationList
            | Self::EmptyStatementList
            | Self::EmptyExpressionPrime
            | Self::EmptyTermPrime => "ε",
        };
        rhs.to_string()
    }

    /// Whether this is an ε alternative
    pub const fn is_empty(self) -> bool {
        matches!(
            self,
            Self::NoFunctionDefinitions
                | Self::NoParameterList
                | Self::NoDeclarationList
                | Self::EmptyStatementList
                | Self::EmptyExpressionPrime
                | Self::EmptyTermPrime
        )
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.nonterminal(), self.rhs())
    }
}

/// Serialized as the rule text
impl Serialize for Production {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_rule() {
        assert_eq!(
            Production::Rat24F.to_string(),
            "<Rat24F> -> <Opt Function Definitions> @ <Opt Declaration List> <Statement List> @"
        );
    }

    #[test]
    fn test_empty_alternatives() {
        assert_eq!(
            Production::NoDeclarationList.to_string(),
            "<Opt Declaration List> -> ε"
        );
        assert_eq!(Production::EmptyTermPrime.to_string(), "<Term Prime> -> ε");
        assert!(Production::EmptyStatementList.is_empty());
        assert!(!Production::StatementList.is_empty());
    }

    #[test]
    fn test_rules_carry_chosen_operator() {
        assert_eq!(
            Production::ExpressionPrime(AdditiveOperator::Minus).to_string(),
            "<Expression Prime> -> - <Term> <Expression Prime>"
        );
        assert_eq!(
            Production::TermPrime(MultiplicativeOperator::Times).to_string(),
            "<Term Prime> -> * <Factor> <Term Prime>"
        );
        assert_eq!(
            Production::Relop(RelationalOperator::NotEqual).to_string(),
            "<Relop> -> !="
        );
        assert_eq!(
            Production::Qualifier(Qualifier::Boolean).to_string(),
            "<Qualifier> -> boolean"
        );
    }

    #[test]
    fn test_statement_and_factor_rules() {
        assert_eq!(
            Production::Statement(StatementForm::Scan).to_string(),
            "<Statement> -> <Scan>"
        );
        assert_eq!(
            Production::Factor(FactorForm::Call).to_string(),
            "<Factor> -> <Identifier> ( <IDs> )"
        );
    }
}
