//! Validating automata for accumulated lexemes
//!
//! The scanner groups characters greedily; these automata then decide, with
//! stricter rules, whether the grouped lexeme is acceptable and which token
//! kind it finalizes to. Transitions are static tables keyed by state and
//! character class. A missing transition rejects the lexeme, and the
//! `Invalid` states have no outgoing transitions at all.

use crate::lexical::classifier::{classify, CharClass};
use crate::tokens::TokenKind;

/// A deterministic automaton over `CharClass` input
pub trait Automaton {
    type State: Copy + Eq + std::fmt::Debug;

    const START: Self::State;

    /// Next state, or `None` when the table has no entry
    fn transition(state: Self::State, class: CharClass) -> Option<Self::State>;

    /// Token kind accepted in `state`, if it is an accepting state
    fn accepting_kind(state: Self::State) -> Option<TokenKind>;

    /// State reached after consuming the whole lexeme, or `None` on a dead transition
    fn final_state(lexeme: &str) -> Option<Self::State> {
        lexeme
            .chars()
            .try_fold(Self::START, |state, ch| Self::transition(state, classify(ch)))
    }

    /// Verdict for a lexeme: the accepted kind or `TokenKind::Invalid`
    fn validate(lexeme: &str) -> TokenKind {
        Self::final_state(lexeme)
            .and_then(Self::accepting_kind)
            .unwrap_or(TokenKind::Invalid)
    }
}

// ============================================================================
// IDENTIFIERS
// ============================================================================

/// Identifier automaton states (q0, q1, qInvalid)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierState {
    Start,
    Body,
    Invalid,
}

// Columns: Letter, Digit, Dot, Other
const IDENTIFIER_TRANSITIONS: [[Option<IdentifierState>; CharClass::COUNT]; 3] = {
    use IdentifierState::*;
    [
        [Some(Body), None, None, None],
        [Some(Body), Some(Body), None, None],
        [None, None, None, None],
    ]
};

pub struct IdentifierAutomaton;

impl Automaton for IdentifierAutomaton {
    type State = IdentifierState;

    const START: IdentifierState = IdentifierState::Start;

    fn transition(state: IdentifierState, class: CharClass) -> Option<IdentifierState> {
        IDENTIFIER_TRANSITIONS[state as usize][class.index()]
    }

    fn accepting_kind(state: IdentifierState) -> Option<TokenKind> {
        match state {
            IdentifierState::Body => Some(TokenKind::Identifier),
            IdentifierState::Start | IdentifierState::Invalid => None,
        }
    }
}

// ============================================================================
// INTEGERS AND REALS
// ============================================================================

/// Number automaton states (q0, q1, q2, q3, qInvalid)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberState {
    Start,
    /// Digits before any '.'; accepts as integer
    Whole,
    /// Just consumed the '.'
    Point,
    /// Digits after the '.'; accepts as real
    Fraction,
    Invalid,
}

// Columns: Letter, Digit, Dot, Other
const NUMBER_TRANSITIONS: [[Option<NumberState>; CharClass::COUNT]; 5] = {
    use NumberState::*;
    [
        [None, Some(Whole), Some(Invalid), None],
        [None, Some(Whole), Some(Point), None],
        [None, Some(Fraction), None, None],
        [None, Some(Fraction), None, None],
        [None, None, None, None],
    ]
};

pub struct NumberAutomaton;

impl Automaton for NumberAutomaton {
    type State = NumberState;

    const START: NumberState = NumberState::Start;

    fn transition(state: NumberState, class: CharClass) -> Option<NumberState> {
        NUMBER_TRANSITIONS[state as usize][class.index()]
    }

    fn accepting_kind(state: NumberState) -> Option<TokenKind> {
        match state {
            NumberState::Whole => Some(TokenKind::Integer),
            NumberState::Fraction => Some(TokenKind::Real),
            NumberState::Start | NumberState::Point | NumberState::Invalid => None,
        }
    }
}

/// Validate an identifier-shaped lexeme
pub fn validate_identifier(lexeme: &str) -> TokenKind {
    IdentifierAutomaton::validate(lexeme)
}

/// Validate a number-shaped lexeme
pub fn validate_number(lexeme: &str) -> TokenKind {
    NumberAutomaton::validate(lexeme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_acceptance() {
        assert_eq!(validate_identifier("x"), TokenKind::Identifier);
        assert_eq!(validate_identifier("counter42"), TokenKind::Identifier);
        assert_eq!(validate_identifier("9lives"), TokenKind::Invalid);
        assert_eq!(validate_identifier("a.b"), TokenKind::Invalid);
        assert_eq!(validate_identifier(""), TokenKind::Invalid);
    }

    #[test]
    fn test_number_acceptance() {
        assert_eq!(validate_number("0"), TokenKind::Integer);
        assert_eq!(validate_number("2024"), TokenKind::Integer);
        assert_eq!(validate_number("3.14"), TokenKind::Real);
        assert_eq!(validate_number("10.05"), TokenKind::Real);
    }

    #[test]
    fn test_number_rejection() {
        assert_eq!(validate_number("1."), TokenKind::Invalid);
        assert_eq!(validate_number(".5"), TokenKind::Invalid);
        assert_eq!(validate_number("."), TokenKind::Invalid);
        assert_eq!(validate_number("1.2.3"), TokenKind::Invalid);
        assert_eq!(validate_number("12a"), TokenKind::Invalid);
    }

    #[test]
    fn test_invalid_state_is_absorbing() {
        assert_eq!(NumberAutomaton::final_state("."), Some(NumberState::Invalid));
        assert_eq!(NumberAutomaton::final_state(".5"), None);
        for class in [
            CharClass::Letter,
            CharClass::Digit,
            CharClass::Dot,
            CharClass::Other,
        ] {
            assert_eq!(NumberAutomaton::transition(NumberState::Invalid, class), None);
            assert_eq!(
                IdentifierAutomaton::transition(IdentifierState::Invalid, class),
                None
            );
        }
    }

    #[test]
    fn test_final_states() {
        assert_eq!(NumberAutomaton::final_state("12"), Some(NumberState::Whole));
        assert_eq!(NumberAutomaton::final_state("12."), Some(NumberState::Point));
        assert_eq!(NumberAutomaton::final_state("12.5"), Some(NumberState::Fraction));
    }
}
