//! Token model for RAT24F
//!
//! The scanner produces [`Token`]s once and never mutates them. The whole
//! sequence is collected into a [`TokenStream`] before recognition starts;
//! the recognizer then walks it strictly forward with one token of
//! lookahead.
//!
//! Kinds are deliberately coarse (keyword, identifier, operator, integer,
//! real, separator, invalid). Grammar dispatch that needs more detail
//! looks at the lexeme through the typed views in [`crate::grammar`].

pub mod token;
pub mod token_stream;

pub use token::{is_operator_char, is_separator_char, Token, TokenKind};
pub use token_stream::{TokenStream, TokenStreamBuilder};
