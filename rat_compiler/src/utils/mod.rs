//! Shared primitive types used by the scanner, recognizer and reporting layers

pub mod span;

pub use span::{Position, SourceMap, Span};
