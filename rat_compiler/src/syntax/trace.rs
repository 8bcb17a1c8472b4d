//! Derivation trace sink
//!
//! Append-only record of every production applied and every token matched,
//! in the order the recognizer visits them.

use crate::config::compile_time::syntax::MAX_TRACE_ENTRIES;
use crate::grammar::Production;
use crate::syntax::error::{SyntaxError, SyntaxResult};
use crate::tokens::{Token, TokenKind};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "entry", rename_all = "snake_case")]
pub enum TraceEntry {
    Rule { production: Production },
    Match { kind: TokenKind, lexeme: String },
}

impl TraceEntry {
    pub fn is_rule(&self) -> bool {
        matches!(self, Self::Rule { .. })
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match { .. })
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rule { production } => write!(f, "\t{}", production),
            Self::Match { kind, lexeme } => {
                write!(f, "Token: {:<15} Lexeme: {:<20}", kind, lexeme)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DerivationTrace {
    entries: Vec<TraceEntry>,
}

impl DerivationTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_rule(&mut self, production: Production) -> SyntaxResult<()> {
        self.push(TraceEntry::Rule { production })
    }

    pub fn push_match(&mut self, token: &Token) -> SyntaxResult<()> {
        self.push(TraceEntry::Match {
            kind: token.kind(),
            lexeme: token.lexeme().to_string(),
        })
    }

    fn push(&mut self, entry: TraceEntry) -> SyntaxResult<()> {
        if self.entries.len() >= MAX_TRACE_ENTRIES {
            return Err(SyntaxError::TraceLimitExceeded {
                limit: MAX_TRACE_ENTRIES,
            });
        }
        self.entries.push(entry);
        Ok(())
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Productions applied, in order
    pub fn rules(&self) -> impl Iterator<Item = Production> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            TraceEntry::Rule { production } => Some(*production),
            TraceEntry::Match { .. } => None,
        })
    }

    /// Tokens matched, in order
    pub fn matches(&self) -> impl Iterator<Item = (TokenKind, &str)> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            TraceEntry::Match { kind, lexeme } => Some((*kind, lexeme.as_str())),
            TraceEntry::Rule { .. } => None,
        })
    }

    pub fn match_count(&self) -> usize {
        self.matches().count()
    }

    /// One line per entry, newline terminated
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&entry.to_string());
            out.push('\n');
        }
        out
    }
}
