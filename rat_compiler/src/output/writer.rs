//! Artifact writers: token table, derivation trace, JSON report

use super::OutputError;
use crate::lexical::TokenCounts;
use crate::logging::codes;
use crate::syntax::{DerivationTrace, Recognition, SyntaxError};
use crate::tokens::Token;
use crate::utils::Span;
use crate::{log_error, log_success};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Width of the kind column in the token table header
const TABLE_HEADER_WIDTH: usize = 12;
const TABLE_RULE_LENGTH: usize = 25;

/// Where the artifacts for one source file go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub token_table: PathBuf,
    pub trace: PathBuf,
    pub json: PathBuf,
}

impl ArtifactPaths {
    /// Derive artifact names next to the source: `dir/prog.rat` gives
    /// `dir/prog_output.txt`, `dir/prog_syntax_output.txt` and
    /// `dir/prog_syntax_output.json`
    pub fn for_source(source: &Path) -> Result<Self, OutputError> {
        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| OutputError::InvalidOutputPath {
                path: source.display().to_string(),
            })?;

        Ok(Self {
            token_table: source.with_file_name(format!("{}_output.txt", stem)),
            trace: source.with_file_name(format!("{}_syntax_output.txt", stem)),
            json: source.with_file_name(format!("{}_syntax_output.json", stem)),
        })
    }
}

/// Render the token table exactly as it is written to disk
pub fn render_token_table(tokens: &[Token]) -> String {
    let mut out = format!("{:<width$} {}\n", "Token", "Lexeme", width = TABLE_HEADER_WIDTH);
    out.push_str(&"-".repeat(TABLE_RULE_LENGTH));
    out.push('\n');
    for token in tokens {
        out.push_str(&token.to_string());
        out.push('\n');
    }
    out
}

/// Render the trace file body; a failed run ends with its error line
pub fn render_trace(recognition: &Recognition) -> String {
    let mut out = recognition.trace.render();
    if let Some(error) = recognition.error() {
        out.push_str(&format!("Error: {}\n", error));
    }
    out
}

pub fn write_token_table(tokens: &[Token], path: &Path) -> Result<(), OutputError> {
    write_text(path, &render_token_table(tokens))?;

    log_success!(codes::success::OUTPUT_WRITTEN, "Token table written",
        "path" => path.display(),
        "rows" => tokens.len());
    Ok(())
}

pub fn write_trace(recognition: &Recognition, path: &Path) -> Result<(), OutputError> {
    write_text(path, &render_trace(recognition))?;

    log_success!(codes::success::OUTPUT_WRITTEN, "Derivation trace written",
        "path" => path.display(),
        "entries" => recognition.trace.len(),
        "accepted" => recognition.is_success());
    Ok(())
}

/// How a recognition run ended, as recorded in the JSON report
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Accepted {
        tokens_consumed: usize,
        trailing_tokens: usize,
    },
    Rejected {
        code: &'static str,
        message: String,
        span: Option<Span>,
    },
}

impl Outcome {
    pub fn from_recognition(recognition: &Recognition) -> Self {
        match &recognition.result {
            Ok(()) => Self::Accepted {
                tokens_consumed: recognition.tokens_consumed,
                trailing_tokens: recognition.trailing_tokens,
            },
            Err(error) => Self::rejected(error),
        }
    }

    fn rejected(error: &SyntaxError) -> Self {
        Self::Rejected {
            code: error.error_code().as_str(),
            message: error.to_string(),
            span: error.span(),
        }
    }
}

/// Machine-readable form of one run
#[derive(Debug, Serialize)]
pub struct SyntaxReport<'a> {
    pub source: String,
    pub counts: TokenCounts,
    pub tokens: &'a [Token],
    pub trace: &'a DerivationTrace,
    pub outcome: Outcome,
}

impl<'a> SyntaxReport<'a> {
    pub fn new(source: &Path, tokens: &'a [Token], recognition: &'a Recognition) -> Self {
        Self {
            source: source.display().to_string(),
            counts: crate::lexical::get_token_counts(tokens),
            tokens,
            trace: &recognition.trace,
            outcome: Outcome::from_recognition(recognition),
        }
    }
}

pub fn write_json(report: &SyntaxReport<'_>, path: &Path) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(report).map_err(|e| {
        let error = OutputError::Serialization {
            message: e.to_string(),
        };
        log_error!(error.error_code(), "Could not serialize syntax report",
            "path" => path.display(),
            "serde_error" => e);
        error
    })?;

    write_text(path, &json)?;

    log_success!(codes::success::OUTPUT_WRITTEN, "JSON report written",
        "path" => path.display(),
        "bytes" => json.len());
    Ok(())
}

fn write_text(path: &Path, text: &str) -> Result<(), OutputError> {
    let to_error = |e: std::io::Error| {
        let error = OutputError::WriteFailure {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        log_error!(error.error_code(), "Failed to write output file",
            "path" => path.display(),
            "io_error" => e);
        error
    };

    let file = File::create(path).map_err(to_error)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(text.as_bytes()).map_err(to_error)?;
    writer.flush().map_err(to_error)
}
