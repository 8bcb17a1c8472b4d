//! Output artifacts for one compiled source file
//!
//! The token table and the derivation trace are plain text in fixed
//! column layouts; the JSON report is optional.

mod writer;

pub use writer::{
    render_token_table, render_trace, write_json, write_token_table, write_trace, ArtifactPaths,
    Outcome, SyntaxReport,
};

use crate::logging::codes;

/// Output stage errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to write '{path}': {message}")]
    WriteFailure { path: String, message: String },

    #[error("Failed to serialize report: {message}")]
    Serialization { message: String },

    #[error("Cannot derive output file names from '{path}'")]
    InvalidOutputPath { path: String },
}

impl OutputError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::WriteFailure { .. } => codes::output::WRITE_FAILURE,
            Self::Serialization { .. } => codes::output::SERIALIZATION_FAILURE,
            Self::InvalidOutputPath { .. } => codes::output::INVALID_OUTPUT_PATH,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }
}

/// Check that every output code is registered
pub fn init_output_logging() -> Result<(), String> {
    for code in [
        codes::output::WRITE_FAILURE,
        codes::output::SERIALIZATION_FAILURE,
        codes::output::INVALID_OUTPUT_PATH,
    ] {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Output code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical;
    use crate::syntax::{self, Recognition};
    use crate::tokens::{Token, TokenStream};
    use assert_matches::assert_matches;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn run(source: &str) -> (Vec<Token>, Recognition) {
        let tokens = lexical::tokenize(source).unwrap();
        let recognition = syntax::recognize(TokenStream::new(tokens.clone()));
        (tokens, recognition)
    }

    #[test]
    fn test_artifact_paths() {
        let paths = ArtifactPaths::for_source(Path::new("programs/test1.rat")).unwrap();
        assert_eq!(paths.token_table, Path::new("programs/test1_output.txt"));
        assert_eq!(paths.trace, Path::new("programs/test1_syntax_output.txt"));
        assert_eq!(paths.json, Path::new("programs/test1_syntax_output.json"));

        // Only the last extension is replaced
        let paths = ArtifactPaths::for_source(Path::new("a.b.rat")).unwrap();
        assert_eq!(paths.token_table, Path::new("a.b_output.txt"));
    }

    #[test]
    fn test_artifact_paths_without_stem() {
        assert_matches!(
            ArtifactPaths::for_source(Path::new("..")),
            Err(OutputError::InvalidOutputPath { .. })
        );
    }

    #[test]
    fn test_token_table_layout() {
        let (tokens, _) = run("while (x <= 10.5) $");
        let table = render_token_table(&tokens);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Token        Lexeme");
        assert_eq!(lines[1], "-".repeat(25));
        assert_eq!(lines[2], "keyword    while");
        assert_eq!(lines[3], "separator  (");
        assert_eq!(lines[4], "identifier x");
        assert_eq!(lines[5], "operator   <=");
        assert_eq!(lines[6], "real       10.5");
        assert_eq!(lines.len(), 2 + tokens.len());
    }

    #[test]
    fn test_trace_ends_with_error_on_failure() {
        let (_, recognition) = run("@ x = ; @");
        let rendered = render_trace(&recognition);
        let last = rendered.lines().last().unwrap();

        assert!(last.starts_with("Error: "));
        assert!(last.contains("Invalid factor"));
    }

    #[test]
    fn test_trace_has_no_error_line_on_success() {
        let (_, recognition) = run("@ @");
        let rendered = render_trace(&recognition);
        assert!(!rendered.contains("Error:"));
        assert_eq!(rendered, recognition.trace.render());
    }

    #[test]
    fn test_write_all_artifacts() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("prog.rat");
        let paths = ArtifactPaths::for_source(&source).unwrap();
        let (tokens, recognition) = run("@ integer a; a = 1; @");

        write_token_table(&tokens, &paths.token_table).unwrap();
        write_trace(&recognition, &paths.trace).unwrap();
        write_json(&SyntaxReport::new(&source, &tokens, &recognition), &paths.json).unwrap();

        let table = fs::read_to_string(&paths.token_table).unwrap();
        assert!(table.contains("keyword    integer"));

        let trace = fs::read_to_string(&paths.trace).unwrap();
        assert!(trace.starts_with("\t<Rat24F> -> "));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&paths.json).unwrap()).unwrap();
        assert_eq!(json["outcome"]["status"], "accepted");
        assert_eq!(json["counts"]["total"], tokens.len());
        assert_eq!(json["tokens"][1]["kind"], "keyword");
    }

    #[test]
    fn test_rejected_outcome_in_json() {
        let (tokens, recognition) = run("@ if (a) a = 1; fi @");
        let report = SyntaxReport::new(Path::new("bad.rat"), &tokens, &recognition);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["outcome"]["status"], "rejected");
        assert_eq!(json["outcome"]["code"], "E046");
    }

    #[test]
    fn test_write_failure() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("no_such_dir").join("out.txt");
        let result = write_token_table(&[], &missing);

        assert_matches!(result, Err(OutputError::WriteFailure { .. }));
        assert_eq!(result.unwrap_err().error_code().as_str(), "E060");
    }

    #[test]
    fn test_init_output_logging() {
        assert!(init_output_logging().is_ok());
    }
}
