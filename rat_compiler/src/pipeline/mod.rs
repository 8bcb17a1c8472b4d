//! File -> comment stripping -> tokens -> recognition -> artifacts

mod error;
mod result;
mod validation;

pub use error::PipelineError;
pub use result::PipelineResult;
pub use validation::validate_pipeline;

use crate::config::runtime::RuntimeConfig;
use crate::file_processor::FileProcessor;
use crate::lexical::LexicalAnalyzer;
use crate::logging;
use crate::output::{self, ArtifactPaths, SyntaxReport};
use crate::preprocess;
use crate::syntax;
use crate::tokens::TokenStream;
use std::path::PathBuf;
use std::time::Instant;

/// How far a run goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineMode {
    /// Tokenize and recognize, writing every enabled artifact
    Full,
    /// Stop after tokenization; only the token table is written
    TokensOnly,
}

/// Process a single file with runtime preferences read from the environment
pub fn process_file(file_path: &str) -> Result<PipelineResult, PipelineError> {
    process_file_with_config(file_path, &RuntimeConfig::default(), PipelineMode::Full)
}

/// Process a single file.
///
/// A structural error does not make this fail: the trace file is still
/// written, ending with the error line, and the error is available from
/// the returned `PipelineResult`.
pub fn process_file_with_config(
    file_path: &str,
    config: &RuntimeConfig,
    mode: PipelineMode,
) -> Result<PipelineResult, PipelineError> {
    let start_time = Instant::now();

    logging::with_file_context(PathBuf::from(file_path), 0, || {
        crate::log_info!("Starting RAT24F front end pipeline",
            "file" => file_path,
            "mode" => format!("{:?}", mode)
        );

        // Stage 1: File processing
        let file_result =
            FileProcessor::from_preferences(&config.file_processor).process_file(file_path)?;
        let paths = ArtifactPaths::for_source(&file_result.metadata.path)?;

        // Stage 2: Comment stripping
        let stripped = preprocess::strip_comments(&file_result.source);

        // Stage 3: Lexical analysis
        let mut analyzer = LexicalAnalyzer::with_preferences(config.lexical.clone());
        let tokens = analyzer.tokenize(&stripped.text)?;
        let lexical_metrics = analyzer.metrics().clone();

        let mut artifacts = Vec::new();
        if config.output.write_token_table || mode == PipelineMode::TokensOnly {
            output::write_token_table(&tokens, &paths.token_table)?;
            artifacts.push(paths.token_table.clone());
        }

        // Stage 4: Recognition
        let recognition = match mode {
            PipelineMode::TokensOnly => None,
            PipelineMode::Full => {
                let recognition = syntax::recognize_with_preferences(
                    TokenStream::new(tokens.clone()),
                    config.syntax.clone(),
                );

                // Stage 5: Artifacts
                output::write_trace(&recognition, &paths.trace)?;
                artifacts.push(paths.trace.clone());

                if config.output.write_json {
                    let report =
                        SyntaxReport::new(&file_result.metadata.path, &tokens, &recognition);
                    output::write_json(&report, &paths.json)?;
                    artifacts.push(paths.json.clone());
                }

                Some(recognition)
            }
        };

        let result = PipelineResult {
            file_metadata: file_result.metadata,
            source: file_result.source,
            comments_removed: stripped.comments_removed,
            tokens,
            lexical_metrics,
            recognition,
            artifacts,
            processing_duration: start_time.elapsed(),
        };

        result.log_success(file_path);

        Ok(result)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::runtime::{
        FileProcessorPreferences, LexicalPreferences, LoggingPreferences, OutputPreferences,
        SyntaxPreferences,
    };
    use crate::syntax::SyntaxError;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn config(write_json: bool) -> RuntimeConfig {
        RuntimeConfig {
            file_processor: FileProcessorPreferences {
                require_rat_extension: false,
                enable_performance_logging: false,
            },
            lexical: LexicalPreferences {
                collect_detailed_metrics: true,
                warn_on_invalid_tokens: true,
            },
            syntax: SyntaxPreferences {
                log_trace_events: false,
                warn_on_trailing_tokens: true,
            },
            output: OutputPreferences {
                write_token_table: true,
                write_json,
            },
            logging: LoggingPreferences::default(),
        }
    }

    #[test]
    fn test_validate_pipeline() {
        let _ = crate::logging::init_global_logging();
        assert!(validate_pipeline().is_ok());
    }

    #[test]
    fn test_full_run_writes_artifacts() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("sum.rat");
        fs::write(
            &source,
            "[* sums two values *]\n@\ninteger a, b;\na = 1;\nb = a + 2;\nput(b);\n@\n",
        )
        .unwrap();

        let result =
            process_file_with_config(source.to_str().unwrap(), &config(true), PipelineMode::Full)
                .unwrap();

        assert!(result.is_accepted());
        assert!(result.check().is_ok());
        assert_eq!(result.comments_removed, 1);
        assert_eq!(result.lexical_metrics.counts.invalid, 0);
        assert_eq!(result.artifacts.len(), 3);

        let table = fs::read_to_string(dir.path().join("sum_output.txt")).unwrap();
        assert!(table.starts_with("Token        Lexeme\n"));
        assert!(!table.contains("sums"));

        let trace = fs::read_to_string(dir.path().join("sum_syntax_output.txt")).unwrap();
        assert!(trace.contains("\t<Print> -> put (<Expression>);"));
        assert!(!trace.contains("Error:"));

        assert!(dir.path().join("sum_syntax_output.json").exists());
    }

    #[test]
    fn test_structural_failure_still_writes_trace() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("broken.rat");
        fs::write(&source, "@\ninteger a;\na = 1\n").unwrap();

        let result =
            process_file_with_config(source.to_str().unwrap(), &config(false), PipelineMode::Full)
                .unwrap();

        assert!(!result.is_accepted());
        assert_matches!(
            result.check(),
            Err(PipelineError::SyntaxAnalysis(SyntaxError::UnexpectedEndOfInput { .. }))
        );

        let trace = fs::read_to_string(dir.path().join("broken_syntax_output.txt")).unwrap();
        assert!(trace.lines().last().unwrap().starts_with("Error: "));

        let diagnostic = result.syntax_diagnostic().unwrap();
        assert!(diagnostic.contains(" 3 | a = 1"));
        assert!(!dir.path().join("broken_syntax_output.json").exists());
    }

    #[test]
    fn test_tokens_only_mode() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("lex.rat");
        fs::write(&source, "while (x <= 3) x = x + 1; #").unwrap();

        let result = process_file_with_config(
            source.to_str().unwrap(),
            &config(false),
            PipelineMode::TokensOnly,
        )
        .unwrap();

        assert!(result.recognition.is_none());
        assert!(!result.is_accepted());
        assert!(result.check().is_ok());
        assert_eq!(result.lexical_metrics.counts.invalid, 1);
        assert_eq!(result.artifacts, vec![dir.path().join("lex_output.txt")]);
        assert!(!dir.path().join("lex_syntax_output.txt").exists());
    }

    #[test]
    fn test_missing_file() {
        let result = process_file_with_config(
            "definitely_missing.rat",
            &config(false),
            PipelineMode::Full,
        );
        assert_matches!(result, Err(PipelineError::FileProcessing(_)));
        assert_eq!(result.unwrap_err().stage(), "file processing");
    }

    #[test]
    fn test_pipeline_error_creation() {
        let error = PipelineError::pipeline_error("Test error");
        assert_matches!(error, PipelineError::Pipeline { ref message } if message == "Test error");
        assert_eq!(error.error_code().as_str(), "ERR001");
    }
}
