use super::PipelineError;
use crate::file_processor::FileMetadata;
use crate::lexical::LexicalMetrics;
use crate::syntax::Recognition;
use crate::tokens::Token;
use crate::utils::SourceMap;
use std::path::PathBuf;
use std::time::Duration;

/// Everything one run of the pipeline produced
#[derive(Debug)]
pub struct PipelineResult {
    pub file_metadata: FileMetadata,
    /// Source as read, comments included
    pub source: String,
    pub comments_removed: usize,
    pub tokens: Vec<Token>,
    pub lexical_metrics: LexicalMetrics,
    /// `None` when only tokenization was requested
    pub recognition: Option<Recognition>,
    /// Artifact files written, in the order they were written
    pub artifacts: Vec<PathBuf>,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// True when recognition ran and accepted the program
    pub fn is_accepted(&self) -> bool {
        self.recognition
            .as_ref()
            .map(Recognition::is_success)
            .unwrap_or(false)
    }

    /// Surface a structural failure as a pipeline error
    pub fn check(&self) -> Result<(), PipelineError> {
        match self.recognition.as_ref().and_then(Recognition::error) {
            Some(error) => Err(error.clone().into()),
            None => Ok(()),
        }
    }

    /// Structural error quoted against the source line it points at
    pub fn syntax_diagnostic(&self) -> Option<String> {
        let error = self.recognition.as_ref()?.error()?;
        let message = error.to_string();
        Some(match error.span() {
            Some(span) => SourceMap::new(&self.source).excerpt(&span, &message),
            None => format!("Error: {}\n", message),
        })
    }

    pub fn log_success(&self, file_path: &str) {
        let seconds = self.processing_duration.as_secs_f64();
        let tokens_per_sec = if seconds > 0.0 {
            self.token_count() as f64 / seconds
        } else {
            0.0
        };

        crate::log_performance!(
            crate::logging::codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "RAT24F front end pipeline finished",
            duration = self.processing_duration,
            "file" => file_path,
            "tokens" => self.token_count(),
            "accepted" => self.is_accepted(),
            "artifacts" => self.artifacts.len(),
            "tokens_per_sec" => format!("{:.0}", tokens_per_sec)
        );
    }
}
