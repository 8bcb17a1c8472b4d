use crate::file_processor::FileProcessorError;
use crate::lexical::LexerError;
use crate::output::OutputError;
use crate::syntax::SyntaxError;

/// Pipeline processing errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Lexical analysis failed: {0}")]
    LexicalAnalysis(#[from] LexerError),

    #[error("{0}")]
    SyntaxAnalysis(#[from] SyntaxError),

    #[error("Writing output failed: {0}")]
    Output(#[from] OutputError),

    #[error("Pipeline error: {message}")]
    Pipeline { message: String },
}

impl PipelineError {
    pub fn pipeline_error(message: &str) -> Self {
        Self::Pipeline {
            message: message.to_string(),
        }
    }

    /// Stage that produced the error
    pub fn stage(&self) -> &'static str {
        match self {
            Self::FileProcessing(_) => "file processing",
            Self::LexicalAnalysis(_) => "lexical analysis",
            Self::SyntaxAnalysis(_) => "syntax analysis",
            Self::Output(_) => "output",
            Self::Pipeline { .. } => "pipeline",
        }
    }

    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            Self::FileProcessing(e) => e.error_code(),
            Self::LexicalAnalysis(e) => e.error_code(),
            Self::SyntaxAnalysis(e) => e.error_code(),
            Self::Output(e) => e.error_code(),
            Self::Pipeline { .. } => crate::logging::codes::system::INTERNAL_ERROR,
        }
    }
}
