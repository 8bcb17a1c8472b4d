// Internal modules
#[macro_use]
pub mod logging;
pub mod config;
pub mod file_processor;
pub mod grammar;
pub mod lexical;
pub mod output;
pub mod pipeline;
pub mod preprocess;
pub mod syntax;
pub mod tokens;
pub mod utils;

// Re-export key types for library consumers
pub use pipeline::{PipelineError, PipelineMode, PipelineResult};
pub use syntax::{DerivationTrace, Recognition, SyntaxError};
pub use tokens::{Token, TokenKind};
