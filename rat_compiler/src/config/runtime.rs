//! Runtime preferences
//!
//! Every `Default` reads its `RAT_*` environment variable and falls back to
//! a built-in value when the variable is unset or does not parse.

use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileProcessorPreferences {
    /// Whether to require the .rat extension
    pub require_rat_extension: bool,

    /// Whether to enable detailed performance logging
    pub enable_performance_logging: bool,
}

impl Default for FileProcessorPreferences {
    fn default() -> Self {
        Self {
            require_rat_extension: env_flag(env_vars::REQUIRE_RAT_EXTENSION, false),
            enable_performance_logging: env_flag(env_vars::ENABLE_PERFORMANCE_LOGGING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexicalPreferences {
    /// Whether to collect per-kind token metrics
    pub collect_detailed_metrics: bool,

    /// Whether to emit a warning event for every invalid token
    pub warn_on_invalid_tokens: bool,
}

impl Default for LexicalPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_flag(env_vars::LEXICAL_DETAILED_METRICS, true),
            warn_on_invalid_tokens: env_flag(env_vars::LEXICAL_WARN_INVALID, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxPreferences {
    /// Whether each applied rule and matched token is also sent to the debug log
    pub log_trace_events: bool,

    /// Whether tokens left after the closing `@` raise a warning
    pub warn_on_trailing_tokens: bool,
}

impl Default for SyntaxPreferences {
    fn default() -> Self {
        Self {
            log_trace_events: env_flag(env_vars::SYNTAX_LOG_TRACE, true),
            warn_on_trailing_tokens: env_flag(env_vars::SYNTAX_WARN_TRAILING, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputPreferences {
    /// Whether to write the `<stem>_output.txt` token table
    pub write_token_table: bool,

    /// Whether to write `<stem>_syntax_output.json` next to the text trace
    pub write_json: bool,
}

impl Default for OutputPreferences {
    fn default() -> Self {
        Self {
            write_token_table: env_flag(env_vars::OUTPUT_TOKEN_TABLE, true),
            write_json: env_flag(env_vars::OUTPUT_JSON, false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level an event needs to be emitted
    pub min_log_level: LogLevel,

    /// Whether to include performance metrics in logs
    pub log_performance_events: bool,

    /// Whether to include file context in log messages
    pub include_file_context: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env_flag(env_vars::LOGGING_USE_STRUCTURED, false),
            enable_console_logging: env_flag(env_vars::LOGGING_ENABLE_CONSOLE, false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
            log_performance_events: env_flag(env_vars::LOGGING_LOG_PERFORMANCE, true),
            include_file_context: env_flag(env_vars::LOGGING_INCLUDE_FILE_CONTEXT, true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Boolean preference from the environment
fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Parse log level from string (used for environment variables)
fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub file_processor: FileProcessorPreferences,
    pub lexical: LexicalPreferences,
    pub syntax: SyntaxPreferences,
    pub output: OutputPreferences,
    pub logging: LoggingPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    // File Processor
    pub const REQUIRE_RAT_EXTENSION: &str = "RAT_REQUIRE_RAT_EXTENSION";
    pub const ENABLE_PERFORMANCE_LOGGING: &str = "RAT_ENABLE_PERFORMANCE_LOGGING";

    // Lexical
    pub const LEXICAL_DETAILED_METRICS: &str = "RAT_LEXICAL_DETAILED_METRICS";
    pub const LEXICAL_WARN_INVALID: &str = "RAT_LEXICAL_WARN_INVALID";

    // Syntax
    pub const SYNTAX_LOG_TRACE: &str = "RAT_SYNTAX_LOG_TRACE";
    pub const SYNTAX_WARN_TRAILING: &str = "RAT_SYNTAX_WARN_TRAILING";

    // Output
    pub const OUTPUT_TOKEN_TABLE: &str = "RAT_WRITE_TOKEN_TABLE";
    pub const OUTPUT_JSON: &str = "RAT_JSON_OUTPUT";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "RAT_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "RAT_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "RAT_LOGGING_MIN_LEVEL";
    pub const LOGGING_LOG_PERFORMANCE: &str = "RAT_LOGGING_LOG_PERFORMANCE";
    pub const LOGGING_INCLUDE_FILE_CONTEXT: &str = "RAT_LOGGING_INCLUDE_FILE_CONTEXT";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("debug"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error < LogLevel::Warning);
        assert!(LogLevel::Info < LogLevel::Debug);
        assert_eq!(LogLevel::Warning.as_str(), "WARN");
    }

    #[test]
    fn test_env_flag_fallback() {
        assert!(env_flag("RAT_TEST_FLAG_THAT_IS_NEVER_SET", true));
        assert!(!env_flag("RAT_TEST_FLAG_THAT_IS_NEVER_SET", false));
    }

    #[test]
    fn test_runtime_config_serializes() {
        let config = RuntimeConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("require_rat_extension"));
        assert!(json.contains("write_token_table"));
    }
}
