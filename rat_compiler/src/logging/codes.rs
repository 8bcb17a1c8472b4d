//! Consolidated error codes and classification system
//!
//! Single source of truth for all error, warning and success codes together
//! with their behavioral metadata.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Lexical analysis error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_TOKEN: Code = Code::new("E020");
    pub const LEXEME_TOO_LONG: Code = Code::new("E023");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
}

/// Syntax analysis error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_END_OF_INPUT: Code = Code::new("E040");
    pub const EMPTY_TOKEN_STREAM: Code = Code::new("E041");
    pub const EXPECTED_QUALIFIER: Code = Code::new("E045");
    pub const EXPECTED_RELATIONAL_OPERATOR: Code = Code::new("E046");
    pub const INVALID_STATEMENT: Code = Code::new("E047");
    pub const INVALID_FACTOR: Code = Code::new("E048");
    pub const TOKEN_MISMATCH: Code = Code::new("E050");
    pub const MAX_RECURSION_DEPTH: Code = Code::new("E087");
    pub const TRACE_LIMIT_EXCEEDED: Code = Code::new("E088");
}

/// Output artifact error codes
pub mod output {
    use super::Code;

    pub const WRITE_FAILURE: Code = Code::new("E060");
    pub const SERIALIZATION_FAILURE: Code = Code::new("E061");
    pub const INVALID_OUTPUT_PATH: Code = Code::new("E062");
}

// ============================================================================
// WARNING CODE CONSTANTS
// ============================================================================

/// Non-fatal conditions worth surfacing
pub mod warnings {
    use super::Code;

    pub const INVALID_TOKENS_PRESENT: Code = Code::new("W020");
    pub const UNTERMINATED_COMMENT: Code = Code::new("W021");
    pub const LARGE_FILE: Code = Code::new("W005");
    pub const TRAILING_TOKENS: Code = Code::new("W040");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    // General success codes
    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    // File processing success codes
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const COMMENTS_STRIPPED: Code = Code::new("I010");

    // Lexical success codes
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");

    // Syntax success codes
    pub const RECOGNITION_COMPLETE: Code = Code::new("I041");

    // Output success codes
    pub const OUTPUT_WRITTEN: Code = Code::new("I060");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut registry = HashMap::new();
        let mut add = |metadata: ErrorMetadata| {
            registry.insert(metadata.code, metadata);
        };

        // System errors
        add(ErrorMetadata::new(
            "ERR001",
            "System",
            Severity::Critical,
            false,
            true,
            "Critical internal system error",
            "File a bug report with the input that triggered it",
        ));
        add(ErrorMetadata::new(
            "ERR002",
            "System",
            Severity::Critical,
            false,
            true,
            "System initialization failure",
            "Check build profile and RAT_* environment settings",
        ));

        // File processing errors
        add(ErrorMetadata::new(
            "E005",
            "FileProcessing",
            Severity::Medium,
            false,
            true,
            "File not found at specified path",
            "Check file path and ensure file exists",
        ));
        add(ErrorMetadata::new(
            "E006",
            "FileProcessing",
            Severity::Low,
            true,
            false,
            "File does not have .rat extension",
            "Rename file with .rat extension or unset RAT_REQUIRE_RAT_EXTENSION",
        ));
        add(ErrorMetadata::new(
            "E007",
            "FileProcessing",
            Severity::Medium,
            false,
            true,
            "File exceeds maximum size limit",
            "Reduce file size or build with a larger limit profile",
        ));
        add(ErrorMetadata::new(
            "E008",
            "FileProcessing",
            Severity::Medium,
            false,
            true,
            "File is empty when content expected",
            "Provide a file containing a RAT24F program",
        ));
        add(ErrorMetadata::new(
            "E009",
            "FileProcessing",
            Severity::Medium,
            false,
            true,
            "Permission denied accessing file",
            "Check file permissions and user access rights",
        ));
        add(ErrorMetadata::new(
            "E010",
            "FileProcessing",
            Severity::Medium,
            false,
            true,
            "File content is not valid UTF-8",
            "Save the source file as UTF-8 text",
        ));
        add(ErrorMetadata::new(
            "E011",
            "FileProcessing",
            Severity::High,
            false,
            true,
            "I/O error while reading file",
            "Check disk health and retry",
        ));
        add(ErrorMetadata::new(
            "E012",
            "FileProcessing",
            Severity::Medium,
            false,
            true,
            "Path is not a regular file",
            "Provide the path of a source file, not a directory",
        ));
        add(ErrorMetadata::new(
            "E013",
            "FileProcessing",
            Severity::Medium,
            false,
            true,
            "File exceeds maximum line count",
            "Split the program or build with a larger limit profile",
        ));

        // Lexical errors
        add(ErrorMetadata::new(
            "E020",
            "Lexical",
            Severity::Low,
            true,
            false,
            "Character sequence does not form a valid token",
            "Check for stray characters or malformed numbers such as '1.'",
        ));
        add(ErrorMetadata::new(
            "E023",
            "Lexical",
            Severity::Medium,
            false,
            true,
            "Lexeme exceeds maximum length",
            "Shorten the identifier or literal",
        ));
        add(ErrorMetadata::new(
            "E027",
            "Lexical",
            Severity::High,
            false,
            true,
            "Token count exceeds configured limit",
            "Split the program or build with a larger limit profile",
        ));

        // Syntax errors
        add(ErrorMetadata::new(
            "E040",
            "Syntax",
            Severity::High,
            false,
            true,
            "Input ended while the grammar still expected a token",
            "Complete the construct; every program ends with '@'",
        ));
        add(ErrorMetadata::new(
            "E041",
            "Syntax",
            Severity::High,
            false,
            true,
            "No tokens to recognize",
            "Provide a program containing at least the two '@' markers",
        ));
        add(ErrorMetadata::new(
            "E045",
            "Syntax",
            Severity::High,
            false,
            true,
            "Expected a qualifier",
            "Use one of integer, boolean or real",
        ));
        add(ErrorMetadata::new(
            "E046",
            "Syntax",
            Severity::High,
            false,
            true,
            "Expected a relational operator",
            "Use one of == != > < <= >= in conditions",
        ));
        add(ErrorMetadata::new(
            "E047",
            "Syntax",
            Severity::High,
            false,
            true,
            "Token cannot start a statement",
            "Statements start with an identifier, '{', or if/return/put/get/while",
        ));
        add(ErrorMetadata::new(
            "E048",
            "Syntax",
            Severity::High,
            false,
            true,
            "Token cannot start a factor",
            "Factors are identifiers, numbers, true/false, or a parenthesized expression",
        ));
        add(ErrorMetadata::new(
            "E050",
            "Syntax",
            Severity::High,
            false,
            true,
            "Token kind does not match the grammar",
            "Check the token against the production being applied",
        ));
        add(ErrorMetadata::new(
            "E087",
            "Syntax",
            Severity::Critical,
            false,
            true,
            "Maximum recursion depth exceeded",
            "Reduce nesting of statements and expressions",
        ));
        add(ErrorMetadata::new(
            "E088",
            "Syntax",
            Severity::Critical,
            false,
            true,
            "Derivation trace exceeds configured limit",
            "Split the program or build with a larger limit profile",
        ));

        // Output errors
        add(ErrorMetadata::new(
            "E060",
            "Output",
            Severity::High,
            false,
            true,
            "Failed to write output artifact",
            "Check that the output directory is writable",
        ));
        add(ErrorMetadata::new(
            "E061",
            "Output",
            Severity::Medium,
            false,
            true,
            "Failed to serialize output artifact",
            "File a bug report with the input that triggered it",
        ));
        add(ErrorMetadata::new(
            "E062",
            "Output",
            Severity::Medium,
            false,
            true,
            "Cannot derive output path from input path",
            "Provide an input path with a file name",
        ));

        // Warnings
        add(ErrorMetadata::new(
            "W005",
            "FileProcessing",
            Severity::Low,
            true,
            false,
            "File is larger than the large-file threshold",
            "No action required",
        ));
        add(ErrorMetadata::new(
            "W020",
            "Lexical",
            Severity::Low,
            true,
            false,
            "Token stream contains invalid tokens",
            "Inspect the token table for rows of kind 'invalid'",
        ));
        add(ErrorMetadata::new(
            "W021",
            "Lexical",
            Severity::Low,
            true,
            false,
            "Comment opened with '[*' is never closed",
            "Close the comment with '*]'",
        ));
        add(ErrorMetadata::new(
            "W040",
            "Syntax",
            Severity::Low,
            true,
            false,
            "Tokens follow the closing '@'",
            "Remove text after the end of the program",
        ));

        // Success codes
        add(ErrorMetadata::new(
            "I001",
            "Success",
            Severity::Low,
            true,
            false,
            "Operation completed successfully",
            "No action required",
        ));
        add(ErrorMetadata::new(
            "I004",
            "Success",
            Severity::Low,
            true,
            false,
            "System initialization completed",
            "No action required",
        ));
        add(ErrorMetadata::new(
            "I006",
            "Success",
            Severity::Low,
            true,
            false,
            "File read and validated",
            "No action required",
        ));
        add(ErrorMetadata::new(
            "I010",
            "Success",
            Severity::Low,
            true,
            false,
            "Comments stripped from source",
            "No action required",
        ));
        add(ErrorMetadata::new(
            "I020",
            "Success",
            Severity::Low,
            true,
            false,
            "Tokenization complete",
            "No action required",
        ));
        add(ErrorMetadata::new(
            "I041",
            "Success",
            Severity::Low,
            true,
            false,
            "Program recognized",
            "No action required",
        ));
        add(ErrorMetadata::new(
            "I060",
            "Success",
            Severity::Low,
            true,
            false,
            "Output artifact written",
            "No action required",
        ));

        registry
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}
