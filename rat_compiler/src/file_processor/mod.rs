//! Source file loading for the compiler front end
//!
//! Size and line limits are compile-time constants from the build profile;
//! only the extension policy and log verbosity are runtime preferences.

mod processor;

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::log_debug;
use crate::logging::codes;
pub use processor::{
    FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError, RAT_EXTENSION,
};

/// Process a file with default settings
pub fn process_file(file_path: &str) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

pub fn create_processor() -> FileProcessor {
    FileProcessor::new()
}

pub fn create_custom_processor(
    require_rat_extension: bool,
    enable_performance_logging: bool,
) -> FileProcessor {
    FileProcessor::new()
        .with_rat_extension_required(require_rat_extension)
        .with_performance_logging(enable_performance_logging)
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

pub fn should_halt_on_error(error: &FileProcessorError) -> bool {
    error.requires_halt()
}

pub fn get_error_code(error: &FileProcessorError) -> crate::logging::Code {
    error.error_code()
}

pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

pub fn get_large_file_threshold() -> u64 {
    LARGE_FILE_THRESHOLD
}

/// Verify file processor codes are registered (for system startup)
pub fn init_file_processor_logging() -> Result<(), String> {
    let required_codes = [
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::INVALID_EXTENSION,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::EMPTY_FILE,
        codes::file_processing::PERMISSION_DENIED,
        codes::file_processing::INVALID_ENCODING,
        codes::file_processing::IO_ERROR,
        codes::file_processing::INVALID_PATH,
        codes::file_processing::TOO_MANY_LINES,
        codes::warnings::LARGE_FILE,
    ];

    for code in &required_codes {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "large_file_threshold" => LARGE_FILE_THRESHOLD,
        "max_line_count" => MAX_LINE_COUNT);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_module_api() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("module.rat");
        fs::write(&file_path, "@ @\n").unwrap();

        let result = process_file(file_path.to_str().unwrap()).unwrap();
        assert_eq!(result.source, "@ @\n");
    }

    #[test]
    fn test_create_custom_processor() {
        let processor = create_custom_processor(true, false);
        assert!(processor.require_rat_extension);
        assert!(!processor.enable_performance_logging);
        assert!(!create_processor().require_rat_extension);
    }

    #[test]
    fn test_error_helpers() {
        let error = FileProcessorError::FileNotFound {
            path: "missing.rat".to_string(),
        };
        assert!(should_halt_on_error(&error));
        assert_eq!(get_error_code(&error).as_str(), "E005");
    }

    #[test]
    fn test_compile_time_limits() {
        assert_eq!(get_max_file_size(), FileProcessor::max_file_size());
        assert_eq!(get_large_file_threshold(), FileProcessor::large_file_threshold());
        assert!(get_large_file_threshold() <= get_max_file_size());
    }

    #[test]
    fn test_init_logging() {
        assert!(init_file_processor_logging().is_ok());
    }
}
