use rat_compiler::config::RuntimeConfig;
use rat_compiler::logging;
use rat_compiler::pipeline::{self, PipelineMode, PipelineResult};
use std::env;
use std::io::{self, BufRead, Write};

/// Parsed command line
#[derive(Debug, Default, PartialEq, Eq)]
struct CliOptions {
    file: Option<String>,
    help: bool,
    tokens_only: bool,
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = RuntimeConfig::default();

    logging::config::init_runtime_preferences(config.logging.clone())?;
    logging::init_global_logging()?;

    if let Err(e) = pipeline::validate_pipeline() {
        logging::safe_log_error(logging::codes::system::INITIALIZATION_FAILURE, &e);
    }

    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("rat_compiler");
    let options = parse_options(args.get(1..).unwrap_or_default());

    if options.help {
        print_help(program_name);
        return Ok(());
    }

    let file = match options.file.clone() {
        Some(file) => file,
        None => match prompt_for_file() {
            Ok(file) => file,
            Err(e) => {
                println!("Error: {}", e);
                return Ok(());
            }
        },
    };

    if options.json {
        config.output.write_json = true;
    }
    let mode = if options.tokens_only {
        PipelineMode::TokensOnly
    } else {
        PipelineMode::Full
    };

    // Failures are reported, never turned into an exit status
    match pipeline::process_file_with_config(&file, &config, mode) {
        Ok(result) => {
            print_artifacts(&result);
            print_summary(&result);
            if let Some(diagnostic) = result.syntax_diagnostic() {
                print!("{}", diagnostic);
            }
        }
        Err(e) => println!("Error: {}", e),
    }

    Ok(())
}

fn parse_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions::default();

    for arg in args {
        match arg.as_str() {
            "--help" | "-h" => options.help = true,
            "--tokens-only" => options.tokens_only = true,
            "--json" => options.json = true,
            other if other.starts_with("--") => {
                eprintln!("Warning: Unknown option '{}'", other);
            }
            other => {
                if options.file.is_some() {
                    eprintln!("Warning: Ignoring extra argument '{}'", other);
                } else {
                    options.file = Some(other.to_string());
                }
            }
        }
    }

    options
}

fn prompt_for_file() -> io::Result<String> {
    print!("Enter the input file name: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn print_help(program_name: &str) {
    println!("RAT24F Compiler v{}", env!("CARGO_PKG_VERSION"));
    println!("FSM lexical scanner and LL(1) recursive-descent recognizer");
    println!();
    println!("USAGE:");
    println!("    {} [FILE] [options]", program_name);
    println!();
    println!("ARGUMENTS:");
    println!("    [FILE]    RAT24F source file; prompted for when omitted");
    println!();
    println!("OPTIONS:");
    println!("    --help           Show this help message");
    println!("    --tokens-only    Stop after tokenization and write only the token table");
    println!("    --json           Also write <stem>_syntax_output.json");
    println!();
    println!("OUTPUT:");
    println!("    <stem>_output.txt           Token table");
    println!("    <stem>_syntax_output.txt    Derivation trace");
    println!();
    println!("BUILD:");
    println!("    {}", rat_compiler::config::build_info::source_info());
    println!();
    for line in logging::get_system_diagnostics().lines() {
        println!("    {}", line);
    }
}

fn print_artifacts(result: &PipelineResult) {
    for path in &result.artifacts {
        println!("Output file '{}' created successfully.", path.display());
    }
}

fn print_summary(result: &PipelineResult) {
    let counts = &result.lexical_metrics.counts;

    println!();
    println!("Summary:");
    println!(
        "  Source: {} ({}, {} lines)",
        result.file_metadata.path.display(),
        result.file_metadata.human_readable_size(),
        result.file_metadata.line_count
    );
    println!("  Comments removed: {}", result.comments_removed);
    println!(
        "  Tokens: {} (keywords {}, identifiers {}, operators {}, integers {}, reals {}, separators {}, invalid {})",
        counts.total,
        counts.keywords,
        counts.identifiers,
        counts.operators,
        counts.integers,
        counts.reals,
        counts.separators,
        counts.invalid
    );

    if let Some(recognition) = &result.recognition {
        let status = if recognition.is_success() {
            "accepted"
        } else {
            "rejected"
        };
        println!(
            "  Syntax: {} ({} trace entries, {} tokens matched)",
            status,
            recognition.trace.len(),
            recognition.trace.match_count()
        );
        if recognition.trailing_tokens > 0 {
            println!(
                "  Trailing tokens after closing '@': {}",
                recognition.trailing_tokens
            );
        }
    }

    println!(
        "  Time: {:.2} ms",
        result.processing_duration.as_secs_f64() * 1000.0
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_options() {
        let options = parse_options(&args(&["prog.rat", "--json", "--tokens-only"]));
        assert_eq!(options.file.as_deref(), Some("prog.rat"));
        assert!(options.json);
        assert!(options.tokens_only);
        assert!(!options.help);
    }

    #[test]
    fn test_parse_options_without_file() {
        let options = parse_options(&args(&["--help"]));
        assert!(options.help);
        assert!(options.file.is_none());
    }

    #[test]
    fn test_unknown_and_extra_arguments_ignored() {
        let options = parse_options(&args(&["a.rat", "b.rat", "--verbose"]));
        assert_eq!(options.file.as_deref(), Some("a.rat"));
        assert_eq!(options, CliOptions {
            file: Some("a.rat".to_string()),
            ..CliOptions::default()
        });
    }
}
