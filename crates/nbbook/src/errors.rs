//! Error types and error reporting utilities

use colored::*;
use std::path::PathBuf;
use thiserror::Error;

/// Conditions callers may want to tell apart from plain I/O failures
#[derive(Debug, Error)]
pub enum BookError {
    #[error("TOC file not found: {}", .0.display())]
    TocNotFound(PathBuf),

    #[error("Invalid notebook {}: {source}", .path.display())]
    InvalidNotebook {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Print a formatted error message
pub fn print_error(context: &str, error: &anyhow::Error) {
    eprintln!("{} {}", "Error:".red().bold(), context);
    eprintln!("  {}", error.to_string().red());

    // Show chain of causes
    for cause in error.chain().skip(1) {
        eprintln!("  {} {}", "Caused by:".dimmed(), cause.to_string().dimmed());
    }
}

/// Print an error with a suggestion
pub fn print_error_with_suggestion(context: &str, error: &anyhow::Error, suggestion: &str) {
    print_error(context, error);
    eprintln!("\n{} {}", "Suggestion:".cyan().bold(), suggestion);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    eprintln!("{} {}", "Warning:".yellow().bold(), message);
}
