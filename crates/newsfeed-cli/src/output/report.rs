use std::path::Path;

use colored::Colorize;
use query_metadata::Diagnostics;
use url::Url;

use crate::errors::CliError;

/// reports an error to stderr
pub fn error(error: &CliError) {
    eprintln!("{}", format!("Error: {error}").bright_red());
    if let Some(hint) = error.to_hint() {
        eprintln!("{}", format!("Hint: {hint}").bright_blue());
    }
}

/// reports an error that does not end the command
pub fn recoverable(error: &dyn std::error::Error) {
    eprintln!("{}", format!("Error: {error}").bright_red());
}

pub fn schema_fetched(url: &Url, path: &Path, types: usize) {
    eprintln!(
        "✨ fetched {types} types from {} into {}",
        url.as_str().bright_blue(),
        path.display().to_string().bright_blue()
    );
}

/// reports the validation errors a best effort build left out
pub fn tolerated(diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        return;
    }

    eprintln!(
        "{}",
        format!("Warning: left out {} invalid selection(s)", diagnostics.len()).bright_yellow()
    );

    for error in diagnostics.iter() {
        eprintln!("  - {error}");
    }
}

pub fn bundle_written(entry: &str, path: &Path) {
    eprintln!(
        "✨ wrote the bundle for {} to {}",
        entry.bright_blue(),
        path.display().to_string().bright_blue()
    );
}

pub fn check_passed(entry: &str) {
    eprintln!("✨ the fragments of {} hold against the schema", entry.bright_blue());
}
