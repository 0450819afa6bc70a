//! Pure formatting functions for UI output.
//!
//! `format_*` build the styled line; `display_*` print it. Status and echoed
//! commands go to stdout, warnings and errors to stderr.

use console::style;

use crate::warning::ConversionWarning;

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

pub fn format_command(command: &str) -> String {
    format!("{} {}", style("$").cyan(), style(command).dim())
}

pub fn format_warning(warning: &ConversionWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{}", format_success(message));
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{}", format_status(message));
}

/// Echo a command line before it is executed.
pub fn display_command(command: &str) {
    println!("{}", format_command(command));
}

/// Display a conversion warning to the user.
pub fn display_warning(warning: &ConversionWarning) {
    eprintln!("{}", format_warning(warning));
}
