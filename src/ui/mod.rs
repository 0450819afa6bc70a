//! User interface module - formatting of progress, warnings and the final
//! summary.

pub mod formatter;

pub use formatter::{
    display_command, display_error, display_status, display_success, display_warning,
};

use console::style;

use crate::convert::ConversionSummary;

/// Print what a finished conversion produced.
///
/// Lists at most 10 names per category, then a count of the rest.
pub fn display_summary(summary: &ConversionSummary) {
    println!("\n{}", style("Conversion complete").bold());

    print_names("Tags", &summary.tags);
    print_names("Branches", &summary.branches);

    match &summary.promoted {
        Some(default_branch) => println!("  Default branch: {}", style(default_branch).green()),
        None => println!("  Default branch: unchanged (no trunk found)"),
    }

    if !summary.warnings.is_empty() {
        println!(
            "  {}",
            style(format!("{} warning(s) reported", summary.warnings.len())).yellow()
        );
    }
}

fn print_names(label: &str, names: &[String]) {
    println!("  {} ({}):", style(label).underlined(), names.len());

    for name in names.iter().take(10) {
        println!("    - {}", name);
    }

    if names.len() > 10 {
        println!("    ... and {} more", names.len() - 10);
    }
}
