//! Pure formatting functions for UI output.
//!
//! Each `display_*` function prints the string built by its `format_*`
//! counterpart so the text can be tested without capturing stdout.

use console::style;

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Two aligned lines showing the old and new version.
pub fn format_transition(was: &str, now: &str) -> String {
    format!(
        "was: {}\nnow: {}",
        style(was).red(),
        style(now).green()
    )
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

/// Display the version transition being checked.
pub fn display_transition(was: &str, now: &str) {
    println!("{}", format_transition(was, now));
}
