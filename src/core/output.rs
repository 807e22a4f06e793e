//! Unified output formatting utilities for consistent CLI presentation.
//!
//! Commands print their messages through these helpers so that errors, warnings and
//! confirmations look the same everywhere. Colors come from `colored`, which honors
//! `NO_COLOR` and the override set up in `main`.

use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
///
/// # Colors
/// - "✕ Error:" in red
/// - Newlines before and after for spacing
pub fn print_error(message: &str) {
    eprintln!("\n{} {}\n", "✕ Error:".red(), message);
}

/// Formats and prints an error followed by a hint on how to fix it
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
/// <hint>
///
/// ```
pub fn print_error_with_hint(message: &str, hint: &str) {
    eprintln!("\n{} {}\n{}\n", "✕ Error:".red(), message, hint.bright_black());
}

/// Prints a warning in yellow, without extra spacing
pub fn print_warning(message: &str) {
    eprintln!("{}", message.yellow());
}

/// Prints a line in red, used for skipped items that do not stop the command
pub fn print_alert(message: &str) {
    println!("{}", message.red());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message);
}

/// Prints an informational message on its own line
pub fn print_info(message: &str) {
    println!("{message}");
}
