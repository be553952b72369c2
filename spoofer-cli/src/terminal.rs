// ============================================================================
// spoofer-cli/src/terminal.rs
// ============================================================================
//
// TERMINAL OUTPUT: UI Components and Styling
//
// Sections, status lines, success and error messages for the CLI. Colors
// are applied with owo-colors and switched off globally when stdout is not
// a terminal or NO_COLOR is set.
//
// KEY COMPONENTS:
// - styling: Symbols and indentation shared by every component
// - print_section / print_status / print_processing / print_success / print_error

// ---- External crate imports ----
use owo_colors::OwoColorize;

// ---- Standard library imports ----
use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

// ============================================================================
// STYLING CONSTANTS
// ============================================================================

/// Styling constants for terminal output
pub mod styling {
    pub const SUCCESS_SYMBOL: &str = "✓";
    pub const ERROR_SYMBOL: &str = "✗";
    pub const PROCESSING_SYMBOL: &str = "»";

    pub const SECTION_PREFIX: &str = "===== ";
    pub const SECTION_SUFFIX: &str = " =====";

    pub const STATUS_INDENT: &str = "  ";

    /// Width the status labels are padded to
    pub const LABEL_WIDTH: usize = 14;
}

// Global color setting
static USE_COLOR: AtomicBool = AtomicBool::new(true);

/// Set whether to use color in terminal output
pub fn set_color(enable: bool) {
    USE_COLOR.store(enable, Ordering::Relaxed);
}

/// Check if color should be used
fn should_use_color() -> bool {
    USE_COLOR.load(Ordering::Relaxed)
}

// ============================================================================
// TERMINAL COMPONENTS
// ============================================================================

/// Print a section header for major workflow phases
pub fn print_section(title: &str) {
    let title = title.to_uppercase();
    println!();
    if should_use_color() {
        println!(
            "{}{}{}",
            styling::SECTION_PREFIX,
            title.cyan().bold(),
            styling::SECTION_SUFFIX
        );
    } else {
        println!("{}{title}{}", styling::SECTION_PREFIX, styling::SECTION_SUFFIX);
    }
    println!();
}

/// Formats a key-value status line.
pub fn format_status<T: Display>(label: &str, value: T) -> String {
    let label = format!("{:width$}", format!("{label}:"), width = styling::LABEL_WIDTH);
    if should_use_color() {
        format!("{}{} {value}", styling::STATUS_INDENT, label.bright_cyan())
    } else {
        format!("{}{label} {value}", styling::STATUS_INDENT)
    }
}

/// Print a key-value status line
pub fn print_status<T: Display>(label: &str, value: T) {
    println!("{}", format_status(label, value));
}

/// Formats a processing step line.
pub fn format_processing(message: &str) -> String {
    if should_use_color() {
        format!("{} {}", styling::PROCESSING_SYMBOL.cyan(), message.bold())
    } else {
        format!("{} {message}", styling::PROCESSING_SYMBOL)
    }
}

/// Print a processing step
pub fn print_processing(message: &str) {
    println!("{}", format_processing(message));
}

/// Print a success message with a checkmark
pub fn print_success(message: &str) {
    if should_use_color() {
        println!("{} {}", styling::SUCCESS_SYMBOL.green().bold(), message.green());
    } else {
        println!("{} {message}", styling::SUCCESS_SYMBOL);
    }
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
    if should_use_color() {
        eprintln!(
            "{} {} {message}",
            styling::ERROR_SYMBOL.red().bold(),
            "Error:".bright_red().bold()
        );
    } else {
        eprintln!("{} Error: {message}", styling::ERROR_SYMBOL);
    }
}
