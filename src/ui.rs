//! Terminal formatting for status lines.
//!
//! Everything here writes to stderr: stdout carries the rendered notes so
//! they can be piped into other tools.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::cli::WorkflowResult;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// One-line description of the release about to be cut.
pub fn release_summary(result: &WorkflowResult) -> String {
    let from = result.previous_tag.as_deref().unwrap_or(&result.base);
    format!(
        "{} -> {} ({} bump, {} change(s))",
        from,
        result.next_tag,
        result.notes.next_version_type,
        result.notes.change_shas.len()
    )
}

/// Display the release summary in bold.
pub fn display_release_summary(result: &WorkflowResult) {
    eprintln!("\n{}", style(release_summary(result)).bold());
}
