//! Output formatting for the installer CLI.
//!
//! Progress and diagnostics go to stderr through an injected writer so flows
//! remain testable; colour is applied with `console` styles.

use console::style;
use std::io::Write;

/// Writes a line to the given writer, ignoring write failures.
pub fn write_stderr_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort logging; ignore write failures.
    }
}

/// Writes a cyan progress/notice line.
pub fn write_notice(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    write_stderr_line(stderr, style(message).cyan());
}

/// Writes a green success line.
pub fn write_success(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    write_stderr_line(stderr, style(message).green());
}

/// Writes a red fatal diagnostic line.
pub fn write_fatal(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    write_stderr_line(stderr, style(message).red());
}
