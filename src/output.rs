//! Output abstraction layer
//!
//! User-facing messages go through [`OutputWriter`] so the dispatcher's
//! reports can be rendered to the terminal or captured in tests. Viewer
//! output never passes through here; viewers inherit stdout directly.

use std::io::{self, IsTerminal};

use colored::{ColoredString, Colorize};

/// Trait for output operations
///
/// # Examples
///
/// ```no_run
/// use prevue::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.write("bat -n /tmp/notes.txt");
/// output.warning("No preview available for /tmp/blob");
/// output.error("Failed to start '/bin/sh'");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);
}

/// CLI implementation - writes to stdout/stderr
///
/// Errors and warnings go to stderr, which terminal pickers such as fzf
/// still show in their preview pane. Styling is only applied when the
/// destination stream is a terminal.
pub struct StdoutWriter;

impl StdoutWriter {
    /// Create a new stdout writer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for StdoutWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StdoutWriter {
    fn write(&self, message: &str) {
        println!("{message}");
    }

    fn error(&self, message: &str) {
        let label = styled("error:".red().bold(), io::stderr().is_terminal());
        eprintln!("{label} {message}");
    }

    fn warning(&self, message: &str) {
        let label = styled("warning:".yellow().bold(), io::stderr().is_terminal());
        eprintln!("{label} {message}");
    }

    fn info(&self, message: &str) {
        println!("{}", styled(message.dimmed(), io::stdout().is_terminal()));
    }
}

/// Drop styling when the output is not a terminal
fn styled(text: ColoredString, terminal: bool) -> ColoredString {
    if terminal { text } else { text.clear() }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Normal,
    Error,
    Warning,
    Info,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryWriter;

    #[test]
    fn test_stdout_writer_creation() {
        let _writer = StdoutWriter::new();
        let _writer2 = StdoutWriter::default();
    }

    #[test]
    fn test_styling_dropped_off_terminal() {
        assert_eq!(styled("fyi".dimmed(), false).to_string(), "fyi");
        assert_eq!(styled("error:".red().bold(), false).to_string(), "error:");
    }

    #[test]
    fn test_memory_writer_records_levels() {
        let writer = MemoryWriter::default();
        writer.write("plain");
        writer.error("bad");
        writer.warning("careful");
        writer.info("fyi");

        assert_eq!(
            writer.messages(),
            vec![
                (MessageLevel::Normal, "plain".to_string()),
                (MessageLevel::Error, "bad".to_string()),
                (MessageLevel::Warning, "careful".to_string()),
                (MessageLevel::Info, "fyi".to_string()),
            ]
        );
    }
}
