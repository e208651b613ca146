//! Output abstraction layer
//!
//! Rendering goes through [`OutputWriter`] so the same code can print to a
//! terminal or be captured in tests.

use colored::Colorize;
use std::sync::{Mutex, PoisonError};

/// Trait for output operations
///
/// # Examples
///
/// ```no_run
/// use swillan::ui::output::{OutputWriter, StdoutWriter};
///
/// let output = StdoutWriter::new();
/// output.write("Normal message");
/// output.success("Operation completed!");
/// output.error("Something went wrong");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write a normal message
    fn write(&self, message: &str);

    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);
}

/// CLI implementation - writes to stdout/stderr
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
        eprintln!("{} {}", "❌".red(), message);
    }

    fn success(&self, message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    fn warning(&self, message: &str) {
        println!("{} {}", "⚠️".yellow(), message);
    }

    fn info(&self, message: &str) {
        println!("{}", message.dimmed());
    }
}

/// Message level for categorizing output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Normal,
    Error,
    Success,
    Warning,
    Info,
}

/// Writer that keeps every message in memory
///
/// Used by tests and by callers that want to post-process rendered output.
#[derive(Default)]
pub struct BufferWriter {
    messages: Mutex<Vec<(MessageLevel, String)>>,
}

impl BufferWriter {
    /// Create an empty buffer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages written so far
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.lock().clone()
    }

    /// Messages joined with newlines, levels dropped
    #[must_use]
    pub fn text(&self) -> String {
        self.lock()
            .iter()
            .map(|(_, msg)| msg.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Drop all buffered messages
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn push(&self, level: MessageLevel, message: &str) {
        self.lock().push((level, message.to_string()));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(MessageLevel, String)>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl OutputWriter for BufferWriter {
    fn write(&self, message: &str) {
        self.push(MessageLevel::Normal, message);
    }

    fn error(&self, message: &str) {
        self.push(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.push(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.push(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.push(MessageLevel::Info, message);
    }
}
