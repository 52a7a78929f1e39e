//! Call-site origin and rendered entries

use crate::Level;

/// Where a log call came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Origin<'a> {
    /// Enclosing function path
    pub function: &'a str,
    /// Source file
    pub file: &'a str,
    /// Source line
    pub line: u32,
}

impl<'a> Origin<'a> {
    /// Create a new origin.
    #[inline]
    #[must_use]
    pub const fn new(function: &'a str, file: &'a str, line: u32) -> Self {
        Self {
            function,
            file,
            line,
        }
    }

    /// Origin used when the caller has no meaningful location.
    #[must_use]
    pub const fn unknown() -> Origin<'static> {
        Origin {
            function: "",
            file: "",
            line: 0,
        }
    }
}

/// A fully rendered entry waiting to be written.
///
/// The text is final when the entry is created; later changes to display
/// options do not affect it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Severity, used for console colouring
    pub level: Level,
    /// Rendered, newline-terminated line
    pub text: String,
}

impl LogEntry {
    /// Create an entry from already rendered text.
    #[must_use]
    pub const fn new(level: Level, text: String) -> Self {
        Self { level, text }
    }
}
