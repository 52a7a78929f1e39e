//! Coloured console output

use crate::{Level, LogEntry, Sink};
use parking_lot::Mutex;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Foreground colour per level, indexed by `Level as usize`.
const LEVEL_COLORS: [Option<Color>; 4] = [
    None,               // Debug: terminal default
    Some(Color::Green), // Info
    Some(Color::Green), // Warn
    Some(Color::Red),   // Error
];

/// Foreground colour used for entries of `level`; `None` keeps the terminal default.
#[must_use]
pub const fn level_color(level: Level) -> Option<Color> {
    LEVEL_COLORS[level as usize]
}

/// Writes entries to stdout, coloured by severity.
///
/// The colour is reset after every entry so interleaved output from other
/// writers is never left tinted.
pub struct ConsoleSink {
    /// Lock for stdout (to prevent interleaving)
    stdout: Mutex<StandardStream>,
}

impl ConsoleSink {
    /// Create a console sink that colours only when stdout is a terminal.
    #[must_use]
    pub fn new() -> Self {
        Self::with_color_choice(ColorChoice::Auto)
    }

    /// Create a console sink with an explicit colour policy.
    #[must_use]
    pub fn with_color_choice(choice: ColorChoice) -> Self {
        Self {
            stdout: Mutex::new(StandardStream::stdout(choice)),
        }
    }
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink").finish_non_exhaustive()
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write_entry(&self, entry: &LogEntry) -> io::Result<()> {
        let mut stdout = self.stdout.lock();

        if let Some(color) = level_color(entry.level) {
            stdout.set_color(ColorSpec::new().set_fg(Some(color)))?;
        }
        let written = stdout.write_all(entry.text.as_bytes());
        let reset = stdout.reset();
        written?;
        reset?;

        stdout.flush()
    }

    fn flush(&self) -> io::Result<()> {
        self.stdout.lock().flush()
    }
}
