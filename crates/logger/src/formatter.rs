//! Line rendering

use crate::{DisplayOptions, Level, LogEntry, Origin, process};
use chrono::Local;
use std::fmt::{self, Write};

/// Replaces the message when the caller's arguments fail to render.
pub const INVALID_PARAMETERS: &str = "invalid function call parameters";

/// Renders one log line from a message and the enabled prefix fields.
///
/// Fields appear in a fixed order: time, level, process name, pid/tid,
/// function, message. The result always ends with a newline.
#[derive(Debug, Clone, Copy)]
pub struct Formatter {
    image_name: &'static str,
}

impl Formatter {
    /// Create a formatter, resolving the process image name.
    #[must_use]
    pub fn new() -> Self {
        Self {
            image_name: process::image_name(),
        }
    }

    /// Image name this formatter prints when `show_process_name` is set.
    #[must_use]
    pub const fn image_name(&self) -> &'static str {
        self.image_name
    }

    /// Render a complete entry.
    ///
    /// If `args` fails to render, the prefix already written is kept and
    /// [`INVALID_PARAMETERS`] stands in for the message.
    #[must_use]
    pub fn render(
        &self,
        options: &DisplayOptions,
        level: Level,
        origin: &Origin<'_>,
        args: fmt::Arguments<'_>,
    ) -> LogEntry {
        let mut text = String::with_capacity(128);

        // Writing into a String cannot fail; only caller arguments can.
        if options.show_current_time {
            let _ = write!(text, "{} ", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"));
        }
        if options.show_level {
            let _ = write!(text, "[{}] ", level.tag());
        }
        if options.show_process_name {
            let _ = write!(text, "[{}] ", self.image_name);
        }
        if options.show_pid_tid {
            let _ = write!(
                text,
                "[{}:{}] ",
                process::process_id(),
                process::thread_number()
            );
        }
        if options.show_function_name && !origin.function.is_empty() {
            let _ = write!(text, "[{}] ", origin.function);
        }

        let prefix_len = text.len();
        if text.write_fmt(args).is_err() {
            text.truncate(prefix_len);
            text.push_str(INVALID_PARAMETERS);
        }

        if !text.ends_with('\n') {
            text.push('\n');
        }

        LogEntry::new(level, text)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}
