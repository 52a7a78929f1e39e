//! Per-instance display toggles

use serde::{Deserialize, Serialize};

/// Which prefix fields the formatter renders in front of each message.
///
/// Each flag is independent and can be changed on a running logger; the
/// change applies to entries rendered after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct DisplayOptions {
    /// Severity tag, e.g. `[WARN]`
    pub show_level: bool,
    /// Local wall-clock time with millisecond resolution
    pub show_current_time: bool,
    /// Image name of the current executable
    pub show_process_name: bool,
    /// Process id and logging thread number
    pub show_pid_tid: bool,
    /// Path of the function that produced the entry
    pub show_function_name: bool,
}

impl DisplayOptions {
    /// Every prefix field disabled; only the message is rendered.
    pub const MESSAGE_ONLY: Self = Self {
        show_level: false,
        show_current_time: false,
        show_process_name: false,
        show_pid_tid: false,
        show_function_name: false,
    };
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_level: true,
            show_current_time: true,
            show_process_name: true,
            show_pid_tid: true,
            show_function_name: true,
        }
    }
}
