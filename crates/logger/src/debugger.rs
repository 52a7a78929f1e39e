//! Attached-debugger channel

use crate::{LogEntry, Sink};
use std::io;

/// Sends entries to an attached debugger.
///
/// On Windows this is `OutputDebugStringW`. Other platforms have no such
/// channel, so entries go to standard error instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebuggerSink;

impl Sink for DebuggerSink {
    #[cfg(windows)]
    fn write_entry(&self, entry: &LogEntry) -> io::Result<()> {
        use windows_sys::Win32::System::Diagnostics::Debug::OutputDebugStringW;

        let wide: Vec<u16> = entry.text.encode_utf16().chain(Some(0)).collect();
        // SAFETY: `wide` is NUL-terminated and outlives the call.
        #[allow(unsafe_code)]
        unsafe {
            OutputDebugStringW(wide.as_ptr());
        }
        Ok(())
    }

    #[cfg(not(windows))]
    fn write_entry(&self, entry: &LogEntry) -> io::Result<()> {
        use std::io::Write;

        let mut stderr = io::stderr().lock();
        stderr.write_all(entry.text.as_bytes())?;
        stderr.flush()
    }
}
