//! Ingestion macros

/// Submit a formatted entry to a logger in the process-wide registry.
///
/// The mask is a raw `u32` category bitmask.
///
/// ```no_run
/// use rotalog_registry::{Level, log_write};
///
/// log_write!(1, 0b0001, Level::Info, "listening on {}", 8080);
/// ```
#[macro_export]
macro_rules! log_write {
    ($id:expr, $mask:expr, $level:expr, $($arg:tt)+) => {
        $crate::log_write_fmt(
            $id,
            $crate::CategoryMask($mask),
            $level,
            &$crate::origin!(),
            ::std::format_args!($($arg)+),
        )
    };
}

/// Submit an error entry. See [`log_write!`].
#[macro_export]
macro_rules! log_error {
    ($id:expr, $mask:expr, $($arg:tt)+) => {
        $crate::log_write!($id, $mask, $crate::Level::Error, $($arg)+)
    };
}

/// Submit a warning entry. See [`log_write!`].
#[macro_export]
macro_rules! log_warn {
    ($id:expr, $mask:expr, $($arg:tt)+) => {
        $crate::log_write!($id, $mask, $crate::Level::Warn, $($arg)+)
    };
}

/// Submit an informational entry. See [`log_write!`].
#[macro_export]
macro_rules! log_info {
    ($id:expr, $mask:expr, $($arg:tt)+) => {
        $crate::log_write!($id, $mask, $crate::Level::Info, $($arg)+)
    };
}

/// Submit a debug entry. See [`log_write!`].
#[macro_export]
macro_rules! log_debug {
    ($id:expr, $mask:expr, $($arg:tt)+) => {
        $crate::log_write!($id, $mask, $crate::Level::Debug, $($arg)+)
    };
}
