//! Core vocabulary for rotalog loggers.
//!
//! This crate holds everything a log line needs before it reaches a queue:
//! severities, category masks, destination flags, display options, the
//! formatter that renders one line, and the console/debugger sinks a
//! background writer fans entries out to.
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![deny(unsafe_code)]

mod console;
mod debugger;
mod display;
mod formatter;
pub mod internal;
mod level;
mod mask;
pub mod process;
mod record;
mod sink;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use console::{ConsoleSink, level_color};
pub use debugger::DebuggerSink;
pub use display::DisplayOptions;
pub use formatter::{Formatter, INVALID_PARAMETERS};
pub use level::{Level, ParseLevelError};
pub use mask::{CategoryMask, Destinations};
pub use record::{LogEntry, Origin};
pub use sink::{Sink, Sinks};

/// Expands to the path of the enclosing function, e.g. `my_crate::worker::run`.
///
/// Closures are reported as the function that contains them.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let mut name = type_name_of(f);
        name = name.strip_suffix("::f").unwrap_or(name);
        while let Some(outer) = name.strip_suffix("::{{closure}}") {
            name = outer;
        }
        name
    }};
}

/// Captures the call site as an [`Origin`].
#[macro_export]
macro_rules! origin {
    () => {
        $crate::Origin::new($crate::function_name!(), ::std::file!(), ::std::line!())
    };
}
