//! Process and thread identity used in rendered prefixes

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

static IMAGE_NAME: OnceLock<String> = OnceLock::new();
static NEXT_THREAD_NUMBER: AtomicU64 = AtomicU64::new(1);

thread_local! {
    static THREAD_NUMBER: u64 = NEXT_THREAD_NUMBER.fetch_add(1, Ordering::Relaxed);
}

/// File name of the running executable, resolved once per process.
pub fn image_name() -> &'static str {
    IMAGE_NAME.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned()))
            .unwrap_or_else(|| "unknown".to_string())
    })
}

/// Id of the current process.
#[must_use]
pub fn process_id() -> u32 {
    std::process::id()
}

/// Small, process-unique number for the calling thread.
///
/// Numbers are handed out on first use, starting at 1, and never reused.
#[must_use]
pub fn thread_number() -> u64 {
    THREAD_NUMBER.with(|number| *number)
}
