use chrono::{Local, TimeDelta};
use rotalog_logger::LogEntry;
use rotalog_logger::test_support::CaptureSink;
use rotalog_logger_file::ArchiveNaming;
use rotalog_registry::{
    CategoryMask, Destinations, DisplayOptions, Level, LogConfig, LogRegistry, Origin, Sink, Sinks,
};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tempfile::TempDir;

const STALE_ARCHIVE: &str = "x.2020-01-01_00-00-00.log";

fn file_config(path: &Path, max_lines: u64, max_files: usize) -> LogConfig {
    LogConfig::default()
        .with_level(Level::Debug)
        .with_destinations(Destinations::FILE)
        .with_file_path(path)
        .with_max_log_count(max_lines)
        .with_max_log_files(max_files)
        .with_display(DisplayOptions::MESSAGE_ONLY)
}

fn quiet_registry() -> LogRegistry {
    let sinks = Sinks::new(Arc::new(CaptureSink::new()), Arc::new(CaptureSink::new()));
    LogRegistry::with_fallback_sinks(sinks)
}

fn initialize(registry: &LogRegistry, id: u32, config: LogConfig) {
    let sinks = Sinks::new(Arc::new(CaptureSink::new()), Arc::new(CaptureSink::new()));
    registry.initialize_with_sinks(id, config, sinks).unwrap();
}

fn write(registry: &LogRegistry, id: u32, text: &str) {
    registry.write_fmt(
        id,
        CategoryMask::ALL,
        Level::Info,
        &Origin::unknown(),
        format_args!("{text}"),
    );
}

/// Archives of `x.log` in `dir`, sorted by name.
fn archives(dir: &Path) -> Vec<PathBuf> {
    let mut found: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            let name = path.file_name().unwrap().to_string_lossy();
            name.starts_with("x.") && name.ends_with(".log") && name != "x.log"
        })
        .collect();
    found.sort();
    found
}

fn wait_for(condition: impl Fn() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for the writer");
        thread::sleep(Duration::from_millis(10));
    }
}

/// Console that takes a while per entry, so a queue backs up behind it.
struct SlowSink {
    inner: CaptureSink,
    delay: Duration,
}

impl Sink for SlowSink {
    fn write_entry(&self, entry: &LogEntry) -> io::Result<()> {
        thread::sleep(self.delay);
        self.inner.write_entry(entry)
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_eleven_messages_with_two_archives() {
    let dir = TempDir::new().unwrap();
    let stale = dir.path().join(STALE_ARCHIVE);
    fs::write(&stale, "left over from an earlier run\n").unwrap();
    thread::sleep(Duration::from_millis(50));

    let path = dir.path().join("x.log");
    let registry = quiet_registry();
    initialize(&registry, 1, file_config(&path, 5, 2));

    for i in 1..=6 {
        write(&registry, 1, &format!("message {i}"));
    }
    // Archive names have one-second resolution.
    wait_for(|| archives(dir.path()).len() == 2);
    thread::sleep(Duration::from_millis(1100));

    for i in 7..=11 {
        write(&registry, 1, &format!("message {i}"));
    }
    registry.finalize(1);

    let live = read_lines(&path);
    assert_eq!(live.len(), 2);
    assert!(live[0].starts_with("==== log segment opened"));
    assert_eq!(live[1], "message 11");

    let remaining = archives(dir.path());
    assert_eq!(remaining.len(), 2);
    assert!(!stale.exists());

    let first = read_lines(&remaining[0]);
    assert_eq!(&first[1..], &["message 1", "message 2", "message 3", "message 4", "message 5"]);
    let second = read_lines(&remaining[1]);
    assert_eq!(&second[1..], &["message 6", "message 7", "message 8", "message 9", "message 10"]);
}

#[test]
fn test_rotation_round_trip() {
    const MAX_LINES: u64 = 4;

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x.log");
    let registry = quiet_registry();
    initialize(&registry, 2, file_config(&path, MAX_LINES, 10));

    for i in 1..=MAX_LINES + 1 {
        write(&registry, 2, &format!("line {i}"));
    }
    registry.finalize(2);

    let archived = archives(dir.path());
    assert_eq!(archived.len(), 1);

    let archive = read_lines(&archived[0]);
    assert!(archive[0].starts_with("===="));
    assert!(archive[0].contains("no previous segment"));
    assert_eq!(&archive[1..], &["line 1", "line 2", "line 3", "line 4"]);

    let live = read_lines(&path);
    let archive_name = archived[0].file_name().unwrap().to_string_lossy().into_owned();
    assert!(live[0].contains(&archive_name));
    assert_eq!(&live[1..], &["line 5"]);
}

#[test]
fn test_restart_archives_previous_run() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x.log");
    let registry = quiet_registry();

    initialize(&registry, 3, file_config(&path, 100, 10));
    write(&registry, 3, "first run");
    registry.finalize(3);

    initialize(&registry, 3, file_config(&path, 100, 10));
    write(&registry, 3, "second run");
    registry.finalize(3);

    let archived = archives(dir.path());
    assert_eq!(archived.len(), 1);
    assert_eq!(read_lines(&archived[0])[1..], ["first run"]);
    assert_eq!(read_lines(&path)[1..], ["second run"]);
}

#[test]
fn test_zero_max_lines_never_rotates() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x.log");
    let registry = quiet_registry();
    initialize(&registry, 4, file_config(&path, 0, 10));

    for i in 0..50 {
        write(&registry, 4, &format!("line {i}"));
    }
    registry.finalize(4);

    assert!(archives(dir.path()).is_empty());
    assert_eq!(read_lines(&path).len(), 51);
}

#[test]
fn test_missing_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("x.log");
    let registry = quiet_registry();
    initialize(&registry, 5, file_config(&path, 100, 10));

    write(&registry, 5, "hello");
    registry.finalize(5);

    assert_eq!(read_lines(&path)[1..], ["hello"]);
}

#[test]
fn test_reinitialize_waits_for_previous_drain() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x.log");
    let registry = quiet_registry();

    let drained = CaptureSink::new();
    let slow = SlowSink {
        inner: drained.clone(),
        delay: Duration::from_millis(5),
    };
    let config = file_config(&path, 100, 10)
        .with_destinations(Destinations::FILE | Destinations::CONSOLE);
    registry
        .initialize_with_sinks(
            1,
            config,
            Sinks::new(Arc::new(slow), Arc::new(CaptureSink::new())),
        )
        .unwrap();
    for i in 0..40 {
        write(&registry, 1, &format!("old-{i}"));
    }

    thread::scope(|scope| {
        scope.spawn(|| registry.finalize(1));
        thread::sleep(Duration::from_millis(50));

        initialize(&registry, 1, file_config(&path, 100, 10));
        assert_eq!(drained.len(), 40);
    });
    write(&registry, 1, "new");
    registry.finalize(1);

    assert_eq!(read_lines(&path)[1..], ["new"]);
    let archived = archives(dir.path());
    assert_eq!(archived.len(), 1);
    let expected: Vec<String> = (0..40).map(|i| format!("old-{i}")).collect();
    assert_eq!(read_lines(&archived[0])[1..], expected[..]);
}

#[test]
fn test_idle_logger_flushes_on_interval() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x.log");
    let registry = quiet_registry();
    initialize(
        &registry,
        1,
        file_config(&path, 100, 10).with_flush_interval(Duration::from_millis(200)),
    );

    write(&registry, 1, "important");
    wait_for(|| {
        fs::read_to_string(&path)
            .map(|text| text.contains("important"))
            .unwrap_or(false)
    });

    registry.finalize(1);
}

#[test]
fn test_failed_rotation_is_retried_on_next_write() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("x.log");
    let registry = quiet_registry();
    let console = CaptureSink::new();
    let config = file_config(&path, 2, 100)
        .with_destinations(Destinations::FILE | Destinations::CONSOLE);
    registry
        .initialize_with_sinks(
            1,
            config,
            Sinks::new(Arc::new(console.clone()), Arc::new(CaptureSink::new())),
        )
        .unwrap();

    // Directories squatting on every archive name the next seconds produce
    // make the rename fail.
    let naming = ArchiveNaming::new(&path).unwrap();
    let now = Local::now();
    let blockers: Vec<PathBuf> = (-2..=10)
        .map(|offset| naming.archive_path(now + TimeDelta::seconds(offset)))
        .collect();
    for blocker in &blockers {
        fs::create_dir(blocker).unwrap();
    }

    for i in 1..=4 {
        write(&registry, 1, &format!("l{i}"));
    }
    wait_for(|| console.len() == 4);
    thread::sleep(Duration::from_millis(300));

    for blocker in &blockers {
        fs::remove_dir(blocker).unwrap();
    }
    write(&registry, 1, "l5");
    registry.finalize(1);

    assert_eq!(console.lines(), vec!["l1", "l2", "l3", "l4", "l5"]);
    assert_eq!(read_lines(&path)[1..], ["l5"]);
    let archived = archives(dir.path());
    assert_eq!(archived.len(), 1);
    assert_eq!(read_lines(&archived[0])[1..], ["l1", "l2"]);
}
