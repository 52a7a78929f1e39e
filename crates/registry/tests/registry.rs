use rotalog_logger::test_support::{CaptureSink, FailingSink};
use rotalog_registry::{
    CategoryMask, Destinations, DisplayOptions, Error, Level, LogConfig, LogEnv, LogRegistry,
    Origin, Sinks, State,
};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

fn sinks(console: &CaptureSink, debugger: &CaptureSink) -> Sinks {
    Sinks::new(Arc::new(console.clone()), Arc::new(debugger.clone()))
}

fn console_config() -> LogConfig {
    LogConfig::default()
        .with_level(Level::Debug)
        .with_display(DisplayOptions::MESSAGE_ONLY)
}

fn write(registry: &LogRegistry, id: u32, mask: u32, level: Level, text: &str) {
    registry.write_fmt(
        id,
        CategoryMask(mask),
        level,
        &Origin::unknown(),
        format_args!("{text}"),
    );
}

#[test]
fn test_initialize_is_idempotent() {
    let registry = LogRegistry::new();
    let first = CaptureSink::new();
    let second = CaptureSink::new();

    registry
        .initialize_with_sinks(1, console_config(), sinks(&first, &CaptureSink::new()))
        .unwrap();
    registry
        .initialize_with_sinks(
            1,
            console_config().with_level(Level::Error),
            sinks(&second, &CaptureSink::new()),
        )
        .unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.env(1).map(|env| env.level), Some(Level::Debug));

    write(&registry, 1, 1, Level::Info, "kept first");
    registry.finalize(1);

    assert_eq!(first.lines(), vec!["kept first"]);
    assert!(second.is_empty());
}

#[test]
fn test_finalize_unknown_and_twice() {
    let registry = LogRegistry::new();

    assert!(!registry.finalize(42));

    registry
        .initialize_with_sinks(
            42,
            console_config(),
            sinks(&CaptureSink::new(), &CaptureSink::new()),
        )
        .unwrap();
    assert!(registry.finalize(42));
    assert!(!registry.finalize(42));
    assert!(registry.is_empty());
}

#[test]
fn test_file_without_path_is_configuration_error() {
    let registry = LogRegistry::new();
    let config = console_config().with_destinations(Destinations::FILE);

    assert!(matches!(
        registry.initialize(3, config),
        Err(Error::Configuration(_))
    ));
    assert!(!registry.contains(3));
}

#[test]
fn test_start_failure_is_rolled_back() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "a file where a directory should be").unwrap();

    let registry = LogRegistry::new();
    let config = console_config()
        .with_destinations(Destinations::FILE)
        .with_file_path(blocker.join("nested").join("x.log"));

    assert!(matches!(
        registry.initialize(4, config),
        Err(Error::Resource(_))
    ));
    assert!(!registry.contains(4));
    assert_eq!(registry.state(4), None);
}

#[test]
fn test_unknown_id_falls_back_to_direct_print() {
    let console = CaptureSink::new();
    let debugger = CaptureSink::new();
    let registry = LogRegistry::with_fallback_sinks(sinks(&console, &debugger));

    write(&registry, 99, 1, Level::Warn, "nobody home");

    // Printed synchronously with every prefix field enabled.
    assert_eq!(console.len(), 1);
    assert_eq!(debugger.len(), 1);
    let line = &console.lines()[0];
    assert!(line.contains("[WARN] "));
    assert!(line.ends_with("nobody home"));
}

#[test]
fn test_mask_and_level_filter() {
    let registry = LogRegistry::new();
    let console = CaptureSink::new();
    registry
        .initialize_with_sinks(
            5,
            console_config()
                .with_mask(CategoryMask(0b0110))
                .with_level(Level::Info),
            sinks(&console, &CaptureSink::new()),
        )
        .unwrap();

    write(&registry, 5, 0b0001, Level::Error, "wrong category");
    write(&registry, 5, 0b0010, Level::Debug, "too verbose");
    write(&registry, 5, 0b0100, Level::Info, "info admitted");
    write(&registry, 5, 0b1010, Level::Error, "error admitted");
    registry.finalize(5);

    assert_eq!(console.lines(), vec!["info admitted", "error admitted"]);
}

#[test]
fn test_env_and_format_can_change_at_runtime() {
    let registry = LogRegistry::new();
    let console = CaptureSink::new();
    registry
        .initialize_with_sinks(
            6,
            console_config().with_level(Level::Error),
            sinks(&console, &CaptureSink::new()),
        )
        .unwrap();

    write(&registry, 6, 1, Level::Info, "suppressed");

    assert!(registry.set_env(6, LogEnv::new(CategoryMask::ALL, Level::Debug)));
    assert_eq!(registry.env(6), Some(LogEnv::new(CategoryMask::ALL, Level::Debug)));
    write(&registry, 6, 1, Level::Info, "admitted");

    let with_level = DisplayOptions {
        show_level: true,
        ..DisplayOptions::MESSAGE_ONLY
    };
    assert!(registry.set_format(6, with_level));
    assert_eq!(registry.format(6), Some(with_level));
    write(&registry, 6, 1, Level::Warn, "tagged");
    registry.finalize(6);

    assert_eq!(console.lines(), vec!["admitted", "[WARN] tagged"]);

    assert!(!registry.set_env(6, LogEnv::default()));
    assert!(!registry.set_format(6, DisplayOptions::default()));
    assert_eq!(registry.env(6), None);
    assert_eq!(registry.format(6), None);
}

#[test]
fn test_failing_destination_does_not_block_others() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fanout.log");
    let failing = FailingSink::new();
    let debugger = CaptureSink::new();

    let registry = LogRegistry::new();
    registry
        .initialize_with_sinks(
            7,
            console_config()
                .with_destinations(Destinations::all())
                .with_file_path(&path),
            Sinks::new(Arc::new(failing.clone()), Arc::new(debugger.clone())),
        )
        .unwrap();

    write(&registry, 7, 1, Level::Error, "first");
    write(&registry, 7, 1, Level::Info, "second");
    registry.finalize(7);

    assert_eq!(failing.attempts(), 2);
    assert_eq!(debugger.lines(), vec!["first", "second"]);

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("===="));
    assert_eq!(&lines[1..], &["first", "second"]);
}

#[test]
fn test_disabled_destinations_receive_nothing() {
    let registry = LogRegistry::new();
    let console = CaptureSink::new();
    let debugger = CaptureSink::new();
    registry
        .initialize_with_sinks(
            8,
            console_config().with_destinations(Destinations::DEBUGGER),
            sinks(&console, &debugger),
        )
        .unwrap();

    write(&registry, 8, 1, Level::Info, "debugger only");
    registry.finalize(8);

    assert!(console.is_empty());
    assert_eq!(debugger.lines(), vec!["debugger only"]);
}

#[test]
fn test_reset_finalizes_everything() {
    let registry = LogRegistry::new();
    let console = CaptureSink::new();
    for id in 10..13 {
        registry
            .initialize_with_sinks(id, console_config(), sinks(&console, &CaptureSink::new()))
            .unwrap();
        assert_eq!(registry.state(id), Some(State::Running));
        write(&registry, id, 1, Level::Info, &format!("from {id}"));
    }

    registry.reset();

    assert!(registry.is_empty());
    let mut lines = console.lines();
    lines.sort();
    assert_eq!(lines, vec!["from 10", "from 11", "from 12"]);
}
