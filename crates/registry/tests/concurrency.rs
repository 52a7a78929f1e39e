use rotalog_logger::test_support::CaptureSink;
use rotalog_registry::{
    CategoryMask, DisplayOptions, Level, LogConfig, LogRegistry, Origin, Sinks,
};
use std::sync::{Arc, Barrier};
use std::thread;

fn capturing_registry(id: u32) -> (Arc<LogRegistry>, CaptureSink, CaptureSink) {
    let fallback = CaptureSink::new();
    let registry = Arc::new(LogRegistry::with_fallback_sinks(Sinks::new(
        Arc::new(fallback.clone()),
        Arc::new(CaptureSink::new()),
    )));
    let console = CaptureSink::new();
    let sinks = Sinks::new(Arc::new(console.clone()), Arc::new(CaptureSink::new()));
    registry
        .initialize_with_sinks(
            id,
            LogConfig::default().with_display(DisplayOptions::MESSAGE_ONLY),
            sinks,
        )
        .unwrap();
    (registry, console, fallback)
}

#[test]
fn test_producers_keep_submission_order() {
    const PRODUCERS: usize = 8;
    const MESSAGES: usize = 250;

    let (registry, console, _fallback) = capturing_registry(1);
    let barrier = Arc::new(Barrier::new(PRODUCERS));

    let handles: Vec<_> = (0..PRODUCERS)
        .map(|producer| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for message in 0..MESSAGES {
                    registry.write_fmt(
                        1,
                        CategoryMask::ALL,
                        Level::Info,
                        &Origin::unknown(),
                        format_args!("{producer}:{message}"),
                    );
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    registry.finalize(1);

    let lines = console.lines();
    assert_eq!(lines.len(), PRODUCERS * MESSAGES);

    let mut next = [0usize; PRODUCERS];
    for line in lines {
        let (producer, message) = line.split_once(':').unwrap();
        let producer: usize = producer.parse().unwrap();
        let message: usize = message.parse().unwrap();
        assert_eq!(message, next[producer], "producer {producer} out of order");
        next[producer] += 1;
    }
    assert!(next.iter().all(|&count| count == MESSAGES));
}

#[test]
fn test_format_toggle_affects_only_later_entries() {
    let (registry, console, _fallback) = capturing_registry(2);
    let write = |text: &str| {
        registry.write_fmt(
            2,
            CategoryMask::ALL,
            Level::Error,
            &Origin::unknown(),
            format_args!("{text}"),
        );
    };

    for i in 0..50 {
        write(&format!("plain {i}"));
    }
    registry.set_format(
        2,
        DisplayOptions {
            show_level: true,
            ..DisplayOptions::MESSAGE_ONLY
        },
    );
    for i in 0..50 {
        write(&format!("tagged {i}"));
    }
    registry.finalize(2);

    let lines = console.lines();
    assert_eq!(lines.len(), 100);
    for (i, line) in lines[..50].iter().enumerate() {
        assert_eq!(line, &format!("plain {i}"));
    }
    for (i, line) in lines[50..].iter().enumerate() {
        assert_eq!(line, &format!("[ERROR] tagged {i}"));
    }
}

#[test]
fn test_finalize_races_with_writers() {
    let (registry, console, fallback) = capturing_registry(3);
    let barrier = Arc::new(Barrier::new(5));

    let handles: Vec<_> = (0..4)
        .map(|producer| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for message in 0..500 {
                    registry.write_fmt(
                        3,
                        CategoryMask::ALL,
                        Level::Info,
                        &Origin::unknown(),
                        format_args!("{producer}:{message}"),
                    );
                }
            })
        })
        .collect();

    barrier.wait();
    registry.finalize(3);
    for handle in handles {
        handle.join().unwrap();
    }

    // Entries accepted before removal are all written; later ones fall back.
    assert_eq!(console.len() + fallback.len(), 2000);
    assert!(!registry.contains(3));
}
