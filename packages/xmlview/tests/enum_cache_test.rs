//! Concurrent first use of enum conversion.

use std::sync::{Arc, Barrier};
use std::thread;

use xmlview::convert::to_enum;
use xmlview::EnumCache;

#[derive(Debug, Clone, Copy, PartialEq, strum::VariantArray, strum::IntoStaticStr)]
enum Status {
    Draft,
    Review,
    Published,
    Withdrawn,
}

#[derive(Debug, Clone, Copy, PartialEq, strum::VariantArray, strum::IntoStaticStr)]
enum Level {
    Low,
    High,
}

const THREADS: usize = 16;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("xmlview=trace")
        .try_init();
}

#[test]
fn test_concurrent_first_use_sees_one_complete_table() {
    init_tracing();
    let cache = EnumCache::new();
    let barrier = Barrier::new(THREADS);

    let tables: Vec<_> = thread::scope(|s| {
        let (cache, barrier) = (&cache, &barrier);
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(move || {
                    barrier.wait();
                    cache.table::<Status>()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(cache.len(), 1);
    let first = &tables[0];
    for table in &tables {
        assert!(Arc::ptr_eq(first, table));
        assert_eq!(table.len(), 4);
        assert_eq!(table.lookup("Published"), Some(Status::Published));
    }
}

#[test]
fn test_concurrent_to_enum_never_misses() {
    init_tracing();
    let barrier = Barrier::new(THREADS);
    let inputs = ["Low", "High", "low", "Medium"];

    thread::scope(|s| {
        for i in 0..THREADS {
            let barrier = &barrier;
            s.spawn(move || {
                barrier.wait();
                let input = inputs[i % inputs.len()];
                let expected = match input {
                    "Low" => Some(Level::Low),
                    "High" => Some(Level::High),
                    _ => None,
                };
                assert_eq!(to_enum::<Level>(input), expected);
            });
        }
    });

    assert!(EnumCache::global().len() >= 1);
}
