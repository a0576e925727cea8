//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use parking_lot::Mutex;

use lcache::{Cache, CacheBuilder, ManualClock, Value};

static TRACING: Once = Once::new();

/// Installs a fmt subscriber once; filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "lcache=debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}

pub type Evictions = Arc<Mutex<Vec<(String, Value)>>>;

/// A builder wired to a recording observer and a frozen clock.
pub fn recording_builder(capacity: usize) -> (CacheBuilder, Arc<ManualClock>, Evictions) {
    init_tracing();
    let clock = Arc::new(ManualClock::starting_now());
    let evictions: Evictions = Arc::new(Mutex::new(Vec::new()));
    let sink = evictions.clone();
    let builder = Cache::builder()
        .capacity(capacity)
        .clock(clock.clone())
        .eviction_observer(move |key: String, value: Value| sink.lock().push((key, value)));
    (builder, clock, evictions)
}

pub fn recording_cache(capacity: usize) -> (Cache, Arc<ManualClock>, Evictions) {
    let (builder, clock, evictions) = recording_builder(capacity);
    (builder.build().expect("valid test cache"), clock, evictions)
}

pub fn evicted_keys(evictions: &Evictions) -> Vec<String> {
    evictions.lock().iter().map(|(k, _)| k.clone()).collect()
}
