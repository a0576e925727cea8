//! Integration tests for the single-key and batch cache operations.

mod common;

use std::collections::HashMap;
use std::time::Duration;

use lcache::{Value, NO_EXPIRY};

use common::{evicted_keys, recording_cache};

#[test]
fn test_set_get_basic_types() {
    let (cache, _, _) = recording_cache(10);

    cache.set("str", "hello", NO_EXPIRY);
    cache.set("int", 42, NO_EXPIRY);
    cache.set("bool", true, NO_EXPIRY);

    assert_eq!(cache.get("str"), Some(Value::from("hello")));
    assert_eq!(cache.get_as::<i64>("int"), Some(42));
    assert_eq!(cache.get_as::<bool>("bool"), Some(true));
    assert_eq!(cache.get("missing"), None);
}

#[test]
fn test_ttl_expires_on_fixed_clock() {
    let (cache, clock, evictions) = recording_cache(10);

    cache.set("session", "abc", Duration::from_millis(500));

    clock.advance(Duration::from_millis(499));
    assert_eq!(cache.get("session"), Some(Value::from("abc")));

    clock.advance(Duration::from_millis(2));
    assert_eq!(cache.get("session"), None);
    assert_eq!(evicted_keys(&evictions), vec!["session"]);
}

#[test]
fn test_zero_ttl_never_expires() {
    let (cache, clock, _) = recording_cache(10);

    cache.set("config", "v", NO_EXPIRY);
    clock.advance(Duration::from_secs(10 * 365 * 24 * 3600));

    assert_eq!(cache.get("config"), Some(Value::from("v")));
}

#[test]
fn test_capacity_plus_one_evicts_first_key() {
    let (cache, _, evictions) = recording_cache(3);

    for (i, key) in ["k1", "k2", "k3", "k4"].iter().enumerate() {
        cache.set(*key, i as i64 + 1, NO_EXPIRY);
    }

    assert_eq!(
        evictions.lock().as_slice(),
        &[("k1".to_string(), Value::Int(1))]
    );
    let mut keys = cache.keys();
    keys.sort();
    assert_eq!(keys, vec!["k2", "k3", "k4"]);
    assert_eq!(cache.len(), 3);
}

#[test]
fn test_reset_key_is_not_next_victim() {
    let (cache, _, evictions) = recording_cache(3);

    cache.set("a", 1, NO_EXPIRY);
    cache.set("b", 2, NO_EXPIRY);
    cache.set("c", 3, NO_EXPIRY);
    cache.set("a", 100, NO_EXPIRY);
    assert!(evictions.lock().is_empty());

    cache.set("d", 4, NO_EXPIRY);

    assert_eq!(evicted_keys(&evictions), vec!["b"]);
    assert_eq!(cache.get("a"), Some(Value::Int(100)));
}

#[test]
fn test_mget_and_mset() {
    let (cache, clock, _) = recording_cache(10);

    let mut items = HashMap::new();
    items.insert("k1", "val1");
    items.insert("k2", "val2");
    cache.mset(items, Duration::from_secs(1));
    cache.set("k3", "val3", Duration::from_millis(10));
    clock.advance(Duration::from_millis(20));

    let result = cache.mget(["k1", "k2", "k3", "missing"]);

    assert_eq!(result["k1"], Some(Value::from("val1")));
    assert_eq!(result["k2"], Some(Value::from("val2")));
    assert_eq!(result["k3"], None);
    assert_eq!(result["missing"], None);
}

#[test]
fn test_mset_overwrites_existing() {
    let (cache, _, evictions) = recording_cache(2);

    cache.set("k1", "old", NO_EXPIRY);
    cache.mset(vec![("k1", "new"), ("k2", "two")], NO_EXPIRY);

    assert_eq!(cache.get("k1"), Some(Value::from("new")));
    assert_eq!(cache.len(), 2);
    assert!(evictions.lock().is_empty());
}

#[test]
fn test_has_reports_zombies() {
    let (cache, clock, _) = recording_cache(10);

    cache.set("zombie", 1, Duration::from_millis(1));
    clock.advance(Duration::from_millis(5));

    assert!(cache.has("zombie"));
    assert!(!cache.has("never-set"));
}

#[test]
fn test_len_and_keys_diverge_until_read() {
    let (cache, clock, _) = recording_cache(10);

    cache.set("a", 1, Duration::from_millis(10));
    cache.set("b", 2, Duration::from_millis(10));
    cache.set("c", 3, NO_EXPIRY);
    clock.advance(Duration::from_millis(50));

    assert_eq!(cache.len(), 3);
    assert_eq!(cache.keys(), vec!["c"]);

    cache.mget(["a", "b"]);
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.len(), cache.keys().len());
}

#[test]
fn test_keys_does_not_touch_recency() {
    let (cache, _, evictions) = recording_cache(2);

    cache.set("a", 1, NO_EXPIRY);
    cache.set("b", 2, NO_EXPIRY);
    assert_eq!(cache.keys(), vec!["b", "a"]);

    cache.set("c", 3, NO_EXPIRY);
    assert_eq!(evicted_keys(&evictions), vec!["a"]);
}

#[test]
fn test_delete_absent_does_not_notify() {
    let (cache, _, evictions) = recording_cache(10);

    assert!(!cache.delete("ghost"));
    assert!(evictions.lock().is_empty());

    cache.set("real", 1, NO_EXPIRY);
    assert!(cache.delete("real"));
    assert_eq!(evicted_keys(&evictions), vec!["real"]);
}

#[test]
fn test_clear_skips_observer() {
    let (cache, _, evictions) = recording_cache(10);

    cache.set("key1", 1, NO_EXPIRY);
    cache.set("key2", 2, NO_EXPIRY);
    cache.set("key3", 3, NO_EXPIRY);
    cache.clear();

    assert_eq!(cache.len(), 0);
    assert!(cache.keys().is_empty());
    for key in ["key1", "key2", "key3"] {
        assert!(!cache.has(key));
    }
    assert!(evictions.lock().is_empty());
}

#[test]
fn test_stats_track_every_removal_kind() {
    let (cache, clock, _) = recording_cache(2);

    cache.set("a", 1, NO_EXPIRY);
    cache.set("b", 2, Duration::from_millis(1));
    cache.set("c", 3, NO_EXPIRY);
    clock.advance(Duration::from_millis(5));
    cache.get("b");
    cache.get("c");
    cache.delete("c");

    let stats = cache.stats();
    assert_eq!(stats.evictions, 1);
    assert_eq!(stats.expirations, 1);
    assert_eq!(stats.deletions, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.total_entries, 0);
}
