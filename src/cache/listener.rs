//! Eviction Observer Module

use crate::cache::Value;

/// Receives every entry that leaves the cache one at a time.
///
/// Called for capacity eviction, explicit deletion and lazy-expiry removal,
/// but never for a bulk `clear()` or the reset done by `load()`.
///
/// The call happens synchronously while the cache lock is held. An observer
/// must not call back into the same cache, or it will deadlock.
pub trait EvictionObserver: Send + Sync {
    fn on_evict(&self, key: String, value: Value);
}

impl<F> EvictionObserver for F
where
    F: Fn(String, Value) + Send + Sync,
{
    fn on_evict(&self, key: String, value: Value) {
        self(key, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting(AtomicUsize);

    impl EvictionObserver for Counting {
        fn on_evict(&self, _key: String, _value: Value) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_closure_and_struct_observers() {
        let seen = parking_lot::Mutex::new(Vec::new());
        let closure = |key: String, value: Value| seen.lock().push((key, value));
        closure.on_evict("a".to_string(), Value::from(1));
        assert_eq!(seen.lock().as_slice(), &[("a".to_string(), Value::Int(1))]);

        let counting = Counting(AtomicUsize::new(0));
        counting.on_evict("b".to_string(), Value::Null);
        assert_eq!(counting.0.load(Ordering::SeqCst), 1);
    }
}
