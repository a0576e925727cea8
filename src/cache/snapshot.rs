//! Snapshot Persistence Module
//!
//! Point-in-time save/load of the live entries. The cache lock is held for
//! the whole encode or decode so a snapshot is never interleaved with writes.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::cache::Cache;
use crate::error::Result;
use crate::serializer::{Serializer, Snapshot};

impl Cache {
    // == Save ==
    /// Writes every live entry to `path` with the configured serializer.
    ///
    /// When nothing is live this is a no-op: the file is neither created nor
    /// truncated. Otherwise the snapshot goes to a uniquely named temp file
    /// in the same directory that is then renamed over `path`. A failed write
    /// removes the temp file and leaves any previous snapshot intact.
    /// Returns the number of entries written.
    ///
    /// # Errors
    /// - `SerializerNotFound` if the configured format was unregistered
    /// - `Io` / `Encode` from writing the file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let store = self.lock();

        let snapshot = store.live_snapshot(store.now_ms());
        if snapshot.is_empty() {
            debug!(path = %path.display(), "nothing live to save");
            return Ok(0);
        }

        let serializer = self.registry.resolve(store.serializer())?;
        if let Err(err) = write_atomic(path, serializer.as_ref(), &snapshot) {
            warn!(path = %path.display(), error = %err, "snapshot write failed");
            return Err(err);
        }

        info!(
            path = %path.display(),
            entries = snapshot.len(),
            serializer = store.serializer(),
            "cache snapshot saved"
        );
        Ok(snapshot.len())
    }

    /// Streams the live entries to `writer`; same no-op rule as [`save`](Self::save).
    pub fn save_to_writer<W: Write>(&self, mut writer: W) -> Result<usize> {
        let store = self.lock();

        let snapshot = store.live_snapshot(store.now_ms());
        if snapshot.is_empty() {
            return Ok(0);
        }

        let serializer = self.registry.resolve(store.serializer())?;
        serializer.encode_to(&mut writer, &snapshot)?;
        writer.flush()?;
        Ok(snapshot.len())
    }

    // == Load ==
    /// Replaces the cache contents with the snapshot stored at `path`.
    ///
    /// The whole file is decoded before anything changes; on any error the
    /// cache is left exactly as it was. On success the cache is cleared
    /// (without observer calls) and every entry not yet expired is inserted.
    /// Recency order afterwards follows the decoded map, not the order at
    /// save time. Returns the number of entries restored.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let mut store = self.lock();

        let serializer = self.registry.resolve(store.serializer())?;
        let file = File::open(path)?;
        let snapshot = serializer.decode_from(&mut BufReader::new(file))?;

        let decoded = snapshot.len();
        let now = store.now_ms();
        let restored = store.restore(snapshot, now);

        info!(
            path = %path.display(),
            decoded,
            restored,
            serializer = store.serializer(),
            "cache snapshot loaded"
        );
        Ok(restored)
    }

    /// Loads from an arbitrary reader; same atomicity as [`load`](Self::load).
    pub fn load_from_reader<R: Read>(&self, mut reader: R) -> Result<usize> {
        let mut store = self.lock();

        let serializer = self.registry.resolve(store.serializer())?;
        let snapshot = serializer.decode_from(&mut reader)?;

        let now = store.now_ms();
        Ok(store.restore(snapshot, now))
    }
}

/// Writes `snapshot` next to `path` and renames it into place.
///
/// The temp file is deleted on drop if any step fails.
fn write_atomic(path: &Path, serializer: &dyn Serializer, snapshot: &Snapshot) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serializer.encode_to(&mut writer, snapshot)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Value, NO_EXPIRY};
    use crate::error::CacheError;
    use crate::time::ManualClock;
    use std::sync::Arc;
    use std::time::Duration;

    fn cache_with(serializer: &str) -> (Cache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(1_700_000_000_000));
        let cache = Cache::builder()
            .serializer(serializer)
            .clock(clock.clone())
            .build()
            .unwrap();
        (cache, clock)
    }

    #[test]
    fn test_writer_roundtrip_both_formats() {
        for format in ["default", "binary"] {
            let (source, _) = cache_with(format);
            source.set("a", 1, Duration::from_secs(10));
            source.set("b", "two", NO_EXPIRY);

            let mut buf = Vec::new();
            assert_eq!(source.save_to_writer(&mut buf).unwrap(), 2);

            let (target, _) = cache_with(format);
            assert_eq!(target.load_from_reader(buf.as_slice()).unwrap(), 2);
            assert_eq!(target.get("a"), Some(Value::Int(1)));
            assert_eq!(target.get("b"), Some(Value::from("two")));
        }
    }

    #[test]
    fn test_save_to_writer_skips_expired_and_empty() {
        let (cache, clock) = cache_with("default");
        cache.set("short", 1, Duration::from_millis(5));
        clock.advance(Duration::from_millis(10));

        let mut buf = Vec::new();
        assert_eq!(cache.save_to_writer(&mut buf).unwrap(), 0);
        assert!(buf.is_empty());
        assert_eq!(cache.len(), 1, "save does not reap");
    }

    #[test]
    fn test_load_decode_failure_leaves_cache_untouched() {
        let (cache, _) = cache_with("default");
        cache.set("keep", 1, NO_EXPIRY);

        let result = cache.load_from_reader(&b"{not json"[..]);

        assert!(matches!(result, Err(CacheError::Decode(_))));
        assert_eq!(cache.get("keep"), Some(Value::Int(1)));
    }

    #[test]
    fn test_unregistered_serializer_at_runtime() {
        let (cache, _) = cache_with("binary");
        cache.set("keep", 1, NO_EXPIRY);
        cache.registry().register("binary", None);

        let mut buf = Vec::new();
        assert!(matches!(
            cache.save_to_writer(&mut buf),
            Err(CacheError::SerializerNotFound(name)) if name == "binary"
        ));
        assert!(matches!(
            cache.load_from_reader(&b""[..]),
            Err(CacheError::SerializerNotFound(_))
        ));
        assert_eq!(cache.get("keep"), Some(Value::Int(1)));
    }

    #[test]
    fn test_load_drops_entries_expired_in_transit() {
        let (source, clock) = cache_with("default");
        source.set("long", 1, Duration::from_secs(10));
        source.set("short", 2, Duration::from_millis(50));

        let mut buf = Vec::new();
        source.save_to_writer(&mut buf).unwrap();

        clock.advance(Duration::from_millis(100));
        source.clear();
        assert_eq!(source.load_from_reader(buf.as_slice()).unwrap(), 1);
        assert_eq!(source.keys(), vec!["long"]);
    }
}
