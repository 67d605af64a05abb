//! LRU snapshot cache in front of any image source.

use std::num::NonZeroUsize;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use lru::LruCache;
use tracing::debug;
use vegwatch_core::{Coordinate, FetchError, ImageSource, PixelGrid};

/// Key for cached snapshots: coordinate (bitwise), date and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    lat_bits: u64,
    lon_bits: u64,
    pub date: NaiveDate,
    pub size: u32,
}

impl SnapshotKey {
    pub fn new(coordinate: Coordinate, date: NaiveDate, size: u32) -> Self {
        Self {
            lat_bits: coordinate.lat.to_bits(),
            lon_bits: coordinate.lon.to_bits(),
            date,
            size,
        }
    }
}

/// Caches successful fetches of the wrapped source. Failures are not cached.
pub struct CachedSource<S> {
    inner: S,
    cache: Mutex<LruCache<SnapshotKey, PixelGrid>>,
}

impl<S: ImageSource> CachedSource<S> {
    /// Wrap `inner` with a cache holding up to `capacity` snapshots.
    pub fn new(inner: S, capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner,
            cache: Mutex::new(LruCache::new(cap)),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of snapshots currently cached.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clear all cached snapshots.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<SnapshotKey, PixelGrid>> {
        // A panic mid-insert leaves the map consistent; keep using it.
        self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S: ImageSource> ImageSource for CachedSource<S> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn fetch(
        &self,
        coordinate: Coordinate,
        date: NaiveDate,
        size: u32,
    ) -> Result<PixelGrid, FetchError> {
        let key = SnapshotKey::new(coordinate, date, size);
        if let Some(grid) = self.lock().get(&key) {
            debug!("cache hit for {}", date);
            return Ok(grid.clone());
        }

        // Lock released while fetching so other dates proceed in parallel.
        let grid = self.inner.fetch(coordinate, date, size)?;
        self.lock().put(key, grid.clone());
        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
    }

    impl ImageSource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        fn fetch(&self, _c: Coordinate, date: NaiveDate, _size: u32) -> Result<PixelGrid, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if date.format("%d").to_string() == "01" {
                return Err(FetchError::NotFound { date });
            }
            PixelGrid::uniform(2, 2, [1, 2, 3]).map_err(|e| FetchError::Decode {
                date,
                reason: e.to_string(),
            })
        }
    }

    fn counting() -> CountingSource {
        CountingSource { calls: AtomicUsize::new(0) }
    }

    fn coord() -> Coordinate {
        Coordinate::new(1.0, 2.0).unwrap()
    }

    fn date(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, day).unwrap()
    }

    #[test]
    fn test_second_fetch_is_served_from_cache() {
        let cached = CachedSource::new(counting(), 4);

        let a = cached.fetch(coord(), date(1, 31), 8).unwrap();
        let b = cached.fetch(coord(), date(1, 31), 8).unwrap();

        assert_eq!(a, b);
        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 1);
        assert_eq!(cached.len(), 1);
    }

    #[test]
    fn test_key_includes_size_and_coordinate() {
        let cached = CachedSource::new(counting(), 4);

        cached.fetch(coord(), date(1, 31), 8).unwrap();
        cached.fetch(coord(), date(1, 31), 16).unwrap();
        cached.fetch(Coordinate::new(1.0, 2.5).unwrap(), date(1, 31), 8).unwrap();

        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_failures_not_cached() {
        let cached = CachedSource::new(counting(), 4);

        assert!(cached.fetch(coord(), date(2, 1), 8).is_err());
        assert!(cached.fetch(coord(), date(2, 1), 8).is_err());

        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 2);
        assert!(cached.is_empty());
    }

    #[test]
    fn test_eviction() {
        let cached = CachedSource::new(counting(), 2);

        cached.fetch(coord(), date(1, 31), 8).unwrap();
        cached.fetch(coord(), date(2, 28), 8).unwrap();
        cached.fetch(coord(), date(3, 31), 8).unwrap(); // evicts January
        cached.fetch(coord(), date(1, 31), 8).unwrap();

        assert_eq!(cached.inner().calls.load(Ordering::SeqCst), 4);
        assert_eq!(cached.len(), 2);
    }
}
