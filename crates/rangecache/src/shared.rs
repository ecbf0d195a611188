//! Thread-safe range-sum cache owning its backing array
//!
//! Reads promote recency and writes invalidate, so both need exclusive
//! access: each operation runs inside one lock.

use std::sync::Arc;
use parking_lot::Mutex;
use rangestore::{Element, Result};

use crate::cache::RangeSumCache;
use crate::stats::CacheStats;

struct Inner<T: Element> {
    array: Vec<T>,
    cache: RangeSumCache<T>,
}

/// Cloneable handle to an array and its range-sum cache
pub struct SharedRangeSum<T: Element> {
    inner: Arc<Mutex<Inner<T>>>,
    stats: Arc<CacheStats>,
}

impl<T: Element> Clone for SharedRangeSum<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<T: Element> SharedRangeSum<T> {
    /// Take ownership of `array` and cache up to `capacity` interval sums
    ///
    /// # Errors
    /// * `InvalidCapacity` - `capacity` is 0
    pub fn new(array: Vec<T>, capacity: usize) -> Result<Self> {
        let cache = RangeSumCache::with_capacity(capacity)?;
        let stats = cache.stats_handle();

        Ok(Self {
            inner: Arc::new(Mutex::new(Inner { array, cache })),
            stats,
        })
    }

    /// Sum of `array[left..=right]`
    pub fn get(&self, left: usize, right: usize) -> Result<T::Sum> {
        let mut inner = self.inner.lock();
        let Inner { array, cache } = &mut *inner;
        cache.get(array, left, right)
    }

    /// Write `value` at `index`, invalidating covering intervals in the same critical section
    pub fn update(&self, index: usize, value: T) -> Result<usize> {
        let mut inner = self.inner.lock();
        let Inner { array, cache } = &mut *inner;
        cache.update(array, index, value)
    }

    /// Copy of the current array contents
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.lock().array.clone()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.inner.lock().cache.len()
    }

    /// Check if no interval is cached
    pub fn is_empty(&self) -> bool {
        self.inner.lock().cache.is_empty()
    }

    /// Length of the backing array
    pub fn array_len(&self) -> usize {
        self.inner.lock().array.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use rangestore::oracle::range_sum;

    #[test]
    fn test_shared_basic() {
        let shared = SharedRangeSum::new(vec![1i64, 2, 3, 4, 5], 8).unwrap();

        assert_eq!(shared.get(1, 3).unwrap(), 9);
        assert_eq!(shared.update(2, 100).unwrap(), 1);
        assert_eq!(shared.get(1, 3).unwrap(), 106);
        assert_eq!(shared.snapshot(), vec![1, 2, 100, 4, 5]);
        assert_eq!(shared.stats().misses(), 2);
    }

    #[test]
    fn test_shared_rejects_zero_capacity() {
        assert!(SharedRangeSum::new(vec![1i64], 0).is_err());
    }

    #[test]
    fn test_shared_concurrent() {
        let shared = SharedRangeSum::new(vec![1i64; 64], 16).unwrap();

        let writers: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..200usize {
                        shared.update((i * 7 + t) % 64, (i % 50) as i64).unwrap();
                    }
                })
            })
            .collect();

        let readers: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..500usize {
                        let left = (i + t) % 32;
                        shared.get(left, left + 31).unwrap();
                    }
                })
            })
            .collect();

        for handle in writers.into_iter().chain(readers) {
            handle.join().unwrap();
        }

        // Once writers are done, every answer matches the live array
        let array = shared.snapshot();
        for left in 0..32 {
            assert_eq!(
                shared.get(left, left + 31).unwrap(),
                range_sum(&array, left, left + 31).unwrap()
            );
        }
        assert!(shared.len() <= 16);
    }
}
