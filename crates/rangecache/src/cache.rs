//! RangeSumCache: memoized interval sums over a caller-owned array

use std::sync::Arc;
use rangestore::oracle::range_sum;
use rangestore::{check_index, check_range, Element, Op, Result};
use tracing::trace;

use crate::lru::LruCache;
use crate::stats::CacheStats;

/// Cache key: inclusive interval `(left, right)`
pub type IntervalKey = (usize, usize);

/// Range-sum cache with LRU eviction and write invalidation
///
/// The cache never holds the array. Every call must pass the same backing
/// array, and every write to it must go through [`RangeSumCache::update`];
/// a write made behind the cache's back can leave stale sums.
pub struct RangeSumCache<T: Element> {
    /// Interval sums, evicted least-recently-used first
    entries: LruCache<IntervalKey, T::Sum>,

    /// Cache statistics
    stats: Arc<CacheStats>,
}

impl<T: Element> RangeSumCache<T> {
    /// Wrap an existing container
    pub fn new(entries: LruCache<IntervalKey, T::Sum>) -> Self {
        Self {
            entries,
            stats: Arc::new(CacheStats::new()),
        }
    }

    /// Create a cache holding at most `capacity` interval sums
    ///
    /// # Errors
    /// * `InvalidCapacity` - `capacity` is 0
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self::new(LruCache::new(capacity)?))
    }

    /// Sum of `array[left..=right]`, served from cache when possible
    ///
    /// # Arguments
    /// * `array` - Backing array
    /// * `left` - Left bound (inclusive)
    /// * `right` - Right bound (inclusive)
    ///
    /// # Returns
    /// * `Result<T::Sum>` - Exact sum of the current contents
    pub fn get(&mut self, array: &[T], left: usize, right: usize) -> Result<T::Sum> {
        check_range(array.len(), left, right)?;

        if let Some(&sum) = self.entries.get(&(left, right)) {
            self.stats.record_hit();
            return Ok(sum);
        }

        self.stats.record_miss();
        let sum = range_sum(array, left, right)?;

        if let Some(((l, r), _)) = self.entries.put((left, right), sum) {
            trace!(left = l, right = r, "evicted interval");
            self.stats.record_eviction();
        }
        self.stats.record_insert();

        Ok(sum)
    }

    /// Write `value` at `index` and drop every cached interval covering it
    ///
    /// # Arguments
    /// * `array` - Backing array
    /// * `index` - Index to overwrite
    /// * `value` - New element value
    ///
    /// # Returns
    /// * `Result<usize>` - Number of invalidated intervals
    pub fn update(&mut self, array: &mut [T], index: usize, value: T) -> Result<usize> {
        check_index(array.len(), index)?;
        array[index] = value;

        let dropped = self
            .entries
            .retain(|&(left, right), _| !(left <= index && index <= right));

        if dropped > 0 {
            trace!(index, dropped, "invalidated intervals");
            self.stats.record_invalidations(dropped as u64);
        }

        Ok(dropped)
    }

    /// Replay `ops` against `array`, returning one sum per `Range` op
    pub fn run(&mut self, array: &mut [T], ops: &[Op<T>]) -> Result<Vec<T::Sum>> {
        let mut sums = Vec::new();
        for op in ops {
            match *op {
                Op::Range { left, right } => sums.push(self.get(array, left, right)?),
                Op::Update { index, value } => {
                    self.update(array, index, value)?;
                }
            }
        }
        Ok(sums)
    }

    /// Stored sum for `(left, right)`, without touching recency
    pub fn cached(&self, left: usize, right: usize) -> Option<T::Sum> {
        self.entries.peek(&(left, right)).copied()
    }

    /// Check whether `(left, right)` is cached
    pub fn contains(&self, left: usize, right: usize) -> bool {
        self.entries.contains(&(left, right))
    }

    /// Cached intervals from freshest to stalest
    pub fn intervals(&self) -> impl Iterator<Item = IntervalKey> + '_ {
        self.entries.keys().copied()
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub(crate) fn stats_handle(&self) -> Arc<CacheStats> {
        Arc::clone(&self.stats)
    }

    /// Get current cache size
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no interval is cached
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache capacity
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Drop all cached intervals and reset statistics
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.reset();
    }
}
