//! # rangecache
//!
//! Bounded cache of interval sums over a mutable array.
//!
//! ## Architecture
//! - **LruCache**: AHash index over a slot-vector linked list, O(1) get/put/remove
//! - **RangeSumCache**: keys `(left, right)`, computes on miss, drops every
//!   interval covering a written index
//! - **SharedRangeSum**: array and cache behind one lock for multi-threaded use

#![warn(missing_docs)]

mod cache;
mod lru;
mod shared;
mod stats;

pub use cache::{IntervalKey, RangeSumCache};
pub use lru::{Keys, LruCache};
pub use shared::SharedRangeSum;
pub use stats::CacheStats;
