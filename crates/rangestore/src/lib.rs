//! # rangestore
//!
//! Data side of RangeCache: backing arrays and everything that touches them
//! without a cache in between.
//!
//! ## Contents
//! - **Element**: numeric element types and their widened sum types
//! - **Oracle**: direct (uncached) range sums and point updates
//! - **Workload**: `Range` / `Update` operation records and a skewed generator

#![warn(missing_docs)]

mod element;
mod error;
pub mod oracle;
pub mod workload;

pub use element::Element;
pub use error::{Error, Result};
pub use oracle::{check_index, check_range};
pub use workload::{Op, Workload, WorkloadConfig};
