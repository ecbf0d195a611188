//! Error types for rangestore and rangecache

use std::fmt;

/// Result type alias for range-sum operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for range-sum operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Interval is reversed or falls outside the array
    InvalidRange {
        /// Requested left bound
        left: usize,
        /// Requested right bound
        right: usize,
        /// Length of the backing array
        len: usize,
    },

    /// Write index falls outside the array
    InvalidIndex {
        /// Requested index
        index: usize,
        /// Length of the backing array
        len: usize,
    },

    /// Cache capacity must be positive
    InvalidCapacity(usize),

    /// Workload configuration rejected
    InvalidConfig(String),

    /// Interval sum does not fit the sum type
    Overflow {
        /// Left bound of the interval
        left: usize,
        /// Right bound of the interval
        right: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidRange { left, right, len } => write!(
                f,
                "Invalid range: [{}, {}] (array length {})",
                left, right, len
            ),
            Error::InvalidIndex { index, len } => {
                write!(f, "Invalid index: {} (array length {})", index, len)
            }
            Error::InvalidCapacity(cap) => {
                write!(f, "Invalid capacity: {} (must be greater than 0)", cap)
            }
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::Overflow { left, right } => {
                write!(f, "Sum over [{}, {}] overflows", left, right)
            }
        }
    }
}

impl std::error::Error for Error {}
