//! Uncached range sums and updates
//!
//! The reference every cached result is checked against. Nothing here is
//! remembered between calls.

use crate::element::Element;
use crate::error::{Error, Result};
use crate::workload::Op;

/// Check that `[left, right]` is a non-empty interval inside an array of `len`
pub fn check_range(len: usize, left: usize, right: usize) -> Result<()> {
    if left > right || right >= len {
        return Err(Error::InvalidRange { left, right, len });
    }
    Ok(())
}

/// Check that `index` addresses an element of an array of `len`
pub fn check_index(len: usize, index: usize) -> Result<()> {
    if index >= len {
        return Err(Error::InvalidIndex { index, len });
    }
    Ok(())
}

/// Sum `array[left..=right]` by direct summation
///
/// # Errors
/// * `InvalidRange` - interval is reversed or out of bounds
/// * `Overflow` - the sum does not fit `T::Sum`
pub fn range_sum<T: Element>(array: &[T], left: usize, right: usize) -> Result<T::Sum> {
    check_range(array.len(), left, right)?;

    array[left..=right]
        .iter()
        .try_fold(T::zero(), |acc, &x| T::accumulate(acc, x))
        .ok_or(Error::Overflow { left, right })
}

/// Write `value` at `index`
pub fn apply_update<T: Element>(array: &mut [T], index: usize, value: T) -> Result<()> {
    check_index(array.len(), index)?;
    array[index] = value;
    Ok(())
}

/// Replay `ops` against `array`, returning one sum per `Range` op
pub fn run<T: Element>(array: &mut [T], ops: &[Op<T>]) -> Result<Vec<T::Sum>> {
    let mut sums = Vec::new();
    for op in ops {
        match *op {
            Op::Range { left, right } => sums.push(range_sum(array, left, right)?),
            Op::Update { index, value } => apply_update(array, index, value)?,
        }
    }
    Ok(sums)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_sum() {
        let array = [1i64, 2, 3, 4, 5];
        assert_eq!(range_sum(&array, 1, 3).unwrap(), 9);
        assert_eq!(range_sum(&array, 0, 4).unwrap(), 15);
        assert_eq!(range_sum(&array, 2, 2).unwrap(), 3);
    }

    #[test]
    fn test_range_sum_invalid() {
        let array = [1i64, 2, 3];
        assert_eq!(
            range_sum(&array, 2, 1),
            Err(Error::InvalidRange { left: 2, right: 1, len: 3 })
        );
        assert!(range_sum(&array, 0, 3).is_err());

        let empty: [i64; 0] = [];
        assert!(range_sum(&empty, 0, 0).is_err());
    }

    #[test]
    fn test_range_sum_widens() {
        let array = [u64::MAX; 4];
        // Widened to u128, so this still fits
        assert_eq!(range_sum(&array, 0, 3).unwrap(), 4 * u64::MAX as u128);
    }

    /// Element whose sum type is no wider than itself
    #[derive(Debug, Clone, Copy)]
    struct Narrow(u8);

    impl Element for Narrow {
        type Sum = u8;

        fn zero() -> u8 {
            0
        }

        fn accumulate(acc: u8, x: Narrow) -> Option<u8> {
            acc.checked_add(x.0)
        }
    }

    #[test]
    fn test_range_sum_overflow() {
        let array = [Narrow(200), Narrow(100), Narrow(1)];
        assert_eq!(range_sum(&array, 1, 2).unwrap(), 101);
        assert_eq!(
            range_sum(&array, 0, 1),
            Err(Error::Overflow { left: 0, right: 1 })
        );
    }

    #[test]
    fn test_apply_update() {
        let mut array = [1i64, 2, 3];
        apply_update(&mut array, 1, 20).unwrap();
        assert_eq!(array, [1, 20, 3]);

        assert_eq!(
            apply_update(&mut array, 3, 0),
            Err(Error::InvalidIndex { index: 3, len: 3 })
        );
        assert_eq!(array, [1, 20, 3]);
    }

    #[test]
    fn test_run() {
        let mut array = vec![1i64, 2, 3, 4, 5];
        let ops = vec![
            Op::Range { left: 1, right: 3 },
            Op::Update { index: 2, value: 100 },
            Op::Range { left: 1, right: 3 },
        ];

        assert_eq!(run(&mut array, &ops).unwrap(), vec![9, 106]);
        assert_eq!(array, vec![1, 2, 100, 4, 5]);
    }
}
