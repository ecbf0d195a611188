//! Numeric element types
//!
//! Each element type sums into a wider type so that long intervals do not
//! overflow; whatever overflow remains is reported, never wrapped.

use std::fmt::Debug;

/// An array element that can be summed over an interval
pub trait Element: Copy + Debug {
    /// Accumulator type for interval sums
    type Sum: Copy + PartialEq + Debug;

    /// Sum of the empty interval
    fn zero() -> Self::Sum;

    /// Add `x` to `acc`, or `None` on overflow
    fn accumulate(acc: Self::Sum, x: Self) -> Option<Self::Sum>;
}

macro_rules! widening_element {
    ($($elem:ty => $sum:ty),* $(,)?) => {
        $(
            impl Element for $elem {
                type Sum = $sum;

                #[inline]
                fn zero() -> $sum {
                    0
                }

                #[inline]
                fn accumulate(acc: $sum, x: $elem) -> Option<$sum> {
                    acc.checked_add(<$sum>::from(x))
                }
            }
        )*
    };
}

widening_element! {
    i32 => i64,
    i64 => i128,
    u32 => u64,
    u64 => u128,
}

impl Element for usize {
    type Sum = u128;

    #[inline]
    fn zero() -> u128 {
        0
    }

    #[inline]
    fn accumulate(acc: u128, x: usize) -> Option<u128> {
        acc.checked_add(x as u128)
    }
}

impl Element for f64 {
    type Sum = f64;

    #[inline]
    fn zero() -> f64 {
        0.0
    }

    #[inline]
    fn accumulate(acc: f64, x: f64) -> Option<f64> {
        Some(acc + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widening_avoids_overflow() {
        let acc = <i32 as Element>::accumulate(i32::MAX as i64, i32::MAX).unwrap();
        assert_eq!(acc, 2 * i32::MAX as i64);
    }

    #[test]
    fn test_overflow_reported() {
        assert_eq!(<u64 as Element>::accumulate(u128::MAX, 1), None);
        assert_eq!(<i64 as Element>::accumulate(i128::MIN, -1), None);
    }

    #[test]
    fn test_negative_values() {
        let acc = <i64 as Element>::accumulate(<i64 as Element>::zero(), -7).unwrap();
        assert_eq!(acc, -7);
    }
}
