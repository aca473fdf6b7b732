//! Shared bit-level plumbing: the length cap, the [`BitTransform`] trait every
//! transform implements, and helpers for working on the low bits of a
//! [`BigInt`] while leaving everything above them alone.

use crate::error::{BitPermError, Result};
use num_bigint::{BigInt, BigUint, Sign};

/// Largest effective length of any transform.
pub const MAX_LENGTH: usize = 1023;

/// Width of the length field in every packed encoding.
pub const LENGTH_BITS: usize = 10;

/// Mask selecting the length field of a packed encoding.
pub const LENGTH_MASK: u64 = (1 << LENGTH_BITS) - 1;

/// Upper bound for random "leave this bit alone" probabilities, so that
/// generators asked for an exact length can always finish.
pub const MAX_PROBABILITY: f64 = 0.99;

/// An invertible transform over the bits of arbitrary-width integers.
///
/// Bits at or above [`BitTransform::len`] are never touched, negative
/// integers behave as if sign-extended forever.
pub trait BitTransform {
    /// Transform `x`.
    fn apply(&self, x: &BigInt) -> BigInt;

    /// Undo [`BitTransform::apply`].
    fn invert(&self, x: &BigInt) -> BigInt;

    /// Number of low-order bit positions the transform may move or flip.
    fn len(&self) -> usize;

    /// True if the transform leaves every integer unchanged.
    fn is_identity(&self) -> bool;

    /// Lazily apply the transform to every value of `values`.
    fn apply_iter<I>(&self, values: I) -> Transformed<'_, Self, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Into<BigInt>,
    {
        Transformed {
            transform: self,
            values: values.into_iter(),
            direction: Direction::Forward,
        }
    }

    /// Lazily invert the transform for every value of `values`.
    fn invert_iter<I>(&self, values: I) -> Transformed<'_, Self, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Into<BigInt>,
    {
        Transformed {
            transform: self,
            values: values.into_iter(),
            direction: Direction::Backward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Iterator returned by [`BitTransform::apply_iter`] and
/// [`BitTransform::invert_iter`]. Pulls one value at a time from its source.
#[derive(Debug, Clone)]
pub struct Transformed<'a, T: ?Sized, I> {
    transform: &'a T,
    values: I,
    direction: Direction,
}

impl<T, I> Iterator for Transformed<'_, T, I>
where
    T: BitTransform + ?Sized,
    I: Iterator,
    I::Item: Into<BigInt>,
{
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        let x: BigInt = self.values.next()?.into();
        Some(match self.direction {
            Direction::Forward => self.transform.apply(&x),
            Direction::Backward => self.transform.invert(&x),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

/// Fail with `TooLong` if `length` is over the cap.
pub fn check_length(length: usize) -> Result<()> {
    if length > MAX_LENGTH {
        return Err(BitPermError::TooLong(length));
    }
    Ok(())
}

/// Validate a fixed-point probability and clamp it to [`MAX_PROBABILITY`].
pub fn check_probability(probability: f64) -> Result<f64> {
    if !(0.0..1.0).contains(&probability) {
        return Err(BitPermError::InvalidArgument(format!(
            "probability must be in [0, 1), got {}",
            probability
        )));
    }
    Ok(probability.min(MAX_PROBABILITY))
}

/// Run a non-negative bit transform `f` over a signed integer.
///
/// Transforms that only move or flip a bounded set of bits commute with
/// complementing every bit, and the complement of a negative integer is
/// non-negative, so negative inputs go through `!f(!x)`.
pub(crate) fn map_magnitude<F>(x: &BigInt, f: F) -> BigInt
where
    F: FnOnce(&BigUint) -> BigUint,
{
    if x.sign() == Sign::Minus {
        let complement = !x;
        !BigInt::from(f(complement.magnitude()))
    } else {
        BigInt::from(f(x.magnitude()))
    }
}

/// Move bit `i` of `x` to bit `mapping[i]` for every `i < mapping.len()`,
/// keeping the bits above the mapping as they are.
pub(crate) fn scatter_bits(x: &BigUint, mapping: &[usize]) -> BigUint {
    let width = mapping.len();
    let mut result = (x >> width) << width;
    for (src, &dst) in mapping.iter().enumerate() {
        if x.bit(src as u64) {
            result.set_bit(dst as u64, true);
        }
    }
    result
}

/// Bit-length of `x` (0 for zero).
pub(crate) fn bit_length(x: &BigUint) -> usize {
    x.bits() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_length() {
        assert!(check_length(0).is_ok());
        assert!(check_length(MAX_LENGTH).is_ok());
        assert!(matches!(
            check_length(MAX_LENGTH + 1),
            Err(BitPermError::TooLong(1024))
        ));
    }

    #[test]
    fn test_check_probability() {
        assert_eq!(check_probability(0.0).unwrap(), 0.0);
        assert_eq!(check_probability(0.3).unwrap(), 0.3);
        assert_eq!(check_probability(0.999_999).unwrap(), MAX_PROBABILITY);
        assert!(check_probability(1.0).is_err());
        assert!(check_probability(-0.5).is_err());
        assert!(check_probability(f64::NAN).is_err());
    }

    #[test]
    fn test_scatter_bits_keeps_high_bits() {
        let mapping = [2, 1, 0];
        let x = BigUint::from(0b1010_1001u32);
        assert_eq!(scatter_bits(&x, &mapping), BigUint::from(0b1010_1100u32));
    }

    #[test]
    fn test_map_magnitude_negative() {
        // flip bit 0 through the complement path
        let flip = |m: &BigUint| m ^ BigUint::from(1u32);
        assert_eq!(map_magnitude(&BigInt::from(-1), flip), BigInt::from(-2));
        assert_eq!(map_magnitude(&BigInt::from(-2), flip), BigInt::from(-1));
        assert_eq!(map_magnitude(&BigInt::from(6), flip), BigInt::from(7));
    }
}
