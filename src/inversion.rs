//! XOR masks over the low bits of an integer.

use crate::bits::{bit_length, map_magnitude, BitTransform, MAX_LENGTH};
use crate::error::{BitPermError, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flips the bits set in `mask`. Its own inverse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Inversion {
    mask: BigUint,
}

impl Inversion {
    /// The zero mask.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Fails with `InvalidArgument` if `mask` is negative or wider than
    /// 1023 bits.
    pub fn new<T: Into<BigInt>>(mask: T) -> Result<Self> {
        let mask: BigInt = mask.into();
        if mask.sign() == Sign::Minus {
            return Err(BitPermError::InvalidArgument(format!(
                "mask must be non-negative, got {}",
                mask
            )));
        }
        let (_, magnitude) = mask.into_parts();
        Self::from_mask(magnitude)
    }

    pub(crate) fn from_mask(mask: BigUint) -> Result<Self> {
        let length = bit_length(&mask);
        if length > MAX_LENGTH {
            return Err(BitPermError::InvalidArgument(format!(
                "mask is {} bits wide, at most {} allowed",
                length, MAX_LENGTH
            )));
        }
        Ok(Self { mask })
    }

    pub fn mask(&self) -> &BigUint {
        &self.mask
    }

    /// Bit-length of the mask.
    pub fn len(&self) -> usize {
        bit_length(&self.mask)
    }

    pub fn is_empty(&self) -> bool {
        self.mask.is_zero()
    }

    pub fn is_identity(&self) -> bool {
        self.mask.is_zero()
    }

    /// Bits inside the mask's length that `apply` leaves alone, or `None`
    /// for the zero mask.
    pub fn fixed_point_count(&self) -> Option<usize> {
        if self.is_identity() {
            return None;
        }
        let flipped: u64 = self.mask.iter_u64_digits().map(|d| d.count_ones() as u64).sum();
        Some(self.len() - flipped as usize)
    }

    /// `x ^ mask`.
    pub fn apply(&self, x: &BigInt) -> BigInt {
        map_magnitude(x, |m| m ^ &self.mask)
    }
}

impl BitTransform for Inversion {
    fn apply(&self, x: &BigInt) -> BigInt {
        Inversion::apply(self, x)
    }

    fn invert(&self, x: &BigInt) -> BigInt {
        Inversion::apply(self, x)
    }

    fn len(&self) -> usize {
        bit_length(&self.mask)
    }

    fn is_identity(&self) -> bool {
        self.mask.is_zero()
    }
}

impl From<Inversion> for BigUint {
    fn from(inversion: Inversion) -> Self {
        inversion.mask
    }
}

impl From<&Inversion> for BigUint {
    fn from(inversion: &Inversion) -> Self {
        inversion.mask.clone()
    }
}

impl PartialEq<BigUint> for Inversion {
    fn eq(&self, other: &BigUint) -> bool {
        &self.mask == other
    }
}

impl PartialEq<u64> for Inversion {
    fn eq(&self, other: &u64) -> bool {
        self.mask == BigUint::from(*other)
    }
}

impl fmt::Display for Inversion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mask.is_zero() {
            return write!(f, "Inversion()");
        }
        write!(f, "Inversion({})", self.mask)
    }
}

/// Hex digits of the mask, most significant byte first.
impl From<Inversion> for String {
    fn from(inversion: Inversion) -> Self {
        hex::encode(inversion.mask.to_bytes_be())
    }
}

impl TryFrom<String> for Inversion {
    type Error = BitPermError;

    fn try_from(s: String) -> Result<Self> {
        let digits = s.trim_start_matches("0x");
        let padded = if digits.len() % 2 == 1 {
            format!("0{}", digits)
        } else {
            digits.to_string()
        };
        let bytes = hex::decode(&padded)
            .map_err(|e| BitPermError::TypeMismatch(format!("mask '{}': {}", s, e)))?;
        Self::from_mask(BigUint::from_bytes_be(&bytes))
    }
}
