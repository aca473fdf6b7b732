//! Permute-then-mask composition of a [`Permutation`] and an [`Inversion`].
//!
//! ## Packed layout
//!
//! From most to least significant bit:
//!
//! ```text
//! [1 guard bit][10-bit mask length m][m-bit mask][permutation.pack()]
//! ```
//!
//! The permutation part takes exactly as many bits as its own packed value,
//! so the identity shuffle packs to `1 << 10`. The guard bit keeps the
//! identity distinct from the bare permutation encoding, which packs the
//! identity to 0.

use crate::bits::{bit_length, BitTransform, Transformed, LENGTH_BITS, LENGTH_MASK};
use crate::error::{BitPermError, Result};
use crate::inversion::Inversion;
use crate::permutation::{join, Permutation};
use crate::random::DEFAULT_PROBABILITY;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, ToPrimitive};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest valid packed shuffle: the guard bit alone.
const GUARD: u64 = 1 << LENGTH_BITS;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shuffle {
    permutation: Permutation,
    inversion: Inversion,
}

impl Shuffle {
    /// The identity shuffle.
    pub fn identity() -> Self {
        Self::default()
    }

    pub fn new(permutation: Permutation, inversion: Inversion) -> Self {
        Self {
            permutation,
            inversion,
        }
    }

    /// Build from optional parts; a missing part is the identity.
    pub fn from_parts(permutation: Option<Permutation>, inversion: Option<Inversion>) -> Self {
        Self::new(permutation.unwrap_or_default(), inversion.unwrap_or_default())
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    pub fn inversion(&self) -> &Inversion {
        &self.inversion
    }

    /// The longer of the two parts.
    pub fn len(&self) -> usize {
        self.permutation.len().max(self.inversion.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_identity(&self) -> bool {
        self.permutation.is_identity() && self.inversion.is_identity()
    }

    /// Permute, then mask.
    pub fn shuffle(&self, x: &BigInt) -> BigInt {
        self.inversion.apply(&self.permutation.apply(x))
    }

    /// Unmask, then undo the permutation.
    pub fn unshuffle(&self, y: &BigInt) -> BigInt {
        self.permutation.invert(&self.inversion.apply(y))
    }

    pub fn shuffle_iter<I>(&self, values: I) -> Transformed<'_, Self, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Into<BigInt>,
    {
        self.apply_iter(values)
    }

    pub fn unshuffle_iter<I>(&self, values: I) -> Transformed<'_, Self, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Into<BigInt>,
    {
        self.invert_iter(values)
    }

    /// The canonical permutation mapping followed by the mask.
    pub fn as_tuple(&self) -> Vec<BigUint> {
        self.permutation
            .as_tuple()
            .iter()
            .map(|&v| BigUint::from(v))
            .chain(std::iter::once(self.inversion.mask().clone()))
            .collect()
    }

    /// Inverse of [`Shuffle::as_tuple`]: the last element is the mask, the
    /// rest the permutation.
    pub fn from_tuple(values: &[BigUint]) -> Result<Self> {
        let (mask, mapping) = values.split_last().ok_or_else(|| {
            BitPermError::InvalidArgument("a shuffle tuple needs at least the mask".into())
        })?;
        let mut entries = Vec::with_capacity(mapping.len());
        for (position, value) in mapping.iter().enumerate() {
            let entry = value.to_usize().ok_or_else(|| {
                BitPermError::InvalidPermutation(format!(
                    "value {} at position {} is out of range",
                    value, position
                ))
            })?;
            entries.push(entry);
        }
        Ok(Self::new(
            Permutation::try_from(entries)?,
            Inversion::new(mask.clone())?,
        ))
    }

    pub fn pack(&self) -> BigUint {
        let mask = self.inversion.mask();
        let mask_length = self.inversion.len();
        let permutation = self.permutation.pack();

        let head = (BigUint::from(GUARD | mask_length as u64) << mask_length) | mask;
        (head << bit_length(&permutation)) | permutation
    }

    /// Decode the integer produced by [`Shuffle::pack`].
    pub fn unpack(packed: &BigUint) -> Result<Self> {
        let total = bit_length(packed);
        if total <= LENGTH_BITS {
            return Err(BitPermError::InvalidEncoding(format!(
                "{} is below the guard value {}",
                packed, GUARD
            )));
        }

        let header = packed >> (total - 1 - LENGTH_BITS);
        let mask_length = (header.iter_u64_digits().next().unwrap_or(0) & LENGTH_MASK) as usize;
        let body = total - 1 - LENGTH_BITS;
        if mask_length > body {
            return Err(BitPermError::InvalidEncoding(format!(
                "mask length {} does not fit in {} remaining bits",
                mask_length, body
            )));
        }

        let width = body - mask_length;
        let low_bits = |n: usize| (BigUint::one() << n) - 1u32;
        let mask = (packed >> width) & low_bits(mask_length);
        if bit_length(&mask) != mask_length {
            return Err(BitPermError::InvalidEncoding(format!(
                "mask field of {} bits has no top bit set",
                mask_length
            )));
        }
        let permutation = packed & low_bits(width);
        if bit_length(&permutation) != width {
            return Err(BitPermError::InvalidEncoding(
                "permutation field has leading zero bits".into(),
            ));
        }

        Ok(Self::new(
            Permutation::unpack(&permutation)?,
            Inversion::from_mask(mask)?,
        ))
    }

    /// Random shuffle of length exactly `n`.
    pub fn generate_random(n: usize) -> Result<Self> {
        Self::generate_random_with(n, &mut rand::thread_rng())
    }

    pub fn generate_random_with<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Self> {
        match n {
            0 => Ok(Self::identity()),
            1 => Ok(Self::new(Permutation::identity(), Inversion::new(1)?)),
            _ => Ok(Self::new(
                Permutation::generate_random_with(n, rng)?,
                Inversion::generate_random_with(n, DEFAULT_PROBABILITY, rng)?,
            )),
        }
    }
}

impl BitTransform for Shuffle {
    fn apply(&self, x: &BigInt) -> BigInt {
        self.shuffle(x)
    }

    fn invert(&self, x: &BigInt) -> BigInt {
        self.unshuffle(x)
    }

    fn len(&self) -> usize {
        Shuffle::len(self)
    }

    fn is_identity(&self) -> bool {
        Shuffle::is_identity(self)
    }
}

impl fmt::Display for Shuffle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.permutation.is_identity(), self.inversion.is_identity()) {
            (true, true) => write!(f, "Shuffle()"),
            (false, true) => write!(f, "Shuffle({})", self.permutation),
            (true, false) => write!(f, "Shuffle(None, {})", self.inversion),
            (false, false) => write!(f, "Shuffle({}, {})", self.permutation, self.inversion),
        }
    }
}

/// Tuple form as text: `(3, 1, 2, 0, 209)`.
pub fn format_tuple(values: &[BigUint]) -> String {
    if values.len() == 1 {
        return format!("({},)", values[0]);
    }
    let rendered: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("({})", rendered.join(", "))
}

/// Mapping as text: `(3, 1, 2, 0)`.
pub fn format_mapping(mapping: &[usize]) -> String {
    format!("({})", join(mapping))
}
