//! Canonical bit permutations.
//!
//! A [`Permutation`] maps bit `i` of an integer to bit `mapping[i]`. Trailing
//! fixed points are stripped when the value is built, so two permutations
//! that move the same bits are always equal, and the empty mapping is the
//! identity.

use crate::bits::{check_length, map_magnitude, scatter_bits, BitTransform};
use crate::error::{BitPermError, Result};
use crate::lehmer;
use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Permutation {
    mapping: Vec<usize>,
    inverse: Vec<usize>,
}

impl Permutation {
    /// The identity permutation.
    pub fn identity() -> Self {
        Self::default()
    }

    /// Build a permutation from any sequence of integers.
    ///
    /// The sequence must be a bijection onto `[0, n)`; anything else fails with
    /// `InvalidPermutation`. Fails with `TooLong` if the canonical length is
    /// over 1023.
    pub fn new<I>(mapping: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: TryInto<usize>,
    {
        let mut values = Vec::new();
        for (position, item) in mapping.into_iter().enumerate() {
            let value = item.try_into().map_err(|_| {
                BitPermError::InvalidPermutation(format!(
                    "position {} holds a value outside the domain",
                    position
                ))
            })?;
            values.push(value);
        }
        Self::from_vec(values)
    }

    fn from_vec(mut mapping: Vec<usize>) -> Result<Self> {
        let n = mapping.len();
        let mut inverse = vec![usize::MAX; n];
        for (position, &value) in mapping.iter().enumerate() {
            if value >= n {
                return Err(BitPermError::InvalidPermutation(format!(
                    "value {} at position {} is not below {}",
                    value, position, n
                )));
            }
            if inverse[value] != usize::MAX {
                return Err(BitPermError::InvalidPermutation(format!(
                    "value {} appears more than once",
                    value
                )));
            }
            inverse[value] = position;
        }

        while let Some(&last) = mapping.last() {
            if last + 1 != mapping.len() {
                break;
            }
            mapping.pop();
        }
        check_length(mapping.len())?;
        inverse.truncate(mapping.len());

        Ok(Self { mapping, inverse })
    }

    /// Build a permutation from its Lehmer code.
    pub fn from_lehmer_code(code: &[usize]) -> Result<Self> {
        Self::from_vec(lehmer::mapping_from_lehmer(code)?)
    }

    /// Decode the integer produced by [`Permutation::pack`].
    pub fn unpack(packed: &BigUint) -> Result<Self> {
        Self::from_vec(lehmer::unpack(packed)?)
    }

    /// Canonical length: one past the last position that is not a fixed
    /// point.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// The canonical mapping.
    pub fn as_tuple(&self) -> &[usize] {
        &self.mapping
    }

    /// The inverse permutation as a value of its own.
    pub fn inverse(&self) -> Self {
        Self {
            mapping: self.inverse.clone(),
            inverse: self.mapping.clone(),
        }
    }

    pub fn is_identity(&self) -> bool {
        self.mapping.is_empty()
    }

    pub fn is_involution(&self) -> bool {
        self.mapping == self.inverse
    }

    pub fn is_derangement(&self) -> bool {
        !self.mapping.is_empty() && self.fixed_points().next().is_none()
    }

    /// Number of fixed points inside the canonical domain, or `None` for the
    /// identity, where every point is fixed.
    pub fn fixed_point_count(&self) -> Option<usize> {
        if self.is_identity() {
            None
        } else {
            Some(self.fixed_points().count())
        }
    }

    fn fixed_points(&self) -> impl Iterator<Item = usize> + '_ {
        self.mapping
            .iter()
            .enumerate()
            .filter(|&(i, &value)| i == value)
            .map(|(i, _)| i)
    }

    /// Disjoint cycles, ordered by their smallest element, each starting at
    /// that element.
    pub fn as_cycles(&self) -> Vec<Vec<usize>> {
        let mut visited = vec![false; self.mapping.len()];
        let mut cycles = Vec::new();
        for start in 0..self.mapping.len() {
            if visited[start] {
                continue;
            }
            let mut cycle = Vec::new();
            let mut current = start;
            loop {
                visited[current] = true;
                cycle.push(current);
                current = self.mapping[current];
                if current == start {
                    break;
                }
            }
            cycles.push(cycle);
        }
        cycles
    }

    pub fn as_lehmer_code(&self) -> Vec<usize> {
        lehmer::lehmer_code(&self.mapping)
    }

    /// Number of inverted pairs, the sum of the Lehmer code.
    pub fn get_inversion_count(&self) -> usize {
        self.as_lehmer_code().iter().sum()
    }

    /// `(rank << 10) | length`, with the rank taken in the factorial number
    /// system. The identity packs to 0.
    pub fn pack(&self) -> BigUint {
        lehmer::pack(&self.mapping)
    }

    pub fn apply(&self, x: &BigInt) -> BigInt {
        map_magnitude(x, |m| scatter_bits(m, &self.mapping))
    }

    pub fn invert(&self, x: &BigInt) -> BigInt {
        map_magnitude(x, |m| scatter_bits(m, &self.inverse))
    }
}

impl BitTransform for Permutation {
    fn apply(&self, x: &BigInt) -> BigInt {
        Permutation::apply(self, x)
    }

    fn invert(&self, x: &BigInt) -> BigInt {
        Permutation::invert(self, x)
    }

    fn len(&self) -> usize {
        self.mapping.len()
    }

    fn is_identity(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl TryFrom<Vec<usize>> for Permutation {
    type Error = BitPermError;

    fn try_from(mapping: Vec<usize>) -> Result<Self> {
        Self::from_vec(mapping)
    }
}

impl From<Permutation> for Vec<usize> {
    fn from(permutation: Permutation) -> Self {
        permutation.mapping
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mapping.is_empty() {
            return write!(f, "Permutation()");
        }
        write!(f, "Permutation(({}))", join(&self.mapping))
    }
}

impl FromStr for Permutation {
    type Err = BitPermError;

    /// Parse `"3,1,2,0"`, `"(3, 1, 2, 0)"`, `"[3 1 2 0]"` or the `Display`
    /// form `"Permutation((3, 1, 2, 0))"`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix("Permutation")
            .unwrap_or(trimmed)
            .trim_start_matches(['(', '['])
            .trim_end_matches([')', ']']);
        let mut values = Vec::new();
        for token in body.split(|c: char| c == ',' || c.is_whitespace()) {
            if token.is_empty() {
                continue;
            }
            let value: i64 = token.parse().map_err(|_| {
                BitPermError::TypeMismatch(format!("'{}' is not an integer", token))
            })?;
            values.push(value);
        }
        Self::new(values)
    }
}

pub(crate) fn join(values: &[usize]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
