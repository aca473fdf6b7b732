//! Lehmer codes (inversion tables) and the factorial number system.
//!
//! A permutation of `n` elements has a Lehmer code `L` where `L[i]` counts the
//! later positions holding a smaller value. Read as digits of the factorial
//! number system, `L` ranks the permutation in `[0, n!)`.
//!
//! Both directions use a Fenwick tree over the value domain and run in
//! `O(n log n)`.

use crate::bits::{LENGTH_BITS, LENGTH_MASK};
use crate::error::{BitPermError, Result};
use num_bigint::BigUint;
use num_traits::Zero;

/// Binary indexed tree of per-value counts.
struct Fenwick {
    tree: Vec<usize>,
}

impl Fenwick {
    fn empty(n: usize) -> Self {
        Self {
            tree: vec![0; n + 1],
        }
    }

    /// Every value in `[0, n)` present once.
    fn full(n: usize) -> Self {
        let mut tree = vec![0; n + 1];
        for i in 1..=n {
            tree[i] += 1;
            let parent = i + (i & i.wrapping_neg());
            if parent <= n {
                tree[parent] += tree[i];
            }
        }
        Self { tree }
    }

    fn insert(&mut self, value: usize) {
        let mut i = value + 1;
        while i < self.tree.len() {
            self.tree[i] += 1;
            i += i & i.wrapping_neg();
        }
    }

    fn remove(&mut self, value: usize) {
        let mut i = value + 1;
        while i < self.tree.len() {
            self.tree[i] -= 1;
            i += i & i.wrapping_neg();
        }
    }

    /// Number of present values strictly below `value`.
    fn count_below(&self, value: usize) -> usize {
        let mut i = value;
        let mut sum = 0;
        while i > 0 {
            sum += self.tree[i];
            i -= i & i.wrapping_neg();
        }
        sum
    }

    /// The `k`-th smallest present value (0-based). Caller guarantees
    /// `k` is below the number of present values.
    fn select(&self, mut k: usize) -> usize {
        let n = self.tree.len() - 1;
        let mut pos = 0;
        let mut step = n.checked_next_power_of_two().unwrap_or(0);
        if step > n {
            step >>= 1;
        }
        while step > 0 {
            let next = pos + step;
            if next <= n && self.tree[next] <= k {
                pos = next;
                k -= self.tree[next];
            }
            step >>= 1;
        }
        pos
    }
}

/// Lehmer code of a permutation given as its mapping.
pub fn lehmer_code(mapping: &[usize]) -> Vec<usize> {
    let mut seen = Fenwick::empty(mapping.len());
    let mut code = vec![0; mapping.len()];
    for (i, &value) in mapping.iter().enumerate().rev() {
        code[i] = seen.count_below(value);
        seen.insert(value);
    }
    code
}

/// Rebuild a mapping from its Lehmer code.
///
/// Fails with `InvalidArgument` if a digit `code[i]` exceeds `n - 1 - i`.
pub fn mapping_from_lehmer(code: &[usize]) -> Result<Vec<usize>> {
    let n = code.len();
    let mut remaining = Fenwick::full(n);
    let mut mapping = Vec::with_capacity(n);
    for (i, &digit) in code.iter().enumerate() {
        if digit >= n - i {
            return Err(BitPermError::InvalidArgument(format!(
                "Lehmer digit {} at position {} must be below {}",
                digit,
                i,
                n - i
            )));
        }
        let value = remaining.select(digit);
        remaining.remove(value);
        mapping.push(value);
    }
    Ok(mapping)
}

/// Rank of a Lehmer code in the factorial number system:
/// `sum(code[i] * (n - 1 - i)!)`.
pub fn rank(code: &[usize]) -> BigUint {
    let n = code.len();
    code.iter()
        .enumerate()
        .fold(BigUint::zero(), |acc, (i, &digit)| acc * (n - i) + digit)
}

/// Split `rank` back into `n` factorial-base digits.
///
/// Fails with `InvalidEncoding` if `rank >= n!`.
pub fn unrank(rank: &BigUint, n: usize) -> Result<Vec<usize>> {
    let mut rest = rank.clone();
    let mut code = vec![0; n];
    for i in (0..n).rev() {
        let radix = BigUint::from(n - i);
        let digit = &rest % &radix;
        code[i] = digit.iter_u64_digits().next().unwrap_or(0) as usize;
        rest /= radix;
    }
    if !rest.is_zero() {
        return Err(BitPermError::InvalidEncoding(format!(
            "rank {} is out of range for length {}",
            rank, n
        )));
    }
    Ok(code)
}

/// Pack a mapping as `(rank << 10) | length`. The empty mapping packs to 0.
pub fn pack(mapping: &[usize]) -> BigUint {
    if mapping.is_empty() {
        return BigUint::zero();
    }
    (rank(&lehmer_code(mapping)) << LENGTH_BITS) | BigUint::from(mapping.len())
}

/// Inverse of [`pack`].
pub fn unpack(packed: &BigUint) -> Result<Vec<usize>> {
    let low = packed.iter_u64_digits().next().unwrap_or(0);
    let length = (low & LENGTH_MASK) as usize;
    let code = unrank(&(packed >> LENGTH_BITS), length)?;
    mapping_from_lehmer(&code)
}
