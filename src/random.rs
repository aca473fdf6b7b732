//! Random permutations and masks under structural constraints.
//!
//! Every generator has a `*_with` form taking any [`Rng`], and a short form
//! drawing from [`rand::thread_rng`]. Generators asked for length `n` always
//! return a value whose canonical length is exactly `n`.

use crate::bits::{check_length, check_probability};
use crate::error::{BitPermError, Result};
use crate::inversion::Inversion;
use crate::permutation::Permutation;
use num_bigint::BigUint;
use num_traits::Zero;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use sha3::{Digest, Sha3_256};

/// Default chance that a generator leaves a point or bit alone.
pub const DEFAULT_PROBABILITY: f64 = 0.5;

/// Deterministic generator seeded from a passphrase.
pub fn seeded_rng(passphrase: &str) -> StdRng {
    let mut hasher = Sha3_256::new();
    hasher.update(b"bitperm_seed_v1");
    hasher.update(passphrase.as_bytes());
    StdRng::from_seed(hasher.finalize().into())
}

fn check_permutation_length(n: usize) -> Result<()> {
    if n < 2 {
        return Err(BitPermError::InvalidArgument(format!(
            "permutation length must be at least 2, got {}",
            n
        )));
    }
    check_length(n)
}

/// Uniform over permutations of `[0, n)` whose last element is not a fixed
/// point. The last slot takes one of the `n - 1` other values, then the rest
/// are shuffled into the remaining slots.
fn random_mapping<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let top = n - 1;
    let last = rng.gen_range(0..top);
    let mut mapping: Vec<usize> = (0..n).filter(|&v| v != last).collect();
    mapping.shuffle(rng);
    mapping.push(last);
    mapping
}

/// Fisher–Yates with rejection. For `n >= 2` at least a third of all
/// permutations are derangements, so the expected number of rounds is
/// below 3.
fn derangement_mapping<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut mapping: Vec<usize> = (0..n).collect();
    loop {
        mapping.shuffle(rng);
        if mapping.iter().enumerate().all(|(i, &v)| i != v) {
            return mapping;
        }
    }
}

/// The top element is paired first so it can never end up a trailing fixed
/// point. Every other element, visited in random order, stays fixed with
/// `probability` or is swapped with a random unassigned partner.
fn involution_mapping<R: Rng + ?Sized>(n: usize, probability: f64, rng: &mut R) -> Vec<usize> {
    let top = n - 1;
    let mut mapping: Vec<usize> = (0..n).collect();
    let partner = rng.gen_range(0..top);
    mapping.swap(top, partner);

    let mut unassigned: Vec<usize> = (0..top).filter(|&i| i != partner).collect();
    unassigned.shuffle(rng);
    while let Some(i) = unassigned.pop() {
        if unassigned.is_empty() || rng.gen_bool(probability) {
            continue;
        }
        let j = unassigned.swap_remove(rng.gen_range(0..unassigned.len()));
        mapping.swap(i, j);
    }
    mapping
}

/// Mask of exactly `n` bits: the top bit set, every other bit clear with
/// `probability`.
fn random_mask<R: Rng + ?Sized>(n: usize, probability: f64, rng: &mut R) -> BigUint {
    if n == 0 {
        return BigUint::zero();
    }
    let mut mask = BigUint::zero();
    mask.set_bit((n - 1) as u64, true);
    for bit in 0..n - 1 {
        if !rng.gen_bool(probability) {
            mask.set_bit(bit as u64, true);
        }
    }
    mask
}

impl Permutation {
    /// Uniformly random permutation of canonical length `n`.
    pub fn generate_random(n: usize) -> Result<Self> {
        Self::generate_random_with(n, &mut rand::thread_rng())
    }

    pub fn generate_random_with<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Self> {
        check_permutation_length(n)?;
        Self::new(random_mapping(n, rng))
    }

    /// Uniformly random permutation of `[0, n)` without fixed points.
    pub fn generate_derangement(n: usize) -> Result<Self> {
        Self::generate_derangement_with(n, &mut rand::thread_rng())
    }

    pub fn generate_derangement_with<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Self> {
        check_permutation_length(n)?;
        Self::new(derangement_mapping(n, rng))
    }

    /// Random involution of canonical length `n`. `probability` is the chance
    /// an element stays fixed; it must be in `[0, 1)` and is clamped to 0.99.
    pub fn generate_involution(n: usize, probability: f64) -> Result<Self> {
        Self::generate_involution_with(n, probability, &mut rand::thread_rng())
    }

    pub fn generate_involution_with<R: Rng + ?Sized>(
        n: usize,
        probability: f64,
        rng: &mut R,
    ) -> Result<Self> {
        check_permutation_length(n)?;
        let probability = check_probability(probability)?;
        Self::new(involution_mapping(n, probability, rng))
    }
}

impl Inversion {
    /// Random mask of bit-length exactly `n`. `probability` is the chance a
    /// bit below the top one is left unflipped; it must be in `[0, 1)` and is
    /// clamped to 0.99.
    pub fn generate_random(n: usize, probability: f64) -> Result<Self> {
        Self::generate_random_with(n, probability, &mut rand::thread_rng())
    }

    pub fn generate_random_with<R: Rng + ?Sized>(
        n: usize,
        probability: f64,
        rng: &mut R,
    ) -> Result<Self> {
        check_length(n)?;
        let probability = check_probability(probability)?;
        Self::from_mask(random_mask(n, probability, rng))
    }
}
