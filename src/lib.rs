//! bitperm - bit-level permutations, XOR inversions and shuffles
//!
//! Three invertible transforms over the bits of arbitrary-width integers.
//! Each one only touches a bounded number of low-order bits (at most 1023)
//! and copies everything above, including the sign extension of negative
//! numbers, unchanged.
//!
//! ```text
//! x → Permutation (move bits) → Inversion (flip bits) → y     Shuffle
//! y → Inversion (flip bits) → Permutation⁻¹ (move back) → x   Unshuffle
//! ```
//!
//! - **Permutation**: a canonical bijection on bit positions, with cycle
//!   decomposition, Lehmer codes and a packed integer form
//! - **Inversion**: an XOR mask, its own inverse
//! - **Shuffle**: a permutation followed by an inversion, with its own
//!   packed form
//!
//! These are building blocks only; nothing here claims cryptographic
//! strength.
//!
//! ## Example
//!
//! ```
//! use bitperm::{Inversion, Permutation, Shuffle};
//! use num_bigint::BigInt;
//!
//! let p = Permutation::new([2, 1, 0]).unwrap();
//! assert_eq!(p.apply(&BigInt::from(0b001)), BigInt::from(0b100));
//!
//! let s = Shuffle::new(p, Inversion::new(0b11).unwrap());
//! let x = BigInt::from(2009);
//! assert_eq!(s.unshuffle(&s.shuffle(&x)), x);
//! ```

pub mod bits;
pub mod cli;
pub mod error;
pub mod inversion;
pub mod lehmer;
pub mod permutation;
pub mod random;
pub mod shuffle;

pub use bits::{BitTransform, Transformed, MAX_LENGTH};
pub use error::{BitPermError, Result};
pub use inversion::Inversion;
pub use permutation::Permutation;
pub use random::{seeded_rng, DEFAULT_PROBABILITY};
pub use shuffle::Shuffle;
