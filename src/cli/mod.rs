pub mod apply;
pub mod generate;
pub mod info;

pub use apply::*;
pub use generate::*;
pub use info::*;

use crate::error::{BitPermError, Result};
use crate::inversion::Inversion;
use crate::permutation::Permutation;
use crate::shuffle::Shuffle;
use num_bigint::{BigInt, BigUint};
use num_traits::Num;
use serde::{Deserialize, Serialize};

/// Kind of transform a command produces or decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// Uniformly random permutation
    Permutation,
    Derangement,
    Involution,
    Inversion,
    #[default]
    Shuffle,
}

impl std::str::FromStr for TransformKind {
    type Err = BitPermError;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "permutation" | "perm" | "random" => Ok(Self::Permutation),
            "derangement" => Ok(Self::Derangement),
            "involution" => Ok(Self::Involution),
            "inversion" | "xor" | "mask" => Ok(Self::Inversion),
            "shuffle" => Ok(Self::Shuffle),
            _ => Err(BitPermError::InvalidArgument(format!("kind: {}", s))),
        }
    }
}

/// Any of the three transforms, as produced by the commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
    Permutation(Permutation),
    Inversion(Inversion),
    Shuffle(Shuffle),
}

impl Transform {
    /// Decode a packed integer. Permutation kinds use the permutation
    /// encoding, an inversion is its raw mask.
    pub fn unpack(kind: TransformKind, packed: &BigUint) -> Result<Self> {
        match kind {
            TransformKind::Permutation | TransformKind::Derangement | TransformKind::Involution => {
                Ok(Self::Permutation(Permutation::unpack(packed)?))
            }
            TransformKind::Inversion => Ok(Self::Inversion(Inversion::new(packed.clone())?)),
            TransformKind::Shuffle => Ok(Self::Shuffle(Shuffle::unpack(packed)?)),
        }
    }

    pub fn pack(&self) -> BigUint {
        match self {
            Self::Permutation(p) => p.pack(),
            Self::Inversion(i) => i.mask().clone(),
            Self::Shuffle(s) => s.pack(),
        }
    }

    pub fn apply(&self, x: &BigInt) -> BigInt {
        match self {
            Self::Permutation(p) => p.apply(x),
            Self::Inversion(i) => i.apply(x),
            Self::Shuffle(s) => s.shuffle(x),
        }
    }

    pub fn invert(&self, x: &BigInt) -> BigInt {
        match self {
            Self::Permutation(p) => p.invert(x),
            Self::Inversion(i) => i.apply(x),
            Self::Shuffle(s) => s.unshuffle(x),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Permutation(p) => p.len(),
            Self::Inversion(i) => i.len(),
            Self::Shuffle(s) => s.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Permutation(_) => "permutation",
            Self::Inversion(_) => "inversion",
            Self::Shuffle(_) => "shuffle",
        }
    }
}

/// Parse a non-negative integer given in decimal or with a `0x`/`0b` prefix.
pub fn parse_unsigned(s: &str) -> Result<BigUint> {
    let s = s.trim().replace('_', "");
    let parsed = if let Some(hex) = s.strip_prefix("0x") {
        BigUint::from_str_radix(hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b") {
        BigUint::from_str_radix(bin, 2)
    } else {
        BigUint::from_str_radix(&s, 10)
    };
    parsed.map_err(|_| BitPermError::TypeMismatch(format!("'{}' is not a non-negative integer", s)))
}

/// Parse a signed integer given in decimal or with a `0x`/`0b` prefix.
pub fn parse_signed(s: &str) -> Result<BigInt> {
    let trimmed = s.trim();
    match trimmed.strip_prefix('-') {
        Some(rest) => Ok(-BigInt::from(parse_unsigned(rest)?)),
        None => Ok(BigInt::from(parse_unsigned(trimmed)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("shuffle".parse::<TransformKind>().unwrap(), TransformKind::Shuffle);
        assert_eq!("XOR".parse::<TransformKind>().unwrap(), TransformKind::Inversion);
        assert_eq!("perm".parse::<TransformKind>().unwrap(), TransformKind::Permutation);
        assert!("feistel".parse::<TransformKind>().is_err());
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_unsigned("13316").unwrap(), BigUint::from(13316u32));
        assert_eq!(parse_unsigned("0xDEAD_BEEF").unwrap(), BigUint::from(0xDEADBEEFu32));
        assert_eq!(parse_unsigned("0b101").unwrap(), BigUint::from(5u32));
        assert!(matches!(parse_unsigned("-1"), Err(BitPermError::TypeMismatch(_))));
        assert!(parse_unsigned("abc").is_err());
        assert_eq!(parse_signed("-0x10").unwrap(), BigInt::from(-16));
        assert_eq!(parse_signed("2009").unwrap(), BigInt::from(2009));
    }

    #[test]
    fn test_transform_unpack() {
        let t = Transform::unpack(TransformKind::Permutation, &BigUint::from(13316u32)).unwrap();
        assert_eq!(t.len(), 4);
        assert_eq!(t.pack(), BigUint::from(13316u32));

        let t = Transform::unpack(TransformKind::Shuffle, &BigUint::from(1024u32)).unwrap();
        assert!(t.is_empty());
        assert!(Transform::unpack(TransformKind::Shuffle, &BigUint::from(20u32)).is_err());

        let t = Transform::unpack(TransformKind::Inversion, &BigUint::from(0xDEADBEEFu32)).unwrap();
        let x = BigInt::from(0xCAFEBABEu32);
        assert_eq!(t.apply(&x), BigInt::from(0x14530451u32));
        assert_eq!(t.invert(&t.apply(&x)), x);
    }
}
