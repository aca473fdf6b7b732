use bitperm::{BitPermError, Inversion, Permutation, Shuffle};
use num_bigint::{BigInt, BigUint};
use std::error::Error;

const SHUFFLE_MAPPING: [usize; 32] = [
    11, 0, 1, 4, 19, 20, 5, 23, 21, 31, 29, 7, 8, 26, 28, 30, 15, 2, 17, 18, 16, 10, 12, 25, 3,
    13, 14, 6, 24, 9, 22, 27,
];
const SHUFFLE_MASK: u64 = 0x2528574D;
const SHUFFLE_PACKED: &str = "192658906865088603127525391421771642279671466717216";

fn big(s: &str) -> BigUint {
    s.parse().expect("valid decimal literal")
}

struct LehmerCase {
    mapping: Vec<usize>,
    lehmer: Vec<usize>,
    packed: BigUint,
    inversions: usize,
}

fn lehmer_cases() -> Vec<LehmerCase> {
    vec![
        LehmerCase {
            mapping: vec![],
            lehmer: vec![],
            packed: BigUint::from(0u32),
            inversions: 0,
        },
        LehmerCase {
            mapping: vec![2, 0, 3, 1],
            lehmer: vec![2, 0, 1, 0],
            packed: BigUint::from(0b11010000000100u32),
            inversions: 3,
        },
        LehmerCase {
            mapping: vec![0, 1, 8, 4, 3, 11, 6, 5, 2, 10, 9, 7],
            lehmer: vec![0, 0, 6, 2, 1, 6, 2, 1, 0, 2, 1, 0],
            packed: BigUint::from(2321970188u64),
            inversions: 21,
        },
        LehmerCase {
            mapping: vec![
                40, 4, 9, 46, 32, 49, 38, 43, 15, 25, 6, 51, 42, 50, 34, 60, 8, 37, 22, 20, 48, 44,
                3, 56, 27, 16, 41, 36, 33, 45, 14, 39, 12, 61, 58, 52, 47, 24, 18, 62, 35, 0, 30,
                57, 19, 2, 59, 5, 11, 63, 26, 23, 54, 55, 29, 7, 21, 1, 53, 28, 31, 17, 13, 10,
            ],
            lehmer: vec![
                40, 4, 8, 43, 30, 44, 35, 38, 13, 22, 5, 40, 34, 38, 28, 45, 6, 29, 17, 15, 32, 29,
                3, 34, 18, 10, 25, 23, 21, 23, 9, 21, 7, 28, 26, 21, 20, 13, 9, 23, 17, 0, 14, 18,
                8, 1, 16, 1, 3, 14, 7, 6, 10, 10, 7, 1, 4, 0, 5, 3, 3, 2, 1, 0,
            ],
            packed: big("81341066463989662950936270920469806268596711232567738656487394095083725730493736861738327104"),
            inversions: 1080,
        },
    ]
}

#[test]
fn permutation_lehmer_and_pack_vectors() -> Result<(), Box<dyn Error>> {
    for case in lehmer_cases() {
        let p = Permutation::new(case.mapping.iter().copied())?;
        assert_eq!(p.as_lehmer_code(), case.lehmer);
        assert_eq!(p.pack(), case.packed);
        assert_eq!(p.get_inversion_count(), case.inversions);
        assert_eq!(Permutation::from_lehmer_code(&case.lehmer)?, p);
        assert_eq!(Permutation::unpack(&case.packed)?, p);
    }
    Ok(())
}

#[test]
fn permutation_apply_vector() -> Result<(), Box<dyn Error>> {
    let p = Permutation::new([2, 1, 0])?;
    assert_eq!(p.apply(&BigInt::from(0b001)), BigInt::from(0b100));
    Ok(())
}

#[test]
fn trailing_fixed_points_are_reduced() -> Result<(), Box<dyn Error>> {
    assert_eq!(Permutation::new([2, 1, 0, 3, 4])?, Permutation::new([2, 1, 0])?);
    Ok(())
}

#[test]
fn length_cap() {
    assert!(matches!(
        Permutation::new((0..1024usize).rev()),
        Err(BitPermError::TooLong(_))
    ));
    assert!(Permutation::new((0..1023usize).rev()).is_ok());
}

#[test]
fn inversion_apply_vector() -> Result<(), Box<dyn Error>> {
    let inv = Inversion::new(0xDEADBEEFu64)?;
    assert_eq!(
        inv.apply(&BigInt::from(0xCAFEBABEu64)),
        BigInt::from(0x14530451u64)
    );
    Ok(())
}

#[test]
fn shuffle_identity_vectors() -> Result<(), Box<dyn Error>> {
    let s = Shuffle::identity();
    assert_eq!(s.pack(), BigUint::from(1024u32));
    assert_eq!(s.as_tuple(), vec![BigUint::from(0u32)]);
    assert_eq!(Shuffle::unpack(&BigUint::from(1024u32))?, s);
    Ok(())
}

#[test]
fn shuffle_pack_vector() -> Result<(), Box<dyn Error>> {
    let s = Shuffle::new(
        Permutation::new(SHUFFLE_MAPPING)?,
        Inversion::new(SHUFFLE_MASK)?,
    );

    let mut tuple: Vec<BigUint> = SHUFFLE_MAPPING.iter().map(|&v| BigUint::from(v)).collect();
    tuple.push(BigUint::from(623400781u32));
    assert_eq!(s.as_tuple(), tuple);
    assert_eq!(Shuffle::from_tuple(&tuple)?, s);

    assert_eq!(s.pack(), big(SHUFFLE_PACKED));
    assert_eq!(Shuffle::unpack(&big(SHUFFLE_PACKED))?, s);
    Ok(())
}

#[test]
fn shuffle_apply_vector() -> Result<(), Box<dyn Error>> {
    let s = Shuffle::unpack(&big(SHUFFLE_PACKED))?;
    assert_eq!(
        s.shuffle(&BigInt::from(0xDEADBEEFu64)),
        BigInt::from(0xCAFEBABEu64)
    );
    assert_eq!(
        s.unshuffle(&BigInt::from(0xCAFEBABEu64)),
        BigInt::from(0xDEADBEEFu64)
    );
    Ok(())
}

#[test]
fn shuffle_rejects_values_below_guard() {
    assert!(matches!(
        Shuffle::unpack(&BigUint::from(20u32)),
        Err(BitPermError::InvalidEncoding(_))
    ));
}
