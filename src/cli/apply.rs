use crate::cli::{parse_signed, parse_unsigned, Transform, TransformKind};
use crate::error::Result;
use num_bigint::BigInt;

/// Options for the apply command
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    pub kind: TransformKind,
    /// Packed transform, as printed by `generate`
    pub packed: String,
    pub invert: bool,
}

/// Run every value through the packed transform, in order
pub fn apply_values(options: &ApplyOptions, values: &[String]) -> Result<Vec<BigInt>> {
    let transform = Transform::unpack(options.kind, &parse_unsigned(&options.packed)?)?;
    values
        .iter()
        .map(|value| {
            let x = parse_signed(value)?;
            Ok(if options.invert {
                transform.invert(&x)
            } else {
                transform.apply(&x)
            })
        })
        .collect()
}
