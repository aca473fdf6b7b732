use crate::cli::{Transform, TransformKind};
use crate::error::Result;
use crate::inversion::Inversion;
use crate::permutation::Permutation;
use crate::random::{seeded_rng, DEFAULT_PROBABILITY};
use crate::shuffle::Shuffle;
use rand::Rng;

/// Options for the generate command
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub kind: TransformKind,
    pub length: usize,
    /// Chance a point or bit is left alone (involutions and inversions)
    pub probability: f64,
    /// Passphrase for a reproducible result; fresh randomness when `None`
    pub seed: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            kind: TransformKind::default(),
            length: 64,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

/// Generate a random transform as described by `options`
pub fn generate_transform(options: &GenerateOptions) -> Result<Transform> {
    match &options.seed {
        Some(seed) => generate_with(options, &mut seeded_rng(seed)),
        None => generate_with(options, &mut rand::thread_rng()),
    }
}

fn generate_with<R: Rng + ?Sized>(options: &GenerateOptions, rng: &mut R) -> Result<Transform> {
    let n = options.length;
    let transform = match options.kind {
        TransformKind::Permutation => {
            Transform::Permutation(Permutation::generate_random_with(n, rng)?)
        }
        TransformKind::Derangement => {
            Transform::Permutation(Permutation::generate_derangement_with(n, rng)?)
        }
        TransformKind::Involution => Transform::Permutation(
            Permutation::generate_involution_with(n, options.probability, rng)?,
        ),
        TransformKind::Inversion => {
            Transform::Inversion(Inversion::generate_random_with(n, options.probability, rng)?)
        }
        TransformKind::Shuffle => Transform::Shuffle(Shuffle::generate_random_with(n, rng)?),
    };
    Ok(transform)
}
