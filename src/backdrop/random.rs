use rand::SeedableRng;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;

/// Uniform sample in [0, 1).
#[inline]
pub fn unit(rng: &mut StdRng) -> f32 {
    StandardUniform.sample(rng)
}

/// Uniform sample in [min, min + spread).
#[inline]
pub fn spread(rng: &mut StdRng, min: f32, spread: f32) -> f32 {
    min + unit(rng) * spread
}

/// Uniform sample in [-spread / 2, spread / 2).
#[inline]
pub fn centered(rng: &mut StdRng, spread: f32) -> f32 {
    (unit(rng) - 0.5) * spread
}

pub fn seeded(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(rand::random))
}
