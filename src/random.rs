// random.rs — the randomness seam.
//
// Depth jitter and initial colors are the only nondeterministic part of the
// update rules, so the sampler is a trait: production code uses a SmallRng,
// tests inject a fixed or seeded source to make the CPU path reproducible
// and to compare it against the GPU path channel-for-channel.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A source of uniform floats over a half-open range.
pub trait UniformSampler {
    /// Sample uniformly from `[lo, hi)`. Callers guarantee `lo < hi`.
    fn sample(&mut self, lo: f32, hi: f32) -> f32;
}

/// Default sampler: a `SmallRng`, cheap enough for per-cube jitter in the
/// tick loop.
pub struct SmallRngSampler {
    rng: SmallRng,
}

impl SmallRngSampler {
    /// OS-entropy-seeded sampler for normal runs.
    pub fn from_entropy() -> Self {
        SmallRngSampler { rng: SmallRng::from_entropy() }
    }

    /// Deterministic sampler for tests and reproducible demos.
    pub fn seeded(seed: u64) -> Self {
        SmallRngSampler { rng: SmallRng::seed_from_u64(seed) }
    }
}

impl UniformSampler for SmallRngSampler {
    #[inline]
    fn sample(&mut self, lo: f32, hi: f32) -> f32 {
        self.rng.gen_range(lo..hi)
    }
}

/// Test stub: always returns the same value, clamped into the requested
/// range. With depth pinned, the color rule is the only thing left to
/// observe — which is exactly what the CPU/GPU equivalence tests need.
pub struct FixedSampler {
    value: f32,
}

impl FixedSampler {
    pub fn new(value: f32) -> Self {
        FixedSampler { value }
    }
}

impl UniformSampler for FixedSampler {
    #[inline]
    fn sample(&mut self, lo: f32, hi: f32) -> f32 {
        self.value.clamp(lo, hi)
    }
}
