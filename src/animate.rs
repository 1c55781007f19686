// animate.rs — sequential (CPU) update strategy.
//
// This is the reference implementation of the per-cube tick: every GPU
// result is compared against what this function produces. One call runs
// `repetitions` full passes over the buffer; within a pass each cube is
// updated independently — no cube reads another cube's state, which is
// the property that makes the parallel kernel in gpu/animate.rs valid.
//
// Per cube, per pass:
//   1. cycle r, g, b by `color_speed` (element::cycle_channel), alpha kept;
//   2. replace z with a fresh sample from [-DEPTH_JITTER, DEPTH_JITTER)
//      — a resample, not a delta.
//
// Traversal is slice order, so a seeded sampler makes the whole pass
// deterministic: n passes in one call consume the sampler exactly like
// n single-pass calls.

use crate::element::{cycle_channel, Cube, DEPTH_JITTER};
use crate::random::UniformSampler;

/// Advance every cube in place, `repetitions` passes.
pub fn advance_cubes(
    cubes: &mut [Cube],
    color_speed: f32,
    repetitions: u32,
    sampler: &mut dyn UniformSampler,
) {
    for _ in 0..repetitions {
        for cube in cubes.iter_mut() {
            cube.color[0] = cycle_channel(cube.color[0], color_speed);
            cube.color[1] = cycle_channel(cube.color[1], color_speed);
            cube.color[2] = cycle_channel(cube.color[2], color_speed);
            cube.position[2] = sampler.sample(-DEPTH_JITTER, DEPTH_JITTER);
        }
    }
}
