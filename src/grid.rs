// grid.rs — the S×S cube grid, stored flat.
//
// One `Vec<Cube>` is the canonical store for both execution paths:
// the CPU path mutates it in place, the GPU path casts it into a storage
// buffer and copies the results back. 2D addressing is derived, never
// stored — `index = i * size + j` everywhere, so there is no second
// representation to keep consistent.
//
// The grid is built exactly once. x and y are the grid coordinates and
// never change afterwards; ticks mutate only color and depth, and never
// add or remove cubes.

use crate::element::{Cube, COLOR_MAX, COLOR_MIN, DEPTH_JITTER};
use crate::random::UniformSampler;

/// A flat, row-major S×S grid of cubes.
pub struct CubeGrid {
    cubes: Vec<Cube>,
    size: usize,
}

impl CubeGrid {
    /// Generate an S×S grid.
    ///
    /// Each cell `(i, j)` gets `position = [i, j, z]` with `z` sampled
    /// uniformly from `[-DEPTH_JITTER, DEPTH_JITTER)`, and a color with
    /// each of r, g, b sampled from `[COLOR_MIN, COLOR_MAX)` and alpha
    /// fixed at 1.0. Per-cell sampling order is z, r, g, b.
    ///
    /// `size == 0` yields an empty grid; updating it is a no-op, not an
    /// error.
    pub fn generate(size: usize, sampler: &mut dyn UniformSampler) -> Self {
        let mut cubes = Vec::with_capacity(size * size);
        for i in 0..size {
            for j in 0..size {
                let z = sampler.sample(-DEPTH_JITTER, DEPTH_JITTER);
                let color = [
                    sampler.sample(COLOR_MIN, COLOR_MAX),
                    sampler.sample(COLOR_MIN, COLOR_MAX),
                    sampler.sample(COLOR_MIN, COLOR_MAX),
                    1.0,
                ];
                cubes.push(Cube::new([i as f32, j as f32, z], color));
            }
        }
        CubeGrid { cubes, size }
    }

    /// Side length S.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total cube count, always `size * size`.
    pub fn len(&self) -> usize {
        self.cubes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubes.is_empty()
    }

    /// Flattening rule for 2D addressing.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.size + j
    }

    /// Cube at grid coordinates `(i, j)`. Panics if out of range, like
    /// slice indexing — the grid has no partial states to recover to.
    pub fn get(&self, i: usize, j: usize) -> &Cube {
        &self.cubes[self.index(i, j)]
    }

    /// The flat store, in index order.
    pub fn cubes(&self) -> &[Cube] {
        &self.cubes
    }

    /// Mutable view of the flat store for the update strategies.
    pub fn cubes_mut(&mut self) -> &mut [Cube] {
        &mut self.cubes
    }
}
