// tests/test_grid.rs — Integration tests for grid generation + CPU update.
//
// The CPU path is the authoritative definition of the per-cube rules, so
// these tests pin its observable behavior: generation ranges, the exact
// color-wrap boundary, and the repetition semantics.

use cubewall::animate::advance_cubes;
use cubewall::element::{Cube, COLOR_MAX, COLOR_MIN, DEPTH_JITTER};
use cubewall::grid::CubeGrid;
use cubewall::random::{FixedSampler, SmallRngSampler};

#[test]
fn fifty_by_fifty_grid_matches_spec_ranges() {
    let mut sampler = SmallRngSampler::seeded(2024);
    let grid = CubeGrid::generate(50, &mut sampler);

    assert_eq!(grid.len(), 2500);
    for i in 0..50 {
        for j in 0..50 {
            let cube = grid.get(i, j);
            assert!(cube.position[0] >= 0.0 && cube.position[0] < 50.0);
            assert!(cube.position[1] >= 0.0 && cube.position[1] < 50.0);
            assert!((-DEPTH_JITTER..DEPTH_JITTER).contains(&cube.position[2]));
            for c in &cube.color[..3] {
                assert!((COLOR_MIN..COLOR_MAX).contains(c));
            }
            assert_eq!(cube.color[3], 1.0);
        }
    }
}

#[test]
fn generation_is_deterministic_under_a_seed() {
    let mut a = SmallRngSampler::seeded(77);
    let mut b = SmallRngSampler::seeded(77);
    let grid_a = CubeGrid::generate(12, &mut a);
    let grid_b = CubeGrid::generate(12, &mut b);
    assert_eq!(grid_a.cubes(), grid_b.cubes());
}

#[test]
fn boundary_channel_snaps_not_wraps() {
    // 0.85 + 0.1 overflows: the result must be exactly 0.15 — not 0.85,
    // and not the modulo value 0.85 + 0.1 - 0.7 = 0.25.
    let mut cubes = [Cube::new([0.0; 3], [COLOR_MAX, COLOR_MAX, COLOR_MAX, 1.0])];
    let mut sampler = FixedSampler::new(0.0);
    advance_cubes(&mut cubes, 0.1, 1, &mut sampler);
    assert_eq!(cubes[0].color[..3], [COLOR_MIN, COLOR_MIN, COLOR_MIN]);
}

#[test]
fn update_keeps_grid_consistent_with_flat_indexing() {
    let mut sampler = SmallRngSampler::seeded(31);
    let mut grid = CubeGrid::generate(5, &mut sampler);

    advance_cubes(grid.cubes_mut(), 0.02, 2, &mut sampler);

    // 2D addressing still resolves into the same flat slots after updates.
    for i in 0..5 {
        for j in 0..5 {
            assert_eq!(*grid.get(i, j), grid.cubes()[i * 5 + j]);
            assert_eq!(grid.get(i, j).position[0], i as f32);
            assert_eq!(grid.get(i, j).position[1], j as f32);
        }
    }
}

#[test]
fn many_ticks_never_escape_the_color_range() {
    let mut sampler = SmallRngSampler::seeded(404);
    let mut grid = CubeGrid::generate(10, &mut sampler);
    for _ in 0..200 {
        advance_cubes(grid.cubes_mut(), 0.033, 1, &mut sampler);
        for cube in grid.cubes() {
            for c in &cube.color[..3] {
                assert!((COLOR_MIN..=COLOR_MAX).contains(c), "channel escaped: {c}");
            }
            assert!((-DEPTH_JITTER..DEPTH_JITTER).contains(&cube.position[2]));
        }
    }
}
