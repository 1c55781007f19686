// tests/test_scene.rs — Integration tests for the scene-level component.
//
// Focus: the lockstep mirror (host state == grid state after every tick)
// and the startup contract (one handle per cell, initial state pushed at
// creation). All on the sequential path — the GPU path shares refresh_host
// and has its own ignored integration tests in src/gpu/animate.rs.

use cubewall::scene::{GridScene, SceneConfig, UpdateBackend};
use cubewall::random::SmallRngSampler;
use cubewall::visual::RecordingHost;

fn make_scene(size: usize, seed: u64) -> GridScene<RecordingHost> {
    let config = SceneConfig {
        size,
        color_speed: 0.04,
        repetitions: 1,
        backend: UpdateBackend::Sequential,
    };
    GridScene::with_sampler(
        config,
        RecordingHost::new(),
        Box::new(SmallRngSampler::seeded(seed)),
    )
    .expect("sequential scene construction cannot fail")
}

#[test]
fn host_receives_initial_state_at_creation() {
    let scene = make_scene(4, 1);
    assert_eq!(scene.host().len(), 16);
    for (cube, &handle) in scene.grid().cubes().iter().zip(scene.handles()) {
        assert_eq!(scene.host().position(handle), cube.position);
        assert_eq!(scene.host().color(handle), cube.color);
    }
}

#[test]
fn host_mirrors_grid_after_every_tick() {
    let mut scene = make_scene(6, 2);
    for _ in 0..5 {
        scene.tick().unwrap();
        for (cube, &handle) in scene.grid().cubes().iter().zip(scene.handles()) {
            assert_eq!(scene.host().position(handle), cube.position);
            assert_eq!(scene.host().color(handle), cube.color);
        }
    }
}

#[test]
fn ticks_change_colors_and_depth_but_not_xy() {
    let mut scene = make_scene(3, 3);
    let before: Vec<_> = scene.grid().cubes().to_vec();

    scene.tick().unwrap();

    for (after, before) in scene.grid().cubes().iter().zip(&before) {
        assert_ne!(after.color[..3], before.color[..3], "color did not advance");
        assert_eq!(after.color[3], 1.0);
        assert_eq!(after.position[0], before.position[0]);
        assert_eq!(after.position[1], before.position[1]);
    }
}

#[test]
fn seeded_scenes_evolve_identically() {
    let mut a = make_scene(5, 99);
    let mut b = make_scene(5, 99);
    for _ in 0..4 {
        a.tick().unwrap();
        b.tick().unwrap();
    }
    assert_eq!(a.grid().cubes(), b.grid().cubes());
}
