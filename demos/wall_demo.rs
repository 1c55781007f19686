// demos/wall_demo.rs
//
// Animate the cube wall in a window, CPU path. Each grid cell is drawn as
// a colored square; depth modulates brightness so the jitter is visible.
// Run with: cargo run --example wall_demo

use minifb::{Key, Window, WindowOptions};

use cubewall::element::DEPTH_JITTER;
use cubewall::scene::{GridScene, SceneConfig, UpdateBackend};
use cubewall::visual::RecordingHost;

const SIZE: usize = 50;
const CELL: usize = 12;

fn main() {
    let config = SceneConfig {
        size: SIZE,
        color_speed: 0.01,
        repetitions: 1,
        backend: UpdateBackend::Sequential,
    };
    let mut scene =
        GridScene::new(config, RecordingHost::new()).expect("sequential scene cannot fail");

    let dim = SIZE * CELL;
    let mut window = Window::new(
        "cubewall — CPU path (ESC to quit)",
        dim,
        dim,
        WindowOptions::default(),
    )
    .expect("failed to open window");
    window.set_target_fps(60);

    let mut framebuffer = vec![0u32; dim * dim];

    while window.is_open() && !window.is_key_down(Key::Escape) {
        scene.tick().expect("cpu tick cannot fail");
        rasterize(&scene, &mut framebuffer, dim);
        window
            .update_with_buffer(&framebuffer, dim, dim)
            .expect("window update failed");
    }
}

// Draw each cell from the host's mirrored state (not the grid directly) —
// the demo doubles as a visual check of the lockstep mirror.
fn rasterize(scene: &GridScene<RecordingHost>, framebuffer: &mut [u32], dim: usize) {
    let host = scene.host();
    for &handle in scene.handles() {
        let pos = host.position(handle);
        let color = host.color(handle);
        let (i, j) = (pos[0] as usize, pos[1] as usize);

        // Depth in [-0.2, 0.2] → brightness in [0.6, 1.0]: nearer is brighter.
        let brightness = 0.8 + pos[2] / DEPTH_JITTER * 0.2;
        let pixel = pack_rgb(color, brightness);

        for y in (j * CELL)..(j * CELL + CELL - 1) {
            for x in (i * CELL)..(i * CELL + CELL - 1) {
                framebuffer[y * dim + x] = pixel;
            }
        }
    }
}

fn pack_rgb(color: [f32; 4], brightness: f32) -> u32 {
    let r = (color[0] * brightness * 255.0) as u32;
    let g = (color[1] * brightness * 255.0) as u32;
    let b = (color[2] * brightness * 255.0) as u32;
    (r << 16) | (g << 8) | b
}
