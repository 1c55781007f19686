// demos/gpu_wall.rs
//
// Headless parallel run: ticks the wall through the compute kernel and
// prints per-tick timings. Needs a Vulkan device.
// Run with: cargo run --example gpu_wall [size] [ticks]

use std::time::Instant;

use cubewall::scene::{GridScene, SceneConfig, UpdateBackend};
use cubewall::visual::NullHost;

fn main() {
    let mut args = std::env::args().skip(1);
    let size: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(100);
    let ticks: u32 = args.next().and_then(|a| a.parse().ok()).unwrap_or(120);

    let config = SceneConfig {
        size,
        color_speed: 0.01,
        repetitions: 1,
        backend: UpdateBackend::Parallel,
    };

    let mut scene = match GridScene::new(config, NullHost::new()) {
        Ok(scene) => scene,
        Err(e) => {
            eprintln!("[cubewall] GPU scene init failed: {e}");
            std::process::exit(1);
        }
    };

    println!("ticking {size}×{size} wall ({} cubes), {ticks} ticks", size * size);

    let mut total_ms = 0.0f64;
    for t in 0..ticks {
        let start = Instant::now();
        if let Err(e) = scene.tick() {
            eprintln!("[cubewall] tick {t} failed: {e}");
            std::process::exit(1);
        }
        let ms = start.elapsed().as_secs_f64() * 1e3;
        total_ms += ms;
        if t < 5 || t % 30 == 0 {
            println!("  tick {t:4}: {ms:7.3} ms");
        }
    }

    println!("average: {:.3} ms/tick", total_ms / ticks as f64);
}
