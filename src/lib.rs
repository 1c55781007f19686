// cubewall — an animated wall of cubes, two ways.
//
// An S×S grid of cube elements is generated once, then every tick each
// cube's color channels cycle through a preset range and its depth (z)
// is re-randomized. The same per-element rules exist twice:
//
//   - `animate` — the CPU reference implementation. Authoritative:
//     every GPU result is validated against it.
//   - `gpu::animate` — a wgpu compute kernel over the flattened cube
//     buffer, dispatched once per tick with a blocking readback.
//
// The grid itself is a single flat `Vec<Cube>` addressed by
// `index = i * size + j`; anything visual goes through the narrow
// `VisualHost` trait, so the core never touches a renderer.

pub mod element;
pub mod random;
pub mod grid;
pub mod visual;
pub mod animate;
pub mod scene;

pub mod gpu;
