// gpu/mod.rs — parallel update path.
//
// This module provides the wgpu compute kernel that mirrors the CPU update
// in animate.rs. The CPU implementation remains the authoritative
// reference — the kernel's deterministic part (the color cycle) is
// validated against it channel-for-channel.
//
// Execution model per tick:
//
//   flat cube buffer → storage buffer → one dispatch → blocking readback
//
// The calling thread blocks until the results are back; ticks are never
// pipelined, and every GPU buffer is a local of the dispatching call, so
// it is released on all exit paths including errors.
//
// The depth jitter is the one place the two paths intentionally diverge:
// the kernel has no sampler to share with the CPU, so it hashes
// (cube index, pass, per-tick seed) into [-0.2, 0.2]. Both are uniform
// and per-element independent; neither is a continuation of the other.

pub mod device;
pub mod animate;
