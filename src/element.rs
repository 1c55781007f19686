// element.rs — the Cube element and its per-tick update rules.
//
// A `Cube` is both the CPU-side simulation state and the GPU wire format:
// `#[repr(C)]` + bytemuck so the flat cube buffer can be cast straight into
// a storage buffer without marshalling. The layout must match the WGSL
// `Cube` struct in shaders/cube_update.wgsl exactly:
//
//   offset  0  position  vec3<f32>   (aligns to 16 in WGSL → explicit pad)
//   offset 16  color     vec4<f32>
//   size   32
//
// The color-cycle rule here is the single CPU reference the GPU kernel is
// validated against (see gpu/animate.rs tests).

/// Lower bound of every color channel after wraparound.
pub const COLOR_MIN: f32 = 0.15;

/// Upper bound of every color channel. A channel that would exceed this
/// snaps back to [`COLOR_MIN`] — it does not wrap by the overflow amount.
pub const COLOR_MAX: f32 = 0.85;

/// Depth (z) is re-sampled uniformly from [-DEPTH_JITTER, DEPTH_JITTER]
/// every update pass.
pub const DEPTH_JITTER: f32 = 0.2;

/// One cell of the wall: position in scene space plus an RGBA color.
///
/// `position[0]` and `position[1]` are the immutable grid coordinates
/// `(i, j)`; `position[2]` is the jittered depth. `color[3]` (alpha) is
/// fixed at 1.0 and never touched by the update rules.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Cube {
    /// (x, y, z) = (grid i, grid j, depth jitter).
    pub position: [f32; 3],
    // Padding so `color` lands at offset 16, matching WGSL vec3 alignment.
    _pad: f32,
    /// RGBA, each channel in [COLOR_MIN, COLOR_MAX], alpha = 1.0.
    pub color: [f32; 4],
}

impl Cube {
    /// Build a cube at `position` with the given color.
    pub fn new(position: [f32; 3], color: [f32; 4]) -> Self {
        Cube { position, _pad: 0.0, color }
    }
}

/// Advance one color channel by `step`, snapping to [`COLOR_MIN`] when the
/// result would exceed [`COLOR_MAX`].
///
/// This is a reset, not a modulo: 0.84 + 0.10 → 0.15, never 0.09 over the
/// floor. A channel that stays at or below the ceiling passes through
/// unchanged apart from the increment.
#[inline]
pub fn cycle_channel(c: f32, step: f32) -> f32 {
    let advanced = c + step;
    if advanced > COLOR_MAX {
        COLOR_MIN
    } else {
        advanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_advances_below_ceiling() {
        let c = cycle_channel(0.5, 0.1);
        assert!((c - 0.6).abs() < 1e-6);
    }

    #[test]
    fn channel_snaps_to_floor_past_ceiling() {
        // 0.8 + 0.1 = 0.9 > 0.85 → snap to 0.15, not 0.85 or a wrapped value.
        assert_eq!(cycle_channel(0.8, 0.1), COLOR_MIN);
    }

    #[test]
    fn channel_at_ceiling_snaps_for_any_positive_step() {
        assert_eq!(cycle_channel(COLOR_MAX, 1e-6), COLOR_MIN);
        assert_eq!(cycle_channel(COLOR_MAX, 0.5), COLOR_MIN);
    }

    #[test]
    fn channel_exactly_reaching_ceiling_stays() {
        // The rule is strictly-greater-than: landing exactly on 0.85 is kept.
        let c = cycle_channel(COLOR_MAX - 0.1, 0.1);
        assert!((c - COLOR_MAX).abs() < 1e-6);
    }

    #[test]
    fn result_always_in_range_for_valid_inputs() {
        let mut c = 0.15f32;
        for _ in 0..1000 {
            c = cycle_channel(c, 0.013);
            assert!(
                (COLOR_MIN..=COLOR_MAX).contains(&c),
                "channel escaped range: {c}"
            );
        }
    }

    #[test]
    fn cube_layout_matches_wgsl() {
        // The WGSL struct is 32 bytes with color at offset 16. If this
        // breaks, the storage-buffer cast in gpu/animate.rs silently
        // corrupts every cube.
        assert_eq!(std::mem::size_of::<Cube>(), 32);
        assert_eq!(std::mem::offset_of!(Cube, color), 16);
        assert_eq!(std::mem::align_of::<Cube>(), 4);
    }
}
