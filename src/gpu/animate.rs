// gpu/animate.rs — parallel update strategy (compute kernel dispatch).
//
// Same rules as animate.rs, expressed as one kernel invocation per cube
// over the flattened buffer, with the color speed and repetition count as
// invocation-wide uniforms rather than per-element data.
//
// PER-TICK LIFECYCLE
// ───────────────────
// The storage buffer, uniform buffer, and readback buffer are locals of
// `advance()`. Whatever path exits the function — success, allocation
// failure, readback failure — drops them; no buffer survives into the
// next tick and nothing needs a manual dispose call.
//
// ALLOCATION FAILURE
// ───────────────────
// wgpu reports out-of-memory through error scopes, not return values. An
// OutOfMemory scope brackets buffer creation; if it trips, the tick aborts
// *before* submit, so no partial buffer state is ever read back.
//
// READBACK
// ─────────
// `map_async` + `device.poll(Maintain::Wait)` — the blocking pattern.
// The calling thread does not continue until the full result buffer is
// materialized, so ticks cannot pipeline.

use wgpu::util::DeviceExt;

use crate::element::Cube;
use crate::gpu::device::{dispatch_size, GpuDevice, GpuError};

// ---------------------------------------------------------------------------
// Uniform params (must match WGSL struct Params exactly)
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Params {
    cube_count: u32,
    repetitions: u32,
    color_speed: f32,
    seed: u32,
}

// ---------------------------------------------------------------------------
// GpuAnimator
// ---------------------------------------------------------------------------

/// The compute-kernel counterpart of [`crate::animate::advance_cubes`].
///
/// Create once; call [`advance`](GpuAnimator::advance) each tick.
pub struct GpuAnimator {
    pipeline: wgpu::ComputePipeline,
    bgl: wgpu::BindGroupLayout,
    // Width the pipeline's @workgroup_size was compiled with. Dispatch
    // sizing must use this value, not the device's current width — the
    // two can differ if `set_workgroup_width` is called after this
    // animator was built, and an undersized dispatch would skip cubes.
    workgroup_width: u32,
    // Per-tick seed for the shader-side depth jitter, advanced by an LCG
    // so consecutive ticks draw different jitter.
    seed: u32,
}

impl GpuAnimator {
    pub fn new(gpu: &GpuDevice) -> Self {
        let workgroup_width = gpu.workgroup_width();
        let shader_template = include_str!("../shaders/cube_update.wgsl");
        let shader_src = shader_template.replace("{{WG_X}}", &workgroup_width.to_string());

        let shader = gpu.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("cube_update.wgsl"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let bgl = gpu.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("GpuAnimator BGL"),
            entries: &[
                // 0 — cube buffer (storage read_write)
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                // 1 — params uniform
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout =
            gpu.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("GpuAnimator pipeline layout"),
                bind_group_layouts: &[&bgl],
                push_constant_ranges: &[],
            });

        let pipeline =
            gpu.device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
                label: Some("update_cubes"),
                layout: Some(&pipeline_layout),
                module: &shader,
                entry_point: "update_cubes",
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                cache: None,
            });

        GpuAnimator { pipeline, bgl, workgroup_width, seed: 0x1234_5678 }
    }

    /// Width the kernel was compiled with; fixed for this animator's life.
    pub fn workgroup_width(&self) -> u32 {
        self.workgroup_width
    }

    /// Run `repetitions` update passes over `cubes` on the GPU and copy
    /// the results back in place.
    ///
    /// Blocks until the readback is complete. An empty slice is a no-op.
    pub fn advance(
        &mut self,
        gpu: &GpuDevice,
        cubes: &mut [Cube],
        color_speed: f32,
        repetitions: u32,
    ) -> Result<(), GpuError> {
        if cubes.is_empty() {
            return Ok(());
        }

        let cube_count = cubes.len() as u32;
        let buf_size = std::mem::size_of_val(cubes) as u64;

        // Fresh jitter stream each tick.
        self.seed = self.seed.wrapping_mul(1664525).wrapping_add(1013904223);

        // Bracket the transient allocations with an OOM scope: creation
        // failures surface here instead of as device loss mid-dispatch.
        gpu.device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);

        let cube_buf = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("GpuAnimator cubes"),
            contents: bytemuck::cast_slice(cubes),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
        });

        let params = Params {
            cube_count,
            repetitions,
            color_speed,
            seed: self.seed,
        };
        let params_buf = gpu.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("GpuAnimator params"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let readback_buf = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("GpuAnimator readback"),
            size: buf_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        if let Some(err) = pollster::block_on(gpu.device.pop_error_scope()) {
            // Buffers drop right here; the tick never reaches dispatch.
            return Err(GpuError::BufferAllocation(err.to_string()));
        }

        let bind_group = gpu.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("GpuAnimator BG"),
            layout: &self.bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: cube_buf.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: params_buf.as_entire_binding() },
            ],
        });

        let mut encoder = gpu.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor { label: Some("GpuAnimator dispatch") },
        );
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("update_cubes"),
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &bind_group, &[]);
            pass.dispatch_workgroups(dispatch_size(cube_count, self.workgroup_width), 1, 1);
        }
        encoder.copy_buffer_to_buffer(&cube_buf, 0, &readback_buf, 0, buf_size);
        gpu.queue.submit(std::iter::once(encoder.finish()));

        // Block until the kernel has run and the copy has landed.
        let slice = readback_buf.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |r| {
            let _ = tx.send(r);
        });
        gpu.device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .map_err(|_| GpuError::Readback("map callback never fired".into()))?
            .map_err(|e| GpuError::Readback(e.to_string()))?;

        {
            let mapped = slice.get_mapped_range();
            cubes.copy_from_slice(bytemuck::cast_slice(&mapped));
        }
        readback_buf.unmap();

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
