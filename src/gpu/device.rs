// gpu/device.rs — wgpu device abstraction.
//
// Responsibilities:
//   - Enumerate Vulkan adapters and select the first non-CPU one.
//   - Hold the device/queue pair plus the 1D workgroup width used when
//     creating the cube-update pipeline.
//   - Provide the free `dispatch_size` — ceiling division, so a cube count
//     that is not a multiple of the workgroup width still gets every
//     element covered (the kernel guards the overhang).
//
// ADAPTER SELECTION:
// wgpu's default `request_adapter` uses power preference heuristics that
// may grab llvmpipe/softpipe on WSL2 (where the software renderer appears
// as a valid Vulkan device). We enumerate explicitly and prefer real
// hardware, falling back to whatever exists as a last resort.

use std::fmt;

/// Cached adapter information for logging and debugging.
#[derive(Debug, Clone)]
pub struct AdapterInfo {
    pub name: String,
    pub device_type: wgpu::DeviceType,
    pub backend: wgpu::Backend,
}

impl fmt::Display for AdapterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?}, {:?})", self.name, self.backend, self.device_type)
    }
}

/// The core GPU context: device, queue, and workgroup configuration.
///
/// Create once and keep for the lifetime of the scene — Vulkan instance
/// and device initialization is expensive, per-tick work is not.
///
/// # Field drop order
/// Rust drops struct fields in declaration order. `_instance` is declared
/// last so the `wgpu::Instance` outlives `device` and `queue`; dzn (the
/// D3D12-to-Vulkan layer on WSL2) crashes if the instance dies first.
pub struct GpuDevice {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub adapter_info: AdapterInfo,
    workgroup_width: u32,
    /// Keeps the `wgpu::Instance` alive until `device` and `queue` are
    /// dropped. Never accessed directly.
    _instance: wgpu::Instance,
}

/// Default number of invocations per workgroup for the 1D cube kernel.
/// Well within `max_compute_invocations_per_workgroup` on every backend
/// wgpu supports.
const DEFAULT_WORKGROUP_WIDTH: u32 = 64;

impl GpuDevice {
    /// Create a `GpuDevice` on the first non-CPU Vulkan adapter found.
    ///
    /// # Errors
    /// Returns `Err` if no adapter exists or the device request fails.
    pub fn new() -> Result<Self, GpuError> {
        pollster::block_on(Self::init_async())
    }

    async fn init_async() -> Result<Self, GpuError> {
        // ALLOW_UNDERLYING_NONCOMPLIANT_ADAPTER lets wgpu enumerate dzn on
        // WSL2, which declares itself non-conformant but runs compute-only
        // workloads fine. Validation layer only in debug builds.
        let flags = if cfg!(debug_assertions) {
            wgpu::InstanceFlags::VALIDATION
                | wgpu::InstanceFlags::ALLOW_UNDERLYING_NONCOMPLIANT_ADAPTER
        } else {
            wgpu::InstanceFlags::ALLOW_UNDERLYING_NONCOMPLIANT_ADAPTER
        };

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::VULKAN,
            flags,
            ..Default::default()
        });

        let all_adapters: Vec<wgpu::Adapter> = instance
            .enumerate_adapters(wgpu::Backends::VULKAN)
            .into_iter()
            .collect();

        if all_adapters.is_empty() {
            return Err(GpuError::NoSuitableAdapter);
        }

        for a in &all_adapters {
            let info = a.get_info();
            eprintln!(
                "[cubewall] Vulkan adapter: {} ({:?}, {:?})",
                info.name, info.backend, info.device_type
            );
        }

        // Tier 1: real hardware (or dzn/VM pass-through, which report as
        // Other/VirtualGpu). Tier 2: anything at all, software included —
        // the adapter name is logged so you know what you got.
        let adapter = all_adapters
            .into_iter()
            .find(|a| {
                matches!(
                    a.get_info().device_type,
                    wgpu::DeviceType::DiscreteGpu
                        | wgpu::DeviceType::IntegratedGpu
                        | wgpu::DeviceType::VirtualGpu
                        | wgpu::DeviceType::Other
                )
            })
            .or_else(|| {
                instance
                    .enumerate_adapters(wgpu::Backends::VULKAN)
                    .into_iter()
                    .next()
            })
            .ok_or(GpuError::NoSuitableAdapter)?;

        let raw_info = adapter.get_info();
        let adapter_info = AdapterInfo {
            name: raw_info.name.clone(),
            device_type: raw_info.device_type,
            backend: raw_info.backend,
        };

        let (device, queue): (wgpu::Device, wgpu::Queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("cubewall"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await
            .map_err(GpuError::DeviceRequest)?;

        Ok(GpuDevice {
            device,
            queue,
            adapter_info,
            workgroup_width: DEFAULT_WORKGROUP_WIDTH,
            _instance: instance,
        })
    }

    /// Invocations per workgroup for the 1D cube kernel.
    pub fn workgroup_width(&self) -> u32 {
        self.workgroup_width
    }

    /// Override the workgroup width, validated against the device limit.
    ///
    /// Only affects [`GpuAnimator`](crate::gpu::animate::GpuAnimator)s
    /// built afterwards: each animator bakes the width into its pipeline
    /// at construction and dispatches with that baked width, so changing
    /// it here never desynchronizes an existing pipeline.
    ///
    /// Returns `Err` if `width` is zero or exceeds
    /// `max_compute_invocations_per_workgroup`.
    pub fn set_workgroup_width(&mut self, width: u32) -> Result<(), GpuError> {
        let max = self.device.limits().max_compute_invocations_per_workgroup;
        if width == 0 || width > max {
            return Err(GpuError::WorkgroupTooLarge { width, max });
        }
        self.workgroup_width = width;
        Ok(())
    }

}

/// Number of workgroups needed to cover `count` cubes at `width`
/// invocations per group.
///
/// Ceiling division: when `count` is not a multiple of the workgroup
/// width the final group covers the tail, and the shader must guard
///
/// ```wgsl
/// if (i >= params.cube_count) { return; }
/// ```
///
/// so the overhang invocations do nothing. Callers must pass the width
/// the pipeline was actually compiled with.
pub fn dispatch_size(count: u32, width: u32) -> u32 {
    count.div_ceil(width)
}

impl fmt::Display for GpuDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GpuDevice {{ adapter: {}, workgroup: {} }}",
            self.adapter_info, self.workgroup_width
        )
    }
}

// ============================================================
// Error type
// ============================================================

/// Errors from GPU initialization and per-tick dispatch.
#[derive(Debug)]
pub enum GpuError {
    /// No Vulkan adapter found at all. On WSL2: check that Vulkan is
    /// installed and `vulkaninfo` lists a device.
    NoSuitableAdapter,
    /// wgpu device request failed (driver issue, unsupported limits, etc.).
    DeviceRequest(wgpu::RequestDeviceError),
    /// Requested workgroup width is zero or exceeds the device limit.
    WorkgroupTooLarge { width: u32, max: u32 },
    /// Buffer allocation for the tick failed; the tick was aborted before
    /// dispatch and no partial state was consumed.
    BufferAllocation(String),
    /// Mapping the readback buffer failed after dispatch.
    Readback(String),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::NoSuitableAdapter => write!(
                f,
                "no Vulkan adapter found (is Vulkan installed? does `vulkaninfo` list a device?)"
            ),
            GpuError::DeviceRequest(e) => write!(f, "device request failed: {e}"),
            GpuError::WorkgroupTooLarge { width, max } => {
                write!(f, "workgroup width {width} invalid (device limit {max})")
            }
            GpuError::BufferAllocation(msg) => write!(f, "tick buffer allocation failed: {msg}"),
            GpuError::Readback(msg) => write!(f, "cube buffer readback failed: {msg}"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::DeviceRequest(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    // dispatch_size is a pure function — no GPU needed, so these run in
    // CI without Vulkan against the same function the dispatch path uses.
    use super::dispatch_size;

    #[test]
    fn dispatch_size_exact_multiple() {
        assert_eq!(dispatch_size(2560, 64), 40);
        assert_eq!(dispatch_size(64, 64), 1);
    }

    #[test]
    fn dispatch_size_rounds_up_for_overhang() {
        // 47 cubes, width 10 → 5 groups; the original integer division
        // would have produced 4 and silently skipped cubes 40..46.
        assert_eq!(dispatch_size(47, 10), 5);
        assert_eq!(dispatch_size(40, 10), 4);
        assert_eq!(dispatch_size(41, 10), 5);
    }

    #[test]
    fn dispatch_size_zero_count() {
        assert_eq!(dispatch_size(0, 64), 0);
    }
}
