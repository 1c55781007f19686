// scene.rs — the GridAnimator component.
//
// Ties everything together: builds the grid once, mints one visual handle
// per cell, and advances color/depth every tick through the strategy that
// was fixed at construction.
//
// The strategy is a sum type, not a per-tick boolean: whether a scene runs
// sequentially or via the compute kernel is decided exactly once in
// `GridScene::new`, so a run can never mix paths mid-flight.
//
// The flat grid is the only source of truth. After each tick the host is
// refreshed from it wholesale — the handles mirror the store, they never
// hold state of their own.

use std::fmt;

use crate::animate::advance_cubes;
use crate::gpu::animate::GpuAnimator;
use crate::gpu::device::{GpuDevice, GpuError};
use crate::grid::CubeGrid;
use crate::random::{SmallRngSampler, UniformSampler};
use crate::visual::{CubeHandle, VisualHost};

/// Which update strategy drives the ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateBackend {
    /// In-place CPU loop (the reference path).
    Sequential,
    /// One compute-kernel dispatch per tick with blocking readback.
    Parallel,
}

/// Scene configuration, supplied once at startup and fixed for the run.
pub struct SceneConfig {
    /// Grid side length S. Zero yields an empty grid and no-op ticks.
    pub size: usize,
    /// Per-tick color channel increment. Must be positive and finite.
    pub color_speed: f32,
    /// Update passes applied per tick. Must be positive.
    pub repetitions: u32,
    /// Strategy selection, made once here.
    pub backend: UpdateBackend,
}

impl Default for SceneConfig {
    /// The original demo's defaults: a 50×50 wall, slow color drift,
    /// one pass per tick, CPU path.
    fn default() -> Self {
        SceneConfig {
            size: 50,
            color_speed: 0.01,
            repetitions: 1,
            backend: UpdateBackend::Sequential,
        }
    }
}

/// Rejected configuration values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// `color_speed` must be a positive, finite float.
    InvalidColorSpeed(f32),
    /// `repetitions` must be at least 1.
    ZeroRepetitions,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidColorSpeed(v) => {
                write!(f, "color_speed must be positive and finite (got {v})")
            }
            ConfigError::ZeroRepetitions => f.write_str("repetitions must be at least 1"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Anything that can go wrong building or ticking a scene.
#[derive(Debug)]
pub enum SceneError {
    Config(ConfigError),
    Gpu(GpuError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Config(e) => write!(f, "{e}"),
            SceneError::Gpu(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Config(e) => Some(e),
            SceneError::Gpu(e) => Some(e),
        }
    }
}

impl From<ConfigError> for SceneError {
    fn from(e: ConfigError) -> Self {
        SceneError::Config(e)
    }
}

impl From<GpuError> for SceneError {
    fn from(e: GpuError) -> Self {
        SceneError::Gpu(e)
    }
}

// The chosen path, constructed once. The parallel variant owns its device
// and pipeline for the scene's lifetime.
enum Strategy {
    Sequential,
    Parallel { gpu: GpuDevice, animator: GpuAnimator },
}

/// An S×S wall of cubes plus the machinery to animate it.
pub struct GridScene<H: VisualHost> {
    grid: CubeGrid,
    handles: Vec<CubeHandle>,
    host: H,
    sampler: Box<dyn UniformSampler>,
    color_speed: f32,
    repetitions: u32,
    strategy: Strategy,
}

impl<H: VisualHost> GridScene<H> {
    /// Build the scene with OS-entropy randomness.
    ///
    /// Generates the grid, creates one visual cube per cell (in flat index
    /// order, so `handles[i * S + j]` pairs with `grid.get(i, j)`), and —
    /// for the parallel backend — initializes the GPU device and pipeline.
    pub fn new(config: SceneConfig, host: H) -> Result<Self, SceneError> {
        Self::with_sampler(config, host, Box::new(SmallRngSampler::from_entropy()))
    }

    /// Like [`new`](GridScene::new) but with an injected sampler, for
    /// deterministic tests and reproducible demos.
    pub fn with_sampler(
        config: SceneConfig,
        mut host: H,
        mut sampler: Box<dyn UniformSampler>,
    ) -> Result<Self, SceneError> {
        if !(config.color_speed.is_finite() && config.color_speed > 0.0) {
            return Err(ConfigError::InvalidColorSpeed(config.color_speed).into());
        }
        if config.repetitions == 0 {
            return Err(ConfigError::ZeroRepetitions.into());
        }

        let grid = CubeGrid::generate(config.size, &mut *sampler);
        let handles = grid
            .cubes()
            .iter()
            .map(|cube| host.create_cube(cube.position, cube.color))
            .collect();

        let strategy = match config.backend {
            UpdateBackend::Sequential => Strategy::Sequential,
            UpdateBackend::Parallel => {
                let gpu = GpuDevice::new()?;
                let animator = GpuAnimator::new(&gpu);
                Strategy::Parallel { gpu, animator }
            }
        };

        Ok(GridScene {
            grid,
            handles,
            host,
            sampler,
            color_speed: config.color_speed,
            repetitions: config.repetitions,
            strategy,
        })
    }

    /// Advance every cube's color and depth by one tick, then push the new
    /// state to the visual host.
    ///
    /// The sequential path cannot fail; the parallel path surfaces GPU
    /// errors and leaves the store untouched when the dispatch aborts.
    pub fn tick(&mut self) -> Result<(), SceneError> {
        match &mut self.strategy {
            Strategy::Sequential => {
                advance_cubes(
                    self.grid.cubes_mut(),
                    self.color_speed,
                    self.repetitions,
                    &mut *self.sampler,
                );
            }
            Strategy::Parallel { gpu, animator } => {
                animator.advance(gpu, self.grid.cubes_mut(), self.color_speed, self.repetitions)?;
            }
        }
        self.refresh_host();
        Ok(())
    }

    // Push the canonical store out to the mirrored handles.
    fn refresh_host(&mut self) {
        for (cube, &handle) in self.grid.cubes().iter().zip(&self.handles) {
            self.host.set_position(handle, cube.position);
            self.host.set_color(handle, cube.color);
        }
    }

    pub fn grid(&self) -> &CubeGrid {
        &self.grid
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Handles in flat index order, one per cell.
    pub fn handles(&self) -> &[CubeHandle] {
        &self.handles
    }
}
