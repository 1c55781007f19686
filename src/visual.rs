// visual.rs — the narrow seam to whatever draws the cubes.
//
// The scene never knows what a "cube on screen" is. It asks the host to
// create one per grid cell at startup and pushes position/color updates
// through opaque handles after every tick. Engine-side concerns (meshes,
// materials, render pipelines) live entirely behind this trait.

/// Opaque identifier for one visual cube, minted by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CubeHandle(pub u32);

/// What the scene needs from a renderer — and nothing more.
pub trait VisualHost {
    /// Create a unit cube at `position` with `color`, returning its handle.
    fn create_cube(&mut self, position: [f32; 3], color: [f32; 4]) -> CubeHandle;

    /// Move an existing cube.
    fn set_position(&mut self, handle: CubeHandle, position: [f32; 3]);

    /// Recolor an existing cube.
    fn set_color(&mut self, handle: CubeHandle, color: [f32; 4]);
}

/// Headless host: counts creations, discards updates. Used by benches and
/// by anything that only cares about the simulation state.
#[derive(Default)]
pub struct NullHost {
    created: u32,
}

impl NullHost {
    pub fn new() -> Self {
        NullHost::default()
    }

    /// Number of cubes created so far.
    pub fn created(&self) -> u32 {
        self.created
    }
}

impl VisualHost for NullHost {
    fn create_cube(&mut self, _position: [f32; 3], _color: [f32; 4]) -> CubeHandle {
        let handle = CubeHandle(self.created);
        self.created += 1;
        handle
    }

    fn set_position(&mut self, _handle: CubeHandle, _position: [f32; 3]) {}

    fn set_color(&mut self, _handle: CubeHandle, _color: [f32; 4]) {}
}

/// Host that remembers the last position and color pushed to every handle.
///
/// This is the observable half of the lockstep-mirror invariant: after a
/// tick, what the host holds must equal what the grid holds. The demos
/// also read it to rasterize the wall.
#[derive(Default)]
pub struct RecordingHost {
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
}

impl RecordingHost {
    pub fn new() -> Self {
        RecordingHost::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position(&self, handle: CubeHandle) -> [f32; 3] {
        self.positions[handle.0 as usize]
    }

    pub fn color(&self, handle: CubeHandle) -> [f32; 4] {
        self.colors[handle.0 as usize]
    }
}

impl VisualHost for RecordingHost {
    fn create_cube(&mut self, position: [f32; 3], color: [f32; 4]) -> CubeHandle {
        let handle = CubeHandle(self.positions.len() as u32);
        self.positions.push(position);
        self.colors.push(color);
        handle
    }

    fn set_position(&mut self, handle: CubeHandle, position: [f32; 3]) {
        self.positions[handle.0 as usize] = position;
    }

    fn set_color(&mut self, handle: CubeHandle, color: [f32; 4]) {
        self.colors[handle.0 as usize] = color;
    }
}
