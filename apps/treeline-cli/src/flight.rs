use glam::{Mat4, Vec2, Vec3};
use treeline_common::SceneError;
use treeline_config::Settings;
use treeline_input::{Action, FlyControls};
use treeline_scene::{Camera, Perspective, SceneGraph};
use treeline_terrain::{CellOffset, GridFollower, grid_extent};

/// Owns everything one viewer frame touches and steps it in order.
pub struct Flight {
    graph: SceneGraph,
    camera: Camera,
    grid: GridFollower,
    controls: FlyControls,
    perspective: Perspective,
    grid_extent: u32,
    frames: u64,
}

impl Flight {
    pub fn new(settings: &Settings) -> Result<Self, SceneError> {
        let mut graph = SceneGraph::new();
        let mut camera = Camera::new(&mut graph);
        let grid = GridFollower::new(&mut graph);
        let c = &settings.controls;
        let controls = FlyControls::new(
            c.speed,
            c.boost_speed,
            Vec2::new(c.x_sensitivity, c.y_sensitivity),
        );

        camera.update(&mut graph)?;
        let camera_position = camera.position(&graph)?;
        grid.follow(&mut graph, camera_position)?;

        let grid_extent = grid_extent(settings.graphics.view_distance);
        tracing::debug!(grid_extent, "flight initialized");
        Ok(Self {
            graph,
            camera,
            grid,
            controls,
            perspective: settings.perspective(),
            grid_extent,
            frames: 0,
        })
    }

    /// Advance one frame of `dt` seconds after applying `actions`.
    ///
    /// The camera is resolved before the grid reads its position.
    pub fn step(
        &mut self,
        dt: f32,
        actions: impl IntoIterator<Item = Action>,
    ) -> Result<CellOffset, SceneError> {
        let _span = tracing::info_span!("frame", n = self.frames).entered();

        for action in actions {
            self.controls.apply(action);
        }

        let motion = self.controls.frame(&self.camera.axes(), dt);
        self.camera.rotate(motion.d_yaw, motion.d_pitch);
        self.camera.translate(&mut self.graph, motion.translation)?;
        self.camera.update(&mut self.graph)?;

        let position = self.camera.position(&self.graph)?;
        let shift = self.grid.follow(&mut self.graph, position)?;
        self.frames += 1;
        tracing::trace!(x = position.x, y = position.y, z = position.z, "camera moved");
        Ok(shift)
    }

    pub fn running(&self) -> bool {
        self.controls.running()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> &FlyControls {
        &self.controls
    }

    pub fn grid_extent(&self) -> u32 {
        self.grid_extent
    }

    pub fn camera_position(&self) -> Result<Vec3, SceneError> {
        self.camera.position(&self.graph)
    }

    pub fn grid_position(&self) -> Result<Vec3, SceneError> {
        self.grid.position(&self.graph)
    }

    /// Projection times view, as uploaded to the renderer.
    pub fn view_projection(&self) -> Mat4 {
        self.perspective.matrix() * self.camera.view_matrix()
    }
}
