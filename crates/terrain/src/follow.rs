use glam::Vec3;
use treeline_common::{NodeId, SceneError};
use treeline_scene::SceneGraph;

/// A whole-cell step on the XZ plane (Y is ignored).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CellOffset {
    pub x: i32,
    pub z: i32,
}

impl CellOffset {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0 && self.z == 0
    }
}

/// Side length, in cells, of a square grid that covers `view_distance` in
/// every direction.
pub fn grid_extent(view_distance: f32) -> u32 {
    2 * view_distance.max(0.0).ceil() as u32
}

/// Keeps a terrain grid node underneath the camera.
///
/// The grid node should be a root; its local translation is treated as its
/// world position.
#[derive(Debug, Clone)]
pub struct GridFollower {
    node: NodeId,
    cell_size: f32,
}

impl GridFollower {
    /// Create a fresh grid node in `graph` with unit cells.
    pub fn new(graph: &mut SceneGraph) -> Self {
        Self::with_cell_size(graph, 1.0)
    }

    pub fn with_cell_size(graph: &mut SceneGraph, cell_size: f32) -> Self {
        assert!(cell_size > 0.0, "cell_size must be positive");
        Self {
            node: graph.create_node(),
            cell_size,
        }
    }

    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Whole-cell step that brings the grid's origin cell under `target`.
    pub fn offset_to(&self, grid_position: Vec3, target: Vec3) -> CellOffset {
        let dx = (target.x - grid_position.x) / self.cell_size;
        let dz = (target.z - grid_position.z) / self.cell_size;
        CellOffset::new(whole_cells(dx), whole_cells(dz))
    }

    /// Shift the grid toward `camera_position` and resolve its node.
    ///
    /// Call after the camera update so `camera_position` is this frame's.
    pub fn follow(
        &self,
        graph: &mut SceneGraph,
        camera_position: Vec3,
    ) -> Result<CellOffset, SceneError> {
        let node = graph
            .node_mut(self.node)
            .ok_or(SceneError::NodeNotFound(self.node))?;
        let offset = self.offset_to(node.world_position(), camera_position);
        if !offset.is_zero() {
            node.local_translation.x += offset.x as f32 * self.cell_size;
            node.local_translation.z += offset.z as f32 * self.cell_size;
            tracing::trace!(dx = offset.x, dz = offset.z, "grid recentred");
        }
        graph.update(self.node)?;
        Ok(offset)
    }

    /// Resolved world position of the grid node.
    pub fn position(&self, graph: &SceneGraph) -> Result<Vec3, SceneError> {
        graph
            .node(self.node)
            .map(|n| n.world_position())
            .ok_or(SceneError::NodeNotFound(self.node))
    }
}

/// Floor to whole cells. Offsets past the `i32` range saturate at its bounds,
/// so the grid catches up over several frames.
fn whole_cells(cells: f32) -> i32 {
    let cells = cells.floor();
    if !(cells >= i32::MIN as f32 && cells < i32::MAX as f32) {
        tracing::warn!(cells, "grid offset outside i32 range, saturating");
    }
    cells as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extent_covers_view_distance() {
        assert_eq!(grid_extent(100.0), 200);
        assert_eq!(grid_extent(10.5), 22);
        assert_eq!(grid_extent(0.0), 0);
    }

    #[test]
    fn follow_snaps_down_to_whole_cells() {
        let mut graph = SceneGraph::new();
        let grid = GridFollower::new(&mut graph);

        let offset = grid.follow(&mut graph, Vec3::new(3.7, 5.0, -2.2)).unwrap();
        assert_eq!(offset, CellOffset::new(3, -3));
        assert_eq!(grid.position(&graph).unwrap(), Vec3::new(3.0, 0.0, -3.0));
    }

    #[test]
    fn small_moves_inside_a_cell_do_not_shift() {
        let mut graph = SceneGraph::new();
        let grid = GridFollower::new(&mut graph);
        grid.follow(&mut graph, Vec3::new(3.7, 0.0, 0.5)).unwrap();

        let offset = grid.follow(&mut graph, Vec3::new(3.1, 0.0, 0.9)).unwrap();
        assert!(offset.is_zero());
        assert_eq!(grid.position(&graph).unwrap(), Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn crossing_back_over_a_boundary_steps_back() {
        let mut graph = SceneGraph::new();
        let grid = GridFollower::new(&mut graph);
        grid.follow(&mut graph, Vec3::new(3.5, 0.0, 0.0)).unwrap();

        let offset = grid.follow(&mut graph, Vec3::new(2.9, 0.0, 0.0)).unwrap();
        assert_eq!(offset, CellOffset::new(-1, 0));
        assert_eq!(grid.position(&graph).unwrap(), Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn larger_cells_step_in_cell_units() {
        let mut graph = SceneGraph::new();
        let grid = GridFollower::with_cell_size(&mut graph, 4.0);
        let offset = grid.follow(&mut graph, Vec3::new(9.0, 0.0, -1.0)).unwrap();
        assert_eq!(offset, CellOffset::new(2, -1));
        assert_eq!(grid.position(&graph).unwrap(), Vec3::new(8.0, 0.0, -4.0));
    }

    #[test]
    fn world_matrix_tracks_grid_translation() {
        let mut graph = SceneGraph::new();
        let grid = GridFollower::new(&mut graph);
        grid.follow(&mut graph, Vec3::new(-5.5, 0.0, 7.25)).unwrap();

        let m = graph.node(grid.node()).unwrap().world_matrix();
        assert_eq!(m.transform_point3(Vec3::ZERO), Vec3::new(-6.0, 0.0, 7.0));
    }

    #[test]
    fn huge_offsets_saturate() {
        let mut graph = SceneGraph::new();
        let grid = GridFollower::new(&mut graph);
        let offset = grid.offset_to(Vec3::ZERO, Vec3::new(1.0e12, 0.0, -1.0e12));
        assert_eq!(offset, CellOffset::new(i32::MAX, i32::MIN));

        assert_eq!(whole_cells(-0.5), -1);
        assert_eq!(whole_cells(f32::NAN), 0);
    }

    #[test]
    fn removed_grid_node_is_reported() {
        let mut graph = SceneGraph::new();
        let grid = GridFollower::new(&mut graph);
        graph.remove_node(grid.node());
        assert!(grid.follow(&mut graph, Vec3::ONE).is_err());
    }
}
