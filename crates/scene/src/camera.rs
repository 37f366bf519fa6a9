use glam::{Mat4, Quat, Vec3};
use treeline_common::{Axes, NodeId, SceneError, axis};

use crate::graph::SceneGraph;

/// Fly camera riding on a node of a [`SceneGraph`].
///
/// The node's rotation is not edited directly. Instead `yaw`, `pitch` and
/// `roll` accumulate input and [`Camera::update`] rebuilds the rotation from
/// them every frame, then derives the viewing axes and the view matrix from the
/// node's resolved world state.
#[derive(Debug, Clone)]
pub struct Camera {
    node: NodeId,
    /// Rotation about world up, in radians. Never wrapped.
    pub yaw: f32,
    /// Rotation about world right, in radians. Never clamped.
    pub pitch: f32,
    /// Rotation about the current viewing direction, in radians.
    pub roll: f32,
    axes: Axes,
    view_matrix: Mat4,
}

impl Camera {
    /// Create a camera with a fresh root node in `graph`, looking down -Z.
    pub fn new(graph: &mut SceneGraph) -> Self {
        let node = graph.create_node();
        let axes = Axes::CANONICAL;
        let position = graph.node(node).map_or(Vec3::ZERO, |n| n.world_position());
        Self {
            node,
            yaw: 0.0,
            pitch: 0.0,
            roll: 0.0,
            axes,
            view_matrix: look_at(position, &axes),
        }
    }

    /// Handle of the node this camera drives.
    #[inline]
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Viewing direction, as of the last update.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.axes.forward
    }

    #[inline]
    pub fn up(&self) -> Vec3 {
        self.axes.up
    }

    #[inline]
    pub fn right(&self) -> Vec3 {
        self.axes.right
    }

    #[inline]
    pub fn axes(&self) -> Axes {
        self.axes
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// Resolved world position of the camera node.
    pub fn position(&self, graph: &SceneGraph) -> Result<Vec3, SceneError> {
        graph
            .node(self.node)
            .map(|n| n.world_position())
            .ok_or(SceneError::NodeNotFound(self.node))
    }

    /// Add to yaw and pitch.
    pub fn rotate(&mut self, d_yaw: f32, d_pitch: f32) {
        self.yaw += d_yaw;
        self.pitch += d_pitch;
    }

    /// Move the camera node by `delta` in its parent's space.
    pub fn translate(&self, graph: &mut SceneGraph, delta: Vec3) -> Result<(), SceneError> {
        let node = graph
            .node_mut(self.node)
            .ok_or(SceneError::NodeNotFound(self.node))?;
        node.local_translation += delta;
        Ok(())
    }

    /// Rebuild the rotation from yaw/pitch/roll, resolve the node's subtree
    /// and refresh the derived axes and view matrix.
    pub fn update(&mut self, graph: &mut SceneGraph) -> Result<(), SceneError> {
        let yaw = Quat::from_axis_angle(axis::UP, self.yaw);
        let pitch = Quat::from_axis_angle(axis::RIGHT, self.pitch);
        // Roll turns about last frame's view direction, not canonical forward.
        let roll = Quat::from_axis_angle(self.axes.forward, self.roll);

        let node = graph
            .node_mut(self.node)
            .ok_or(SceneError::NodeNotFound(self.node))?;
        node.local_rotation = yaw * pitch * roll;
        graph.update(self.node)?;

        let node = graph
            .node(self.node)
            .ok_or(SceneError::NodeNotFound(self.node))?;
        let orientation = node.world_orientation();
        let position = node.world_position();

        let forward = orientation * axis::FORWARD;
        let up = orientation * axis::UP;
        self.axes = Axes {
            forward,
            up,
            right: forward.cross(up),
        };
        self.view_matrix = look_at(position, &self.axes);
        Ok(())
    }
}

fn look_at(eye: Vec3, axes: &Axes) -> Mat4 {
    Mat4::look_at_rh(eye, eye + axes.forward, axes.up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, TAU};

    const EPSILON: f32 = 1e-5;

    fn assert_vec3_near(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, EPSILON),
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn new_camera_uses_canonical_axes() {
        let mut graph = SceneGraph::new();
        let cam = Camera::new(&mut graph);

        assert_eq!(cam.direction(), Vec3::NEG_Z);
        assert_eq!(cam.up(), Vec3::Y);
        assert_eq!(cam.right(), Vec3::X);
        assert_eq!(cam.yaw, 0.0);
        assert_eq!(
            cam.view_matrix(),
            Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y)
        );
        assert!(graph.contains(cam.node()));
    }

    #[test]
    fn zero_angles_keep_canonical_axes() {
        let mut graph = SceneGraph::new();
        let mut cam = Camera::new(&mut graph);
        cam.update(&mut graph).unwrap();

        assert_vec3_near(cam.direction(), Vec3::NEG_Z);
        assert_vec3_near(cam.up(), Vec3::Y);
        assert_vec3_near(cam.right(), Vec3::X);
        let expected = Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y);
        assert!(cam.view_matrix().abs_diff_eq(expected, EPSILON));
    }

    #[test]
    fn quarter_yaw_turns_right_onto_old_forward() {
        let mut graph = SceneGraph::new();
        let mut cam = Camera::new(&mut graph);
        cam.yaw = FRAC_PI_2;
        cam.update(&mut graph).unwrap();

        assert_vec3_near(cam.direction(), Vec3::NEG_X);
        assert_vec3_near(cam.up(), Vec3::Y);
        assert_vec3_near(cam.right(), Vec3::NEG_Z);
    }

    #[test]
    fn full_yaw_revolution_restores_direction() {
        let mut graph = SceneGraph::new();
        let mut cam = Camera::new(&mut graph);
        cam.yaw = TAU;
        cam.update(&mut graph).unwrap();
        assert_vec3_near(cam.direction(), Vec3::NEG_Z);
    }

    #[test]
    fn positive_pitch_looks_up() {
        let mut graph = SceneGraph::new();
        let mut cam = Camera::new(&mut graph);
        cam.pitch = FRAC_PI_2;
        cam.update(&mut graph).unwrap();

        assert_vec3_near(cam.direction(), Vec3::Y);
        assert_vec3_near(cam.up(), Vec3::Z);
    }

    #[test]
    fn roll_turns_about_view_direction() {
        let mut graph = SceneGraph::new();
        let mut cam = Camera::new(&mut graph);
        cam.roll = FRAC_PI_2;
        cam.update(&mut graph).unwrap();

        assert_vec3_near(cam.direction(), Vec3::NEG_Z);
        // Counter-clockwise about -Z carries +Y onto +X.
        assert_vec3_near(cam.up(), Vec3::X);
    }

    #[test]
    fn roll_follows_previous_direction_after_yaw() {
        let mut graph = SceneGraph::new();
        let mut cam = Camera::new(&mut graph);
        cam.yaw = FRAC_PI_2;
        cam.update(&mut graph).unwrap();
        assert_vec3_near(cam.direction(), Vec3::NEG_X);

        // Rolling about -X, not canonical -Z, tips the view straight down.
        cam.roll = FRAC_PI_2;
        cam.update(&mut graph).unwrap();
        assert_vec3_near(cam.direction(), Vec3::NEG_Y);
        assert_vec3_near(cam.up(), Vec3::NEG_X);
    }

    #[test]
    fn view_matrix_follows_translation() {
        let mut graph = SceneGraph::new();
        let mut cam = Camera::new(&mut graph);
        cam.translate(&mut graph, Vec3::new(0.0, 2.0, 5.0)).unwrap();
        cam.update(&mut graph).unwrap();

        let eye = cam.position(&graph).unwrap();
        assert_vec3_near(eye, Vec3::new(0.0, 2.0, 5.0));
        // The eye maps to the view-space origin.
        assert_vec3_near(cam.view_matrix().transform_point3(eye), Vec3::ZERO);
        // A point straight ahead lands on -Z in view space.
        let ahead = cam.view_matrix().transform_point3(eye + cam.direction() * 3.0);
        assert_vec3_near(ahead, Vec3::new(0.0, 0.0, -3.0));
    }

    #[test]
    fn rotate_accumulates_without_wrapping() {
        let mut graph = SceneGraph::new();
        let mut cam = Camera::new(&mut graph);
        for _ in 0..10 {
            cam.rotate(1.0, -0.5);
        }
        assert!((cam.yaw - 10.0).abs() < EPSILON);
        assert!((cam.pitch + 5.0).abs() < EPSILON);
    }

    #[test]
    fn removed_node_is_reported() {
        let mut graph = SceneGraph::new();
        let mut cam = Camera::new(&mut graph);
        graph.remove_node(cam.node());
        assert_eq!(
            cam.update(&mut graph),
            Err(SceneError::NodeNotFound(cam.node()))
        );
        assert!(cam.position(&graph).is_err());
    }
}
