use glam::Vec3;
use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a node in a scene graph arena.
    ///
    /// Handles are generational: a handle to a removed node never aliases a
    /// node created later in the same slot.
    pub struct NodeId;
}

/// Canonical camera-space axes (right-handed, -Z forward).
pub mod axis {
    use glam::Vec3;

    pub const FORWARD: Vec3 = Vec3::NEG_Z;
    pub const UP: Vec3 = Vec3::Y;
    pub const RIGHT: Vec3 = Vec3::X;
}

/// An orthonormal viewing basis: where "forward", "up" and "right" point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Axes {
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,
}

impl Axes {
    pub const CANONICAL: Self = Self {
        forward: axis::FORWARD,
        up: axis::UP,
        right: axis::RIGHT,
    };
}

impl Default for Axes {
    fn default() -> Self {
        Self::CANONICAL
    }
}
