//! Scene: a forest of transform nodes resolved into world space, and the fly
//! camera that rides on one of them.
//!
//! # Invariants
//! - World state is a cache of local state as of the last update pass.
//! - A node has at most one parent and can never become its own ancestor.
//! - Updates run parent-before-children over the whole subtree.

pub mod camera;
pub mod graph;
pub mod projection;

pub use camera::Camera;
pub use graph::{SceneGraph, TransformNode};
pub use projection::Perspective;
pub use treeline_common::{Axes, NodeId, SceneError};
