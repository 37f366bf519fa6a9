//! Shared types for the treeline workspace: node handles, canonical axes and
//! the scene error taxonomy.

mod error;
mod types;

pub use error::SceneError;
pub use types::{Axes, NodeId, axis};
