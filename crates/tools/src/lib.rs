//! Developer tooling: read-only inspection of a scene graph.
//!
//! # Invariants
//! - Tools never mutate the graph.

mod inspector;

pub use inspector::{NodeInfo, SceneInspector, SceneSummary};
