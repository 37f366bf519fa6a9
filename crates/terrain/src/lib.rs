//! Terrain grid placement. The grid mesh itself is produced elsewhere; this
//! crate only decides where its node sits each frame.
//!
//! # Invariants
//! - The grid only ever moves by whole cells, so height samples stay aligned.
//! - The grid is positioned from the camera's resolved world position, so the
//!   camera must be updated first.

mod follow;

pub use follow::{CellOffset, GridFollower, grid_extent};
