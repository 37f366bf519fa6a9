//! Input mapping: platform events become [`Action`]s, and [`FlyControls`]
//! turns the actions of one frame into camera motion.
//!
//! # Invariants
//! - Nothing here touches the scene graph; output is plain deltas.
//! - Pointer look is ignored unless the pointer is grabbed.

pub mod action;
pub mod controls;

pub use action::{Action, Motion};
pub use controls::{FlyControls, FrameMotion};
