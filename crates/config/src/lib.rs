//! Settings: explicit configuration handed to whoever owns the frame loop.
//!
//! # Invariants
//! - Every key has a default; a partial file is always valid input.
//! - Validated settings always produce a finite projection.

mod settings;

pub use settings::{ConfigError, ControlSettings, GraphicsSettings, Settings, VideoSettings};
