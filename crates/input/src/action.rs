use glam::Vec3;
use treeline_common::Axes;

/// A held movement input. Directions are relative to the camera's current axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    /// Switches movement to the boost speed while held.
    Boost,
}

impl Motion {
    /// Unit direction this motion pushes along, or `None` for modifiers.
    pub fn direction(self, axes: &Axes) -> Option<Vec3> {
        match self {
            Self::Forward => Some(axes.forward),
            Self::Backward => Some(-axes.forward),
            Self::Left => Some(-axes.right),
            Self::Right => Some(axes.right),
            Self::Up => Some(axes.up),
            Self::Down => Some(-axes.up),
            Self::Boost => None,
        }
    }
}

/// A high-level action produced by whatever platform layer owns the window.
///
/// Consumers see actions, never raw key codes or window events.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A movement input went down.
    Press(Motion),
    /// A movement input went up.
    Release(Motion),
    /// Relative pointer motion in pixels.
    Look { dx: f32, dy: f32 },
    /// Grab or release the pointer for look control.
    ToggleMouseGrab,
    ToggleFullscreen,
    Quit,
}
