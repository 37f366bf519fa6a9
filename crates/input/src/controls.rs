use std::collections::HashSet;

use glam::{Vec2, Vec3};
use treeline_common::Axes;

use crate::action::{Action, Motion};

/// Camera motion for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameMotion {
    /// Translation to add to the camera node, in world units.
    pub translation: Vec3,
    pub d_yaw: f32,
    pub d_pitch: f32,
}

/// Accumulated input state for a free-flying camera.
///
/// Actions are applied as they arrive; [`FlyControls::frame`] is called once
/// per frame to turn the held motions and the pointer travel since the last
/// frame into a [`FrameMotion`].
#[derive(Debug, Clone)]
pub struct FlyControls {
    /// Units per second.
    pub speed: f32,
    /// Units per second while [`Motion::Boost`] is held.
    pub boost_speed: f32,
    /// Radians per pixel of pointer travel, x then y.
    pub sensitivity: Vec2,
    held: HashSet<Motion>,
    look: Vec2,
    grabbed: bool,
    fullscreen: bool,
    running: bool,
}

impl Default for FlyControls {
    fn default() -> Self {
        Self::new(10.0, 20.0, Vec2::splat(0.01))
    }
}

impl FlyControls {
    pub fn new(speed: f32, boost_speed: f32, sensitivity: Vec2) -> Self {
        Self {
            speed,
            boost_speed,
            sensitivity,
            held: HashSet::new(),
            look: Vec2::ZERO,
            grabbed: false,
            fullscreen: false,
            running: true,
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Press(m) => {
                self.held.insert(m);
            }
            Action::Release(m) => {
                self.held.remove(&m);
            }
            Action::Look { dx, dy } => {
                if self.grabbed {
                    self.look += Vec2::new(dx, dy);
                }
            }
            Action::ToggleMouseGrab => {
                self.grabbed = !self.grabbed;
                tracing::debug!(grabbed = self.grabbed, "pointer grab toggled");
            }
            Action::ToggleFullscreen => {
                self.fullscreen = !self.fullscreen;
                tracing::debug!(fullscreen = self.fullscreen, "fullscreen toggled");
            }
            Action::Quit => self.running = false,
        }
    }

    pub fn is_held(&self, motion: Motion) -> bool {
        self.held.contains(&motion)
    }

    pub fn grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Current speed, honoring boost.
    pub fn current_speed(&self) -> f32 {
        if self.is_held(Motion::Boost) {
            self.boost_speed
        } else {
            self.speed
        }
    }

    /// Produce this frame's motion and reset the pointer accumulator.
    ///
    /// `axes` should be the camera's axes from the previous update; movement is
    /// along where the camera was looking when the keys were read.
    pub fn frame(&mut self, axes: &Axes, dt: f32) -> FrameMotion {
        let step = dt * self.current_speed();
        let translation = self
            .held
            .iter()
            .filter_map(|m| m.direction(axes))
            .fold(Vec3::ZERO, |acc, dir| acc + dir * step);

        // Pointer right turns right and pointer down looks down.
        let look = std::mem::take(&mut self.look);
        FrameMotion {
            translation,
            d_yaw: -self.sensitivity.x * look.x,
            d_pitch: -self.sensitivity.y * look.y,
        }
    }
}
