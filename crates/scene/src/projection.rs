use glam::Mat4;

/// Perspective projection parameters with an OpenGL-style clip range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perspective {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Perspective {
    fn default() -> Self {
        Self {
            fov_y: 1.0,
            aspect: 640.0 / 480.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

impl Perspective {
    pub fn new(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov_y,
            aspect,
            near,
            far,
        }
    }

    /// Adopt the aspect ratio of a resized viewport.
    ///
    /// A zero-height viewport (minimized window) keeps the previous aspect.
    pub fn resize(&mut self, width: u32, height: u32) {
        if height == 0 {
            tracing::debug!(width, height, "ignoring degenerate viewport");
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y, self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec3, Vec4};

    #[test]
    fn resize_updates_aspect() {
        let mut p = Perspective::default();
        p.resize(1920, 1080);
        assert!((p.aspect - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_keeps_aspect() {
        let mut p = Perspective::default();
        let before = p.aspect;
        p.resize(800, 0);
        assert_eq!(p.aspect, before);
    }

    #[test]
    fn near_plane_maps_to_gl_clip_minus_one() {
        let p = Perspective::new(1.0, 1.0, 0.5, 100.0);
        let clip = p.matrix() * Vec4::new(0.0, 0.0, -0.5, 1.0);
        let ndc = Vec3::new(clip.x, clip.y, clip.z) / clip.w;
        assert!((ndc.z + 1.0).abs() < 1e-5);
    }

    #[test]
    fn default_matrix_is_finite() {
        assert!(Perspective::default().matrix().is_finite());
    }
}
