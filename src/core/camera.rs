use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_Y_DEG, CAMERA_NEAR, CAMERA_SCROLL_ZOOM, CAMERA_Z, CAMERA_ZOOM_EASE,
};
use glam::{Mat4, Vec2, Vec3};

/// Viewport size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Width / height, treating degenerate sizes as 1×1.
    #[inline]
    pub fn aspect(&self) -> f32 {
        let w = if self.width.is_finite() { self.width.max(1.0) } else { 1.0 };
        let h = if self.height.is_finite() { self.height.max(1.0) } else { 1.0 };
        w / h
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PerspectiveCamera {
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
}

impl PerspectiveCamera {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            fov_y_deg: CAMERA_FOV_Y_DEG,
            aspect: viewport.aspect(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            position: Vec3::new(0.0, 0.0, CAMERA_Z),
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// Looks down -Z from `position`.
    pub fn view(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, Vec3::NEG_Z, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_deg.to_radians(), self.aspect, self.near, self.far)
    }

    /// Ease the camera out as the page scrolls: each dispatch covers a fixed
    /// fraction of the distance to `CAMERA_Z + progress * CAMERA_SCROLL_ZOOM`.
    pub fn ease_toward_scroll(&mut self, progress: f32) {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let target_z = CAMERA_Z + progress * CAMERA_SCROLL_ZOOM;
        self.position.z += (target_z - self.position.z) * CAMERA_ZOOM_EASE;
    }
}
