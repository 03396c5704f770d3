use crate::core::camera::{PerspectiveCamera, Viewport};
use crate::core::centerpiece::CenterpieceState;
use crate::core::lights::{LightingRig, LightsPacked};
use crate::core::particles::ParticleField;
use crate::core::profile::CapabilityProfile;
use rand::Rng;

/// Frame-invariant uniform block (`Scene` in the WGSL shaders).
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    /// Framebuffer size in physical pixels.
    pub resolution: [f32; 2],
    pub _pad: [f32; 2],
    pub lights: LightsPacked,
}

/// Everything the frame callback mutates and the renderer reads.
/// One instance for the lifetime of the page.
pub struct Scene {
    pub camera: PerspectiveCamera,
    pub lights: LightingRig,
    pub centerpiece: CenterpieceState,
    pub particles: ParticleField,
}

impl Scene {
    pub fn new<R: Rng + ?Sized>(profile: CapabilityProfile, viewport: Viewport, rng: &mut R) -> Self {
        Self {
            camera: PerspectiveCamera::new(viewport),
            lights: LightingRig::default(),
            centerpiece: CenterpieceState::new(),
            particles: ParticleField::new(profile, viewport, rng),
        }
    }

    pub fn uniforms(&self, framebuffer_width: u32, framebuffer_height: u32) -> SceneUniforms {
        let p = self.camera.position;
        SceneUniforms {
            view: self.camera.view().to_cols_array_2d(),
            proj: self.camera.projection().to_cols_array_2d(),
            camera_pos: [p.x, p.y, p.z, 1.0],
            resolution: [
                framebuffer_width.max(1) as f32,
                framebuffer_height.max(1) as f32,
            ],
            _pad: [0.0; 2],
            lights: self.lights.packed(),
        }
    }
}
