use crate::constants::{CENTERPIECE_COLOR, ROTATION_RATE_Y, ROTATION_RATE_Z, SCROLL_ROTATION_GAIN};
use crate::core::color::hex_to_linear;
use glam::{EulerRot, Mat4};

/// Per-object uniform block shared by the wireframe and glow shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    /// x = time, y = distortion, z = scroll amount, w unused
    pub params: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WireframeUniforms {
    pub time: f32,
    pub color: [f32; 3],
    pub distortion: f32,
    pub scroll_amount: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlowUniforms {
    pub time: f32,
    pub color: [f32; 3],
}

/// Rotation angles in radians. `x` stays at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, 0.0, self.y, self.z)
    }
}

/// Animation state of the wireframe icosahedron and its glow shell.
#[derive(Clone, Debug)]
pub struct CenterpieceState {
    rotation: Rotation,
    glow_rotation: Rotation,
    rotation_speed: f32,
    wireframe: WireframeUniforms,
    glow: GlowUniforms,
}

impl Default for CenterpieceState {
    fn default() -> Self {
        Self::new()
    }
}

impl CenterpieceState {
    pub fn new() -> Self {
        let color = hex_to_linear(CENTERPIECE_COLOR);
        Self {
            rotation: Rotation::default(),
            glow_rotation: Rotation::default(),
            rotation_speed: 1.0,
            wireframe: WireframeUniforms {
                time: 0.0,
                color,
                distortion: 1.0,
                scroll_amount: 0.0,
            },
            glow: GlowUniforms { time: 0.0, color },
        }
    }

    pub fn update(&mut self, elapsed: f32, scroll_amount: f32) {
        self.wireframe.time = elapsed;
        self.wireframe.scroll_amount = scroll_amount;

        let scroll_factor = 1.0 + scroll_amount * SCROLL_ROTATION_GAIN;
        self.rotation.y += ROTATION_RATE_Y * self.rotation_speed * scroll_factor;
        self.rotation.z += ROTATION_RATE_Z * self.rotation_speed * scroll_factor;

        self.glow.time = elapsed;
        self.glow_rotation = self.rotation;
    }

    /// Takes effect on the next update.
    pub fn set_rotation_speed(&mut self, speed: f32) {
        self.rotation_speed = speed;
    }

    pub fn set_distortion(&mut self, distortion: f32) {
        self.wireframe.distortion = distortion;
    }

    #[inline]
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    #[inline]
    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    #[inline]
    pub fn glow_rotation(&self) -> Rotation {
        self.glow_rotation
    }

    #[inline]
    pub fn wireframe(&self) -> &WireframeUniforms {
        &self.wireframe
    }

    #[inline]
    pub fn glow(&self) -> &GlowUniforms {
        &self.glow
    }

    pub fn wireframe_packed(&self) -> MeshUniforms {
        let w = &self.wireframe;
        MeshUniforms {
            model: self.rotation.matrix().to_cols_array_2d(),
            color: [w.color[0], w.color[1], w.color[2], 1.0],
            params: [w.time, w.distortion, w.scroll_amount, 0.0],
        }
    }

    pub fn glow_packed(&self) -> MeshUniforms {
        let g = &self.glow;
        MeshUniforms {
            model: self.glow_rotation.matrix().to_cols_array_2d(),
            color: [g.color[0], g.color[1], g.color[2], 1.0],
            params: [g.time, 0.0, 0.0, 0.0],
        }
    }
}
