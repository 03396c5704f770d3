use crate::core::color::hex_to_linear;
use glam::Vec3;

#[derive(Clone, Copy, Debug)]
pub struct AmbientLight {
    pub color: u32,
    pub intensity: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    pub color: u32,
    pub intensity: f32,
    pub position: Vec3,
}

#[derive(Clone, Copy, Debug)]
pub struct PointLight {
    pub color: u32,
    pub intensity: f32,
    /// Distance at which the contribution reaches zero.
    pub range: f32,
    pub position: Vec3,
}

/// Fixed light rig: one ambient, one directional and two point lights.
#[derive(Clone, Copy, Debug)]
pub struct LightingRig {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub points: [PointLight; 2],
}

impl Default for LightingRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: 0x404040,
                intensity: 1.5,
            },
            directional: DirectionalLight {
                color: 0xffffff,
                intensity: 1.5,
                position: Vec3::new(1.0, 1.0, 1.0),
            },
            points: [
                PointLight {
                    color: 0xff4e42,
                    intensity: 1.0,
                    range: 10.0,
                    position: Vec3::new(2.0, 2.0, 2.0),
                },
                PointLight {
                    color: 0xc2362f,
                    intensity: 1.0,
                    range: 10.0,
                    position: Vec3::new(-2.0, -2.0, -2.0),
                },
            ],
        }
    }
}

/// Std140-friendly packing of the rig, matching `Lights` in the WGSL shaders.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsPacked {
    pub ambient: [f32; 4],
    pub dir_direction: [f32; 4],
    pub dir_color: [f32; 4],
    /// xyz = position, w = range
    pub point_position: [[f32; 4]; 2],
    pub point_color: [[f32; 4]; 2],
}

fn scaled(hex: u32, intensity: f32) -> [f32; 4] {
    let [r, g, b] = hex_to_linear(hex);
    [r * intensity, g * intensity, b * intensity, 1.0]
}

impl LightingRig {
    pub fn packed(&self) -> LightsPacked {
        let d = self.directional.position.normalize_or_zero();
        let mut out = LightsPacked {
            ambient: scaled(self.ambient.color, self.ambient.intensity),
            dir_direction: [d.x, d.y, d.z, 0.0],
            dir_color: scaled(self.directional.color, self.directional.intensity),
            ..Default::default()
        };
        for (i, p) in self.points.iter().enumerate() {
            out.point_position[i] = [p.position.x, p.position.y, p.position.z, p.range];
            out.point_color[i] = scaled(p.color, p.intensity);
        }
        out
    }
}
