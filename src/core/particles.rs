use crate::constants::*;
use crate::core::camera::Viewport;
use crate::core::color::hex_to_linear;
use crate::core::profile::CapabilityProfile;
use glam::{Vec2, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

// ===================== GPU point cloud =====================

/// One instance of the point cloud. Immutable after generation.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Uniformly scattered points in `[-HALF_EXTENT, HALF_EXTENT]³`, each coloured
/// from the fixed palette.
pub fn generate_point_cloud<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<PointVertex> {
    let palette = POINT_PALETTE.map(hex_to_linear);
    let h = POINT_CLOUD_HALF_EXTENT;
    (0..count)
        .map(|_| PointVertex {
            position: [
                rng.gen_range(-h..h),
                rng.gen_range(-h..h),
                rng.gen_range(-h..h),
            ],
            color: palette[rng.gen_range(0..palette.len())],
        })
        .collect()
}

/// Host mirror for tests of the vertex-stage drift in `points.wgsl`.
/// The runtime never calls it.
#[inline]
pub fn drifted_position(p: Vec3, time: f32) -> Vec3 {
    Vec3::new(
        p.x + (time + p.y * 0.1).sin() * 0.05,
        p.y + (time + p.z * 0.1).cos() * 0.05,
        p.z,
    )
}

/// Host mirror for tests of the point size law in `points.wgsl`: diameter
/// in pixels for a view-space depth (negative in front of the camera).
#[inline]
pub fn point_size_px(view_z: f32) -> f32 {
    300.0 / -view_z
}

/// Host mirror for tests of the sprite falloff in `points.wgsl`: `None`
/// outside the disc, otherwise alpha.
#[inline]
pub fn point_alpha(dist_from_center: f32) -> Option<f32> {
    if dist_from_center > 0.5 {
        return None;
    }
    let a = 1.0 - dist_from_center * 2.0;
    Some(a * a * 0.6)
}

#[derive(Clone, Debug)]
pub struct PointCloudState {
    points: Vec<PointVertex>,
    time: f32,
}

impl PointCloudState {
    pub fn new<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        Self {
            points: generate_point_cloud(count, rng),
            time: 0.0,
        }
    }

    pub fn update(&mut self, elapsed: f32) {
        self.time = elapsed;
    }

    #[inline]
    pub fn points(&self) -> &[PointVertex] {
        &self.points
    }

    #[inline]
    pub fn time(&self) -> f32 {
        self.time
    }
}

// ===================== Screen-space overlay =====================

/// A particle orbiting the viewport centre. `angle`, `radius`, `speed`,
/// `phase`, `base_opacity` and `tint` are fixed at creation; only the
/// derived position and opacity change.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenParticle {
    angle: f32,
    radius: f32,
    speed: f32,
    phase: f32,
    base_opacity: f32,
    tint: [u8; 3],
    pub x: f32,
    pub y: f32,
    pub opacity: f32,
}

impl ScreenParticle {
    pub fn sample<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport) -> Self {
        let center = viewport.center();
        let angle = rng.gen_range(0.0..TAU);
        // sqrt gives area-uniform density inside the disc
        let disc = rng.gen::<f32>().sqrt() * center.x.min(center.y) * OVERLAY_RADIUS_SCALE;
        let radius = disc.max(OVERLAY_MIN_RADIUS);
        let speed = rng.gen_range(OVERLAY_SPEED_MIN..OVERLAY_SPEED_MAX);
        let phase = rng.gen_range(0.0..TAU);
        let c = OVERLAY_TINT_MIN + rng.gen_range(0..OVERLAY_TINT_SPAN);
        let base_opacity = rng.gen_range(OVERLAY_OPACITY_MIN..OVERLAY_OPACITY_MAX);

        let mut p = Self {
            angle,
            radius,
            speed,
            phase,
            base_opacity,
            tint: [255, c, c - OVERLAY_BLUE_OFFSET],
            x: 0.0,
            y: 0.0,
            opacity: base_opacity,
        };
        p.place(center);
        p
    }

    /// Rest position from the stored angle and radius.
    pub fn place(&mut self, center: Vec2) {
        self.x = center.x + self.angle.cos() * self.radius;
        self.y = center.y + self.angle.sin() * self.radius;
    }

    pub fn advance(&mut self, center: Vec2, elapsed: f32) {
        let angle = self.angle + self.speed * elapsed;
        let r = self.radius + (elapsed + self.phase).sin() * OVERLAY_NOISE_PX;
        self.x = center.x + angle.cos() * r;
        self.y = center.y + angle.sin() * r;
        let pulse = (elapsed * 2.0 + self.phase).sin() * OVERLAY_PULSE;
        self.opacity = (self.base_opacity + pulse).clamp(0.1, 1.0);
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }
    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }
    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase
    }
    #[inline]
    pub fn base_opacity(&self) -> f32 {
        self.base_opacity
    }
    #[inline]
    pub fn tint(&self) -> [u8; 3] {
        self.tint
    }
}

#[derive(Clone, Debug)]
pub struct ScreenOverlay {
    particles: Vec<ScreenParticle>,
    viewport: Viewport,
}

impl ScreenOverlay {
    pub fn new<R: Rng + ?Sized>(count: usize, viewport: Viewport, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| ScreenParticle::sample(rng, viewport))
            .collect();
        Self {
            particles,
            viewport,
        }
    }

    pub fn update(&mut self, elapsed: f32) {
        let center = self.viewport.center();
        for p in &mut self.particles {
            p.advance(center, elapsed);
        }
    }

    /// Re-centre on a new viewport. Stored angles and radii are untouched.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        let center = viewport.center();
        for p in &mut self.particles {
            p.place(center);
        }
    }

    #[inline]
    pub fn particles(&self) -> &[ScreenParticle] {
        &self.particles
    }

    #[inline]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }
}

// ===================== Combined field =====================

/// GPU point cloud plus screen overlay. The two halves only share the
/// profile-derived counts.
#[derive(Clone, Debug)]
pub struct ParticleField {
    points: PointCloudState,
    overlay: ScreenOverlay,
}

impl ParticleField {
    pub fn new<R: Rng + ?Sized>(profile: CapabilityProfile, viewport: Viewport, rng: &mut R) -> Self {
        Self {
            points: PointCloudState::new(profile.point_count(), rng),
            overlay: ScreenOverlay::new(profile.overlay_count(), viewport, rng),
        }
    }

    pub fn update(&mut self, elapsed: f32) {
        self.points.update(elapsed);
        self.overlay.update(elapsed);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.overlay.resize(viewport);
    }

    #[inline]
    pub fn points(&self) -> &PointCloudState {
        &self.points
    }

    #[inline]
    pub fn overlay(&self) -> &ScreenOverlay {
        &self.overlay
    }
}
