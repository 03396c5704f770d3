// Host-side tests for particle generation and the screen overlay.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod color {
        include!("../src/core/color.rs");
    }
    pub mod particles {
        include!("../src/core/particles.rs");
    }
    pub mod profile {
        include!("../src/core/profile.rs");
    }
}

use self::core::camera::Viewport;
use self::core::color::hex_to_linear;
use self::core::particles::*;
use self::core::profile::CapabilityProfile;
use constants::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn point_cloud_stays_in_cube_with_palette_colours() {
    let palette = POINT_PALETTE.map(hex_to_linear);
    let points = generate_point_cloud(3000, &mut rng());
    assert_eq!(points.len(), 3000);
    for p in &points {
        for c in p.position {
            assert!((-POINT_CLOUD_HALF_EXTENT..POINT_CLOUD_HALF_EXTENT).contains(&c));
        }
        assert!(palette.contains(&p.color), "colour {:?} not in palette", p.color);
    }
}

#[test]
fn point_cloud_uses_every_palette_entry() {
    let palette = POINT_PALETTE.map(hex_to_linear);
    let points = generate_point_cloud(600, &mut rng());
    for c in palette {
        assert!(points.iter().any(|p| p.color == c));
    }
}

#[test]
fn point_cloud_update_only_moves_time() {
    let mut cloud = PointCloudState::new(100, &mut rng());
    let before = cloud.points().to_vec();
    cloud.update(3.5);
    assert_eq!(cloud.time(), 3.5);
    assert_eq!(cloud.points(), &before[..]);
}

#[test]
fn sprite_size_and_alpha() {
    assert!((point_size_px(-10.0) - 30.0).abs() < 1e-5);
    assert!(point_size_px(-100.0) < point_size_px(-10.0));
    assert_eq!(point_alpha(0.0), Some(0.6));
    assert_eq!(point_alpha(0.5), Some(0.0));
    assert_eq!(point_alpha(0.51), None);
}

#[test]
fn drift_is_bounded() {
    let p = glam::Vec3::new(3.0, -7.0, 12.0);
    for i in 0..50 {
        let d = drifted_position(p, i as f32 * 0.37);
        assert!((d.x - p.x).abs() <= 0.05 + 1e-6);
        assert!((d.y - p.y).abs() <= 0.05 + 1e-6);
        assert_eq!(d.z, p.z);
    }
}

#[test]
fn overlay_radius_has_hollow_centre() {
    let mut r = rng();
    for viewport in [Viewport::new(320.0, 480.0), Viewport::new(2560.0, 1440.0)] {
        let overlay = ScreenOverlay::new(1000, viewport, &mut r);
        for p in overlay.particles() {
            assert!(p.radius() >= OVERLAY_MIN_RADIUS);
        }
    }
}

#[test]
fn small_viewport_collapses_onto_min_radius() {
    // min(cx, cy) * 1.2 = 192 < 200, so every radius is floored
    let overlay = ScreenOverlay::new(200, Viewport::new(320.0, 480.0), &mut rng());
    assert!(overlay
        .particles()
        .iter()
        .all(|p| p.radius() == OVERLAY_MIN_RADIUS));
}

#[test]
fn overlay_radius_is_area_uniform() {
    let viewport = Viewport::new(4000.0, 4000.0);
    let outer = 2000.0 * OVERLAY_RADIUS_SCALE;
    let half_area = outer / std::f32::consts::SQRT_2;
    let mut r = rng();
    let n = 20_000;
    let inside = (0..n)
        .filter(|_| ScreenParticle::sample(&mut r, viewport).radius() < half_area)
        .count();
    let frac = inside as f32 / n as f32;
    assert!((frac - 0.5).abs() < 0.03, "inner-half fraction {}", frac);
}

#[test]
fn new_particle_starts_at_rest_position() {
    let viewport = Viewport::new(1280.0, 720.0);
    let p = ScreenParticle::sample(&mut rng(), viewport);
    let c = viewport.center();
    assert_eq!(p.x, c.x + p.angle().cos() * p.radius());
    assert_eq!(p.y, c.y + p.angle().sin() * p.radius());
    assert_eq!(p.opacity, p.base_opacity());
}

#[test]
fn sampled_attributes_are_in_range() {
    let mut r = rng();
    for _ in 0..500 {
        let p = ScreenParticle::sample(&mut r, Viewport::new(1280.0, 720.0));
        assert!((OVERLAY_SPEED_MIN..OVERLAY_SPEED_MAX).contains(&p.speed()));
        assert!((OVERLAY_OPACITY_MIN..OVERLAY_OPACITY_MAX).contains(&p.base_opacity()));
        let [red, g, b] = p.tint();
        assert_eq!(red, 255);
        assert!((OVERLAY_TINT_MIN..OVERLAY_TINT_MIN + OVERLAY_TINT_SPAN).contains(&g));
        assert_eq!(b, g - OVERLAY_BLUE_OFFSET);
    }
}

#[test]
fn opacity_stays_clamped_while_animating() {
    let mut overlay = ScreenOverlay::new(300, Viewport::new(1280.0, 720.0), &mut rng());
    let bases: Vec<f32> = overlay.particles().iter().map(|p| p.base_opacity()).collect();
    for i in 0..200 {
        overlay.update(i as f32 * 0.113);
        for (p, base) in overlay.particles().iter().zip(&bases) {
            assert!((0.1..=1.0).contains(&p.opacity));
            assert!((p.opacity - base).abs() <= OVERLAY_PULSE + 1e-6);
            assert_eq!(p.base_opacity(), *base);
        }
    }
}

#[test]
fn update_wobbles_within_noise_band() {
    let viewport = Viewport::new(1280.0, 720.0);
    let mut overlay = ScreenOverlay::new(100, viewport, &mut rng());
    overlay.update(12.0);
    let c = viewport.center();
    for p in overlay.particles() {
        let dist = ((p.x - c.x).powi(2) + (p.y - c.y).powi(2)).sqrt();
        assert!((dist - p.radius()).abs() <= OVERLAY_NOISE_PX + 1e-2);
    }
}

#[test]
fn resize_recentres_from_stored_values() {
    let mut overlay = ScreenOverlay::new(250, Viewport::new(1280.0, 720.0), &mut rng());
    overlay.update(4.0);
    let before: Vec<(f32, f32, f32)> = overlay
        .particles()
        .iter()
        .map(|p| (p.angle(), p.radius(), p.speed()))
        .collect();

    let next = Viewport::new(800.0, 1200.0);
    overlay.resize(next);
    let c = next.center();
    assert_eq!(overlay.viewport(), next);
    for (p, (angle, radius, speed)) in overlay.particles().iter().zip(before) {
        assert_eq!((p.angle(), p.radius(), p.speed()), (angle, radius, speed));
        assert_eq!(p.x, c.x + angle.cos() * radius);
        assert_eq!(p.y, c.y + angle.sin() * radius);
    }
}

#[test]
fn field_counts_follow_profile() {
    let viewport = Viewport::new(1280.0, 720.0);
    let full = ParticleField::new(CapabilityProfile::Full, viewport, &mut rng());
    assert_eq!(full.points().points().len(), 3000);
    assert_eq!(full.overlay().particles().len(), 1000);

    let small = ParticleField::new(CapabilityProfile::Constrained, viewport, &mut rng());
    assert_eq!(small.points().points().len(), 1500);
    assert_eq!(small.overlay().particles().len(), 300);
}

#[test]
fn field_resize_leaves_point_cloud_alone() {
    let mut field = ParticleField::new(CapabilityProfile::Constrained, Viewport::new(600.0, 900.0), &mut rng());
    let points = field.points().points().to_vec();
    field.update(2.0);
    field.resize(Viewport::new(900.0, 600.0));
    assert_eq!(field.points().points(), &points[..]);
    assert_eq!(field.points().time(), 2.0);
    assert_eq!(field.overlay().particles().len(), 300);
}

#[test]
fn same_seed_gives_same_field() {
    let viewport = Viewport::new(1280.0, 720.0);
    let a = ParticleField::new(CapabilityProfile::Full, viewport, &mut StdRng::seed_from_u64(99));
    let b = ParticleField::new(CapabilityProfile::Full, viewport, &mut StdRng::seed_from_u64(99));
    assert_eq!(a.points().points(), b.points().points());
    assert_eq!(a.overlay().particles(), b.overlay().particles());
}
