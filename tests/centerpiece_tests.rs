// Host-side tests for centerpiece animation state.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod core {
    pub mod centerpiece {
        include!("../src/core/centerpiece.rs");
    }
    pub mod color {
        include!("../src/core/color.rs");
    }
}

use self::core::centerpiece::*;
use self::core::color::hex_to_linear;
use constants::*;

fn run(state: &mut CenterpieceState, frames: usize, scroll: f32) {
    for i in 0..frames {
        state.update(i as f32 / 60.0, scroll);
    }
}

#[test]
fn rotation_accumulates_per_frame_without_scroll() {
    let mut c = CenterpieceState::new();
    run(&mut c, 120, 0.0);
    assert!((c.rotation().y - 120.0 * ROTATION_RATE_Y).abs() < 1e-4);
    assert!((c.rotation().z - 120.0 * ROTATION_RATE_Z).abs() < 1e-4);
}

#[test]
fn scroll_speeds_up_rotation() {
    let mut c = CenterpieceState::new();
    run(&mut c, 100, 0.5);
    // factor 1 + 0.5 * 2 = 2
    assert!((c.rotation().y - 100.0 * ROTATION_RATE_Y * 2.0).abs() < 1e-4);

    let mut full = CenterpieceState::new();
    run(&mut full, 100, 1.0);
    assert!((full.rotation().z - 100.0 * ROTATION_RATE_Z * 3.0).abs() < 1e-4);
}

#[test]
fn rotation_speed_scales_next_updates() {
    let mut c = CenterpieceState::new();
    run(&mut c, 10, 0.0);
    let y0 = c.rotation().y;
    c.set_rotation_speed(2.0);
    assert_eq!(c.rotation().y, y0);
    c.update(1.0, 0.0);
    assert!((c.rotation().y - y0 - 2.0 * ROTATION_RATE_Y).abs() < 1e-6);

    c.set_rotation_speed(0.0);
    let frozen = c.rotation();
    run(&mut c, 30, 1.0);
    assert_eq!(c.rotation(), frozen);
}

#[test]
fn glow_follows_wireframe_rotation() {
    let mut c = CenterpieceState::new();
    run(&mut c, 45, 0.3);
    assert_eq!(c.glow_rotation(), c.rotation());
    assert_eq!(c.glow_packed().model, c.wireframe_packed().model);
}

#[test]
fn uniforms_track_time_and_scroll() {
    let mut c = CenterpieceState::new();
    c.update(2.5, 0.75);
    assert_eq!(c.wireframe().time, 2.5);
    assert_eq!(c.wireframe().scroll_amount, 0.75);
    assert_eq!(c.glow().time, 2.5);

    let packed = c.wireframe_packed();
    assert_eq!(packed.params[0], 2.5);
    assert_eq!(packed.params[2], 0.75);
}

#[test]
fn distortion_applies_immediately() {
    let mut c = CenterpieceState::new();
    assert_eq!(c.wireframe().distortion, 1.0);
    c.set_distortion(3.0);
    assert_eq!(c.wireframe().distortion, 3.0);
    assert_eq!(c.wireframe_packed().params[1], 3.0);
    c.update(0.1, 0.0);
    assert_eq!(c.wireframe().distortion, 3.0);
}

#[test]
fn both_materials_share_the_accent_colour() {
    let c = CenterpieceState::new();
    let accent = hex_to_linear(CENTERPIECE_COLOR);
    assert_eq!(c.wireframe().color, accent);
    assert_eq!(c.glow().color, accent);
    assert_eq!(c.wireframe_packed().color[3], 1.0);
}

#[test]
fn rotation_matrix_spins_about_y_first() {
    let r = Rotation {
        y: std::f32::consts::FRAC_PI_2,
        z: 0.0,
    };
    let v = r.matrix().transform_vector3(glam::Vec3::X);
    assert!((v - glam::Vec3::NEG_Z).length() < 1e-5);
    assert_eq!(Rotation::default().matrix(), glam::Mat4::IDENTITY);
}

#[test]
fn uniform_block_size_matches_shader() {
    assert_eq!(std::mem::size_of::<MeshUniforms>(), 96);
}
