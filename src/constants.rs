// Shared visual tuning constants used by the web frontend.

// DOM anchors
pub const SURFACE_ANCHOR_ID: &str = "three-container";
pub const OVERLAY_ANCHOR_ID: &str = "particles-container";
pub const OVERLAY_PARTICLE_CLASS: &str = "particle";

// Capability profile
pub const CONSTRAINED_MAX_WIDTH: f64 = 768.0; // viewports narrower than this are constrained
pub const MAX_PIXEL_RATIO: f64 = 2.0;

// Particle counts per profile
pub const POINT_COUNT_FULL: usize = 3000;
pub const POINT_COUNT_CONSTRAINED: usize = 1500;
pub const OVERLAY_COUNT_FULL: usize = 1000;
pub const OVERLAY_COUNT_CONSTRAINED: usize = 300;

// Scroll dispatch throttle (milliseconds); doubled when constrained
pub const SCROLL_THROTTLE_MS: f64 = 16.0;
pub const SCROLL_PROGRESS_EPSILON: f64 = 1e-6;

// Rendering
pub const MSAA_SAMPLES: u32 = 4; // WebGPU guarantees 1 and 4 for render formats

// Camera
pub const CAMERA_FOV_Y_DEG: f32 = 60.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 10.0;
pub const CAMERA_SCROLL_ZOOM: f32 = 5.0; // extra Z distance at full scroll
pub const CAMERA_ZOOM_EASE: f32 = 0.05; // fraction of the remaining distance per dispatch

// Centerpiece
pub const CENTERPIECE_RADIUS: f32 = 2.0;
pub const CENTERPIECE_DETAIL: u32 = 2;
pub const GLOW_RADIUS: f32 = 2.4;
pub const GLOW_SEGMENTS: u32 = 32;
pub const ROTATION_RATE_Y: f32 = 0.005; // radians per frame at speed 1, no scroll
pub const ROTATION_RATE_Z: f32 = 0.002;
pub const SCROLL_ROTATION_GAIN: f32 = 2.0; // factor = 1 + gain * scroll
pub const CENTERPIECE_COLOR: u32 = 0xff4e42;

// GPU point cloud
pub const POINT_CLOUD_HALF_EXTENT: f32 = 50.0;
pub const POINT_PALETTE: [u32; 3] = [0xff4e42, 0xc2362f, 0xffb3ab];

// Screen-space overlay
pub const OVERLAY_MIN_RADIUS: f32 = 200.0; // hollow centre
pub const OVERLAY_RADIUS_SCALE: f32 = 1.2;
pub const OVERLAY_SPEED_MIN: f32 = 0.0002;
pub const OVERLAY_SPEED_MAX: f32 = 0.0007;
pub const OVERLAY_NOISE_PX: f32 = 10.0;
pub const OVERLAY_OPACITY_MIN: f32 = 0.2;
pub const OVERLAY_OPACITY_MAX: f32 = 0.7;
pub const OVERLAY_PULSE: f32 = 0.2;
pub const OVERLAY_TINT_MIN: u8 = 78;
pub const OVERLAY_TINT_SPAN: u8 = 100;
pub const OVERLAY_BLUE_OFFSET: u8 = 12;
