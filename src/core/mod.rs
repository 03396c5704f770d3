pub mod camera;
pub mod centerpiece;
pub mod color;
pub mod frame_loop;
pub mod geometry;
pub mod lights;
pub mod particles;
pub mod profile;
pub mod scene;
pub mod scroll;

pub use camera::*;
pub use centerpiece::*;
pub use frame_loop::*;
pub use lights::*;
pub use particles::*;
pub use profile::*;
pub use scene::*;
pub use scroll::*;

// Shaders bundled as string constants
pub static WIREFRAME_WGSL: &str = include_str!("../../shaders/wireframe.wgsl");
pub static GLOW_WGSL: &str = include_str!("../../shaders/glow.wgsl");
pub static POINTS_WGSL: &str = include_str!("../../shaders/points.wgsl");
