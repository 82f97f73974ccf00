pub mod beams;
pub mod camera;
pub mod constants;
pub mod scene;
pub mod source;
pub mod spectrum;
pub mod spheres;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use beams::*;
pub use camera::*;
pub use constants::*;
pub use scene::*;
pub use source::*;
pub use spectrum::*;
pub use spheres::*;
