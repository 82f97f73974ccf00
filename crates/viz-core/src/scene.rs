//! Shared GPU-facing types and the visual mode selector.
//!
//! Both frontends rebuild the instance list from field state every frame
//! and upload it to the same instanced-quad pipeline, so these layouts
//! live here next to the shader they feed.

use rand::Rng;

use crate::beams::BeamField;
use crate::spectrum::SpectrumFrame;
use crate::spheres::SphereField;

pub const SHAPE_SPHERE: f32 = 0.0;
pub const SHAPE_BEAM: f32 = 1.0;

/// One billboard instance: world position, half extents, color with
/// opacity in the alpha channel, and a shape discriminant for the shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneInstance {
    pub pos: [f32; 3],
    pub shape: f32,
    pub extent: [f32; 2],
    pub _pad: [f32; 2],
    pub color: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    pub view: [[f32; 4]; 4],
    pub proj: [[f32; 4]; 4],
}

/// Closed set of per-frame update strategies.
pub enum VisualMode {
    Spheres(SphereField),
    Beams(BeamField),
}

impl VisualMode {
    pub fn spheres(rng: &mut impl Rng) -> Self {
        VisualMode::Spheres(SphereField::new(rng))
    }

    pub fn beams(rng: &mut impl Rng) -> Self {
        VisualMode::Beams(BeamField::new(rng))
    }

    pub fn update(
        &mut self,
        frame: &SpectrumFrame,
        elapsed_sec: f64,
        now_ms: f64,
        rng: &mut impl Rng,
    ) {
        match self {
            VisualMode::Spheres(field) => field.update(frame, elapsed_sec, now_ms, rng),
            VisualMode::Beams(field) => field.update(frame),
        }
    }

    pub fn push_instances(&self, out: &mut Vec<SceneInstance>) {
        match self {
            VisualMode::Spheres(field) => field.push_instances(out),
            VisualMode::Beams(field) => field.push_instances(out),
        }
    }
}
