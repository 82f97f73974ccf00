//! Beam variant: a row of tall cylinders whose radius tracks one
//! frequency bin each. No orbiting, no copy pool.

use glam::Vec3;
use rand::Rng;

use crate::constants::{
    BEAM_BASE_RADIUS, BEAM_COUNT, BEAM_DISTANCE_FROM_CAMERA, BEAM_HEIGHT, BEAM_SPACE_WIDTH,
    BEAM_VOLUME_THRESHOLD,
};
use crate::scene::{SceneInstance, SHAPE_BEAM};
use crate::spectrum::{scale_for_volume, SpectrumFrame};

#[derive(Clone, Debug)]
pub struct Beam {
    pub base_radius: f32,
    pub color: Vec3,
    pub position: Vec3,
    // Radius multiplier applied this frame; height never scales.
    pub radial_scale: f32,
}

impl Beam {
    pub fn new(index: usize, count: usize, rng: &mut impl Rng) -> Self {
        let x = (index as f32 / count as f32) * 2.0 - 1.0;
        Self {
            base_radius: BEAM_BASE_RADIUS,
            color: Vec3::new(rng.gen(), rng.gen(), rng.gen()),
            position: Vec3::new(x * BEAM_SPACE_WIDTH, 0.0, -BEAM_DISTANCE_FROM_CAMERA),
            radial_scale: 1.0,
        }
    }
}

pub struct BeamField {
    pub beams: Vec<Beam>,
}

impl BeamField {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::with_count(BEAM_COUNT, rng)
    }

    pub fn with_count(count: usize, rng: &mut impl Rng) -> Self {
        let beams = (0..count).map(|i| Beam::new(i, count, rng)).collect();
        Self { beams }
    }

    pub fn update(&mut self, frame: &SpectrumFrame) {
        for (i, beam) in self.beams.iter_mut().enumerate() {
            let volume = frame.volume(i);
            beam.radial_scale =
                scale_for_volume(beam.base_radius, volume, BEAM_VOLUME_THRESHOLD);
        }
    }

    pub fn push_instances(&self, out: &mut Vec<SceneInstance>) {
        for b in &self.beams {
            out.push(SceneInstance {
                pos: b.position.to_array(),
                shape: SHAPE_BEAM,
                extent: [b.base_radius * b.radial_scale, BEAM_HEIGHT * 0.5],
                _pad: [0.0; 2],
                color: [b.color.x, b.color.y, b.color.z, 1.0],
            });
        }
    }
}
