//! The primary sphere field and its transient copy pool.
//!
//! 256 spheres are laid out once on a spherical distribution and never
//! removed; per frame their scale tracks one frequency bin each and they
//! orbit the origin in the x/z plane. A sphere near its peak scale can
//! spawn a fading copy of itself; copies live in a separate pool and are
//! dropped once their fade completes.

use glam::Vec3;
use rand::Rng;

use crate::constants::{
    COPY_OPACITY_RATIO, COPY_SPAWN_CHANCE, COPY_SPAWN_RATIO, FADE_DURATION_MS, MIN_ROTATION_SPEED,
    ROTATION_SPEED_SPREAD, SPHERE_BASE_RADIUS, SPHERE_BASE_SCALE, SPHERE_COUNT,
    SPHERE_RADIUS_SPREAD, VOLUME_THRESHOLD,
};
use crate::scene::{SceneInstance, SHAPE_SPHERE};
use crate::spectrum::{max_scale_for_volume, scale_for_volume, SpectrumFrame};

/// Deterministic spherical-distribution position for sphere `index` of
/// `count`, at the given orbit radius.
pub fn sphere_position(index: usize, count: usize, radius: f32) -> Vec3 {
    let phi = (-1.0 + 2.0 * index as f32 / count as f32).acos();
    let theta = (count as f32 * std::f32::consts::PI).sqrt() * phi;
    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Red-to-green gradient keyed off the x coordinate, clamped per channel.
pub fn sphere_color(x: f32, radius: f32) -> Vec3 {
    let t = x / (2.0 * radius);
    Vec3::new(
        (1.0 - 2.0 * t).clamp(0.0, 1.0),
        (2.0 * t).clamp(0.0, 1.0),
        0.0,
    )
}

#[derive(Clone, Debug)]
pub struct Sphere {
    // Fixed at construction
    pub base_scale: f32,
    pub initial_position: Vec3,
    pub rotation_speed: f32,
    pub color: Vec3,
    // Mutated per frame
    pub position: Vec3,
    pub scale: f32,
    pub opacity: f32,
}

impl Sphere {
    pub fn new(index: usize, count: usize, rng: &mut impl Rng) -> Self {
        let radius = SPHERE_BASE_RADIUS + rng.gen::<f32>() * SPHERE_RADIUS_SPREAD;
        let position = sphere_position(index, count, radius);
        Self {
            base_scale: SPHERE_BASE_SCALE,
            initial_position: position,
            rotation_speed: MIN_ROTATION_SPEED + rng.gen::<f32>() * ROTATION_SPEED_SPREAD,
            color: sphere_color(position.x, radius),
            position,
            // Unit scale until the first connected frame, matching the
            // untouched mesh before playback starts.
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

/// A transient clone spawned from a sphere at peak amplitude. All static
/// parameters are snapshotted at creation; only `opacity` mutates, and
/// only in the fade step.
#[derive(Clone, Debug)]
pub struct CopySphere {
    pub position: Vec3,
    pub scale: f32,
    pub color: Vec3,
    pub initial_opacity: f32,
    pub opacity: f32,
    pub spawned_at_ms: f64,
}

impl CopySphere {
    fn of(source: &Sphere, now_ms: f64) -> Self {
        let initial_opacity = source.opacity * COPY_OPACITY_RATIO;
        Self {
            position: source.position,
            scale: source.scale,
            color: source.color,
            initial_opacity,
            opacity: initial_opacity,
            spawned_at_ms: now_ms,
        }
    }

    /// Fade progress in `[0, ..)`; the copy is removed at `>= 1`.
    pub fn fade_progress(&self, now_ms: f64) -> f64 {
        (now_ms - self.spawned_at_ms) / FADE_DURATION_MS
    }
}

pub struct SphereField {
    pub spheres: Vec<Sphere>,
    pub copies: Vec<CopySphere>,
}

impl SphereField {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::with_count(SPHERE_COUNT, rng)
    }

    pub fn with_count(count: usize, rng: &mut impl Rng) -> Self {
        let spheres = (0..count).map(|i| Sphere::new(i, count, rng)).collect();
        Self {
            spheres,
            copies: Vec::new(),
        }
    }

    /// One per-frame step: map volumes to scales, spawn copies, orbit,
    /// then advance and expire the copy pool.
    pub fn update(
        &mut self,
        frame: &SpectrumFrame,
        elapsed_sec: f64,
        now_ms: f64,
        rng: &mut impl Rng,
    ) {
        let time = elapsed_sec as f32;
        for (i, sphere) in self.spheres.iter_mut().enumerate() {
            let volume = frame.volume(i);
            let max_scale = max_scale_for_volume(sphere.base_scale, volume);
            sphere.scale = scale_for_volume(sphere.base_scale, volume, VOLUME_THRESHOLD);

            // A copy snapshots the pre-orbit transform of its source.
            // Silent bins never spawn, whatever the draw.
            if volume > VOLUME_THRESHOLD
                && sphere.scale > max_scale * COPY_SPAWN_RATIO
                && rng.gen::<f32>() < COPY_SPAWN_CHANCE
            {
                self.copies.push(CopySphere::of(sphere, now_ms));
            }

            let angle = time * sphere.rotation_speed;
            let orbit_radius = sphere.initial_position.length();
            sphere.position = Vec3::new(
                angle.cos() * orbit_radius,
                sphere.initial_position.y,
                angle.sin() * orbit_radius,
            );
        }

        // Order-preserving single pass; each expired copy leaves exactly once.
        self.copies.retain_mut(|copy| {
            let progress = copy.fade_progress(now_ms);
            if progress >= 1.0 {
                return false;
            }
            copy.opacity = copy.initial_opacity * (1.0 - progress as f32);
            true
        });
    }

    pub fn push_instances(&self, out: &mut Vec<SceneInstance>) {
        for s in &self.spheres {
            let r = s.base_scale * s.scale;
            out.push(SceneInstance {
                pos: s.position.to_array(),
                shape: SHAPE_SPHERE,
                extent: [r, r],
                _pad: [0.0; 2],
                color: [s.color.x, s.color.y, s.color.z, s.opacity],
            });
        }
        for c in &self.copies {
            let r = SPHERE_BASE_SCALE * c.scale;
            out.push(SceneInstance {
                pos: c.position.to_array(),
                shape: SHAPE_SPHERE,
                extent: [r, r],
                _pad: [0.0; 2],
                color: [c.color.x, c.color.y, c.color.z, c.opacity],
            });
        }
    }
}
