// Host-side tests for the sphere field: construction ranges, the
// volume-to-scale mapping, copy spawning, and the fade law.

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;
use viz_core::constants::{
    COPY_OPACITY_RATIO, FADE_DURATION_MS, MIN_ROTATION_SPEED, ROTATION_SPEED_SPREAD,
    SPHERE_BASE_RADIUS, SPHERE_BASE_SCALE, SPHERE_COUNT, SPHERE_RADIUS_SPREAD, VOLUME_THRESHOLD,
};
use viz_core::spectrum::{max_scale_for_volume, scale_for_volume, SpectrumFrame};
use viz_core::spheres::{sphere_color, sphere_position, SphereField};

fn make_field() -> SphereField {
    let mut rng = StdRng::seed_from_u64(42);
    SphereField::new(&mut rng)
}

/// Draws low values, so a 10% spawn chance always succeeds.
fn always_spawn_rng() -> StepRng {
    StepRng::new(0, 0)
}

/// Draws values near 1.0, so a 10% spawn chance never succeeds.
fn never_spawn_rng() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

#[test]
fn construction_satisfies_configured_ranges() {
    let field = make_field();
    assert_eq!(field.spheres.len(), SPHERE_COUNT);
    assert!(field.copies.is_empty());

    for (i, sphere) in field.spheres.iter().enumerate() {
        assert_eq!(sphere.base_scale, SPHERE_BASE_SCALE);
        assert_eq!(sphere.scale, 1.0, "untouched until first connected frame");
        assert_eq!(sphere.opacity, 1.0);

        let radius = sphere.initial_position.length();
        assert!(
            radius >= SPHERE_BASE_RADIUS - 1e-4
                && radius <= SPHERE_BASE_RADIUS + SPHERE_RADIUS_SPREAD + 1e-4,
            "sphere {i} radius {radius} outside configured band"
        );

        let speed = sphere.rotation_speed;
        assert!(
            (MIN_ROTATION_SPEED..MIN_ROTATION_SPEED + ROTATION_SPEED_SPREAD).contains(&speed),
            "sphere {i} rotation speed {speed} outside configured band"
        );

        // Direction is deterministic in the index; only the radius rolls.
        let unit = sphere_position(i, SPHERE_COUNT, 1.0);
        let dir = sphere.initial_position / radius;
        assert!((dir - unit).length() < 1e-4, "sphere {i} off distribution");

        let expected = sphere_color(sphere.initial_position.x, radius);
        assert!((sphere.color - expected).length() < 1e-6);
    }
}

#[test]
fn construction_is_deterministic_for_a_seed() {
    let a = make_field();
    let b = make_field();
    for (x, y) in a.spheres.iter().zip(b.spheres.iter()) {
        assert_eq!(x.initial_position, y.initial_position);
        assert_eq!(x.rotation_speed, y.rotation_speed);
    }
}

#[test]
fn color_gradient_clamps_at_both_ends() {
    // Far left is pure red, far right pure green, blue always zero.
    let left = sphere_color(-3.0, 3.0);
    assert_eq!((left.x, left.y, left.z), (1.0, 0.0, 0.0));
    let right = sphere_color(3.0, 3.0);
    assert_eq!((right.x, right.y, right.z), (0.0, 1.0, 0.0));
    let mid = sphere_color(0.0, 3.0);
    assert_eq!((mid.x, mid.y, mid.z), (1.0, 0.0, 0.0));
}

#[test]
fn scale_snaps_to_base_at_or_below_threshold() {
    // 12/255 ≈ 0.047 sits below the 0.05 threshold.
    let volume = 12.0 / 255.0;
    assert!(volume <= VOLUME_THRESHOLD);
    assert_eq!(
        scale_for_volume(SPHERE_BASE_SCALE, volume, VOLUME_THRESHOLD),
        SPHERE_BASE_SCALE
    );
    assert_eq!(scale_for_volume(SPHERE_BASE_SCALE, 0.0, VOLUME_THRESHOLD), SPHERE_BASE_SCALE);
}

#[test]
fn scale_is_exact_above_threshold() {
    // 13/255 ≈ 0.051 clears the threshold.
    let volume = 13.0 / 255.0;
    assert!(volume > VOLUME_THRESHOLD);
    assert_eq!(
        scale_for_volume(SPHERE_BASE_SCALE, volume, VOLUME_THRESHOLD),
        SPHERE_BASE_SCALE + volume * 8.0
    );
    assert_eq!(max_scale_for_volume(0.05, 1.0), 8.05);
}

#[test]
fn silent_bin_never_spawns_even_with_a_forced_draw() {
    let mut field = make_field();
    let frame = SpectrumFrame::new();
    let mut rng = always_spawn_rng();
    field.update(&frame, 0.0, 0.0, &mut rng);
    assert!(field.copies.is_empty());
    for sphere in &field.spheres {
        assert_eq!(sphere.scale, SPHERE_BASE_SCALE);
    }
}

#[test]
fn peak_bin_is_spawn_eligible() {
    let mut field = make_field();
    let mut frame = SpectrumFrame::new();
    frame.set(0, 255);
    let mut rng = always_spawn_rng();
    field.update(&frame, 0.0, 0.0, &mut rng);

    assert_eq!(field.spheres[0].scale, 8.05);
    assert_eq!(field.copies.len(), 1);
    let copy = &field.copies[0];
    assert_eq!(copy.scale, 8.05);
    assert_eq!(copy.initial_opacity, COPY_OPACITY_RATIO);
    assert_eq!(copy.opacity, COPY_OPACITY_RATIO);
    // Snapshot of the pre-orbit transform.
    assert_eq!(copy.position, field.spheres[0].initial_position);
}

#[test]
fn no_spawn_when_the_draw_fails() {
    let mut field = make_field();
    let mut frame = SpectrumFrame::new();
    for bin in 0..SPHERE_COUNT {
        frame.set(bin, 255);
    }
    let mut rng = never_spawn_rng();
    field.update(&frame, 0.0, 0.0, &mut rng);
    assert!(field.copies.is_empty());
}

#[test]
fn copy_fades_linearly_and_is_removed_at_the_end() {
    let mut field = make_field();
    let mut frame = SpectrumFrame::new();
    frame.set(0, 255);
    let mut rng = always_spawn_rng();
    field.update(&frame, 0.0, 0.0, &mut rng);
    assert_eq!(field.copies.len(), 1);

    // Quiet frames afterwards: the pool keeps fading, nothing new spawns.
    let quiet = SpectrumFrame::new();
    let op0 = field.copies[0].initial_opacity;

    let mut rng = never_spawn_rng();
    field.update(&quiet, 0.5, 500.0, &mut rng);
    let expected = op0 * (1.0 - 500.0 / FADE_DURATION_MS) as f32;
    assert!((field.copies[0].opacity - expected).abs() < 1e-6);

    field.update(&quiet, 1.5, 1500.0, &mut rng);
    let expected = op0 * (1.0 - 1500.0 / FADE_DURATION_MS) as f32;
    assert!((field.copies[0].opacity - expected).abs() < 1e-6);

    // Progress reaches 1.0: gone on this very update.
    field.update(&quiet, 2.0, FADE_DURATION_MS, &mut rng);
    assert!(field.copies.is_empty());
}

#[test]
fn orbit_pins_y_and_preserves_radius() {
    let mut field = make_field();
    let quiet = SpectrumFrame::new();
    let mut rng = never_spawn_rng();

    let initials: Vec<_> = field
        .spheres
        .iter()
        .map(|s| (s.initial_position, s.rotation_speed))
        .collect();

    field.update(&quiet, 3.0, 3000.0, &mut rng);

    for (sphere, (initial, speed)) in field.spheres.iter().zip(initials) {
        let angle = 3.0_f32 * speed;
        let r = initial.length();
        assert!((sphere.position.x - angle.cos() * r).abs() < 1e-4);
        assert!((sphere.position.z - angle.sin() * r).abs() < 1e-4);
        assert_eq!(sphere.position.y, initial.y);
    }
}

#[test]
fn primary_set_is_never_removed() {
    let mut field = make_field();
    let mut frame = SpectrumFrame::new();
    for bin in 0..SPHERE_COUNT {
        frame.set(bin, 255);
    }
    let mut rng = always_spawn_rng();
    for step in 0..10 {
        let t = step as f64 * 16.0;
        field.update(&frame, t / 1000.0, t, &mut rng);
        assert_eq!(field.spheres.len(), SPHERE_COUNT);
    }
    // Every sphere spawned every frame with the forced draw.
    assert_eq!(field.copies.len(), 10 * SPHERE_COUNT);
}
