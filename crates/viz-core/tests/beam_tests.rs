// Host-side tests for the beam variant: layout, radius mapping, and the
// fixed height.

use rand::rngs::StdRng;
use rand::SeedableRng;
use viz_core::constants::{
    BEAM_BASE_RADIUS, BEAM_COUNT, BEAM_DISTANCE_FROM_CAMERA, BEAM_HEIGHT, BEAM_SPACE_WIDTH,
    BEAM_VOLUME_THRESHOLD,
};
use viz_core::beams::BeamField;
use viz_core::spectrum::SpectrumFrame;

fn make_field() -> BeamField {
    let mut rng = StdRng::seed_from_u64(7);
    BeamField::new(&mut rng)
}

#[test]
fn beams_line_up_in_front_of_the_camera() {
    let field = make_field();
    assert_eq!(field.beams.len(), BEAM_COUNT);
    for (i, beam) in field.beams.iter().enumerate() {
        let expected_x = ((i as f32 / BEAM_COUNT as f32) * 2.0 - 1.0) * BEAM_SPACE_WIDTH;
        assert_eq!(beam.position.x, expected_x);
        assert_eq!(beam.position.y, 0.0);
        assert_eq!(beam.position.z, -BEAM_DISTANCE_FROM_CAMERA);
        assert_eq!(beam.base_radius, BEAM_BASE_RADIUS);
        assert_eq!(beam.radial_scale, 1.0);
        for channel in [beam.color.x, beam.color.y, beam.color.z] {
            assert!((0.0..1.0).contains(&channel));
        }
    }
}

#[test]
fn radius_tracks_volume_above_its_own_threshold() {
    let mut field = make_field();
    let mut frame = SpectrumFrame::new();
    // 25/255 ≈ 0.098 is under the beam threshold (0.1), 30/255 is over.
    frame.set(0, 25);
    frame.set(1, 30);
    frame.set(2, 255);
    field.update(&frame);

    assert_eq!(field.beams[0].radial_scale, BEAM_BASE_RADIUS);
    let v1 = 30.0 / 255.0;
    assert!(v1 > BEAM_VOLUME_THRESHOLD);
    assert_eq!(field.beams[1].radial_scale, BEAM_BASE_RADIUS + v1 * 8.0);
    assert_eq!(field.beams[2].radial_scale, BEAM_BASE_RADIUS + 8.0);
}

#[test]
fn height_never_scales() {
    let mut field = make_field();
    let mut frame = SpectrumFrame::new();
    for bin in 0..BEAM_COUNT {
        frame.set(bin, 255);
    }
    field.update(&frame);

    let mut instances = Vec::new();
    field.push_instances(&mut instances);
    assert_eq!(instances.len(), BEAM_COUNT);
    for inst in &instances {
        assert_eq!(inst.extent[1], BEAM_HEIGHT * 0.5);
        assert_eq!(inst.extent[0], BEAM_BASE_RADIUS * (BEAM_BASE_RADIUS + 8.0));
        assert_eq!(inst.color[3], 1.0);
    }
}
