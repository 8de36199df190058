// Sanity checks on the tuning constants and their relationships.

use stardust_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(DEFAULT_COUNT > 0 && SPACE_COUNT > 0);
    assert!(SPAWN_DENSITY > 0.0);
    assert!(DECAY_RATE > 0.0 && DECAY_RATE <= 1.0);
    assert!(SPAWN_JITTER >= 0.0);
    assert!(MAX_DRIFT_SPEED >= 0.0);
    assert!((0.0..=1.0).contains(&RARE_FRACTION));
    assert!(COMMON_SIZE > 0.0 && RARE_SIZE > 0.0);
    assert!(COLOR_BOOST >= 1.0 && HERO_COLOR_BOOST >= 1.0);
    assert!(POINT_SCALE > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_have_logical_relationships() {
    // Reference lifetime is about 125 frames
    let frames = (1.0 / DECAY_RATE as f64).ceil();
    assert!((120.0..=130.0).contains(&frames));

    // Trail plane sits between the camera and its target
    assert!(PLANE_DEPTH < CAMERA_EYE[2]);
    assert!(PLANE_DEPTH > 0.0);
    assert!(CAMERA_EYE[2] - PLANE_DEPTH > CAMERA_ZNEAR);
    assert!(CAMERA_ZNEAR < CAMERA_ZFAR);
}

#[test]
fn default_camera_uses_scene_eye() {
    let camera = CameraState::default();
    assert_eq!(camera.eye, camera_eye_vec3());
    assert!(camera.is_usable());
    assert!((camera.fovy_radians - CAMERA_FOVY_DEG.to_radians()).abs() < 1e-6);
}
