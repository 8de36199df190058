// Integration tests for pointer tracking and the camera helpers it uses.

use glam::{Vec2, Vec3};
use stardust_core::*;

fn approx(a: Vec3, b: Vec3, tol: f32) -> bool {
    (a - b).abs().max_element() <= tol
}

fn half_extents(camera: &CameraState) -> Vec2 {
    let distance = camera.eye.distance(camera.target);
    Vec2::new(
        (camera.fovy_radians * 0.5).tan() * distance * camera.aspect,
        (camera.fovy_radians * 0.5).tan() * distance,
    )
}

#[test]
fn first_frame_reports_no_travel() {
    let camera = CameraState::looking_at_origin(1.5);
    let mut tracker = PointerTracker::new(Projection::Linear, PLANE_DEPTH);
    assert!(tracker.previous_anchor().is_none());
    let sample = tracker.track(Vec2::new(0.8, -0.6), &camera).expect("usable camera");
    assert_eq!(sample.distance, 0.0);
    assert_eq!(tracker.previous_anchor(), Some(sample.anchor));
}

#[test]
fn linear_projection_scales_by_viewport_half_extents() {
    let camera = CameraState::looking_at_origin(1.5);
    let tracker = PointerTracker::new(Projection::Linear, PLANE_DEPTH);
    let half = half_extents(&camera);

    let center = tracker.project(Vec2::ZERO, &camera).expect("anchor");
    assert!(approx(center, Vec3::new(0.0, 0.0, PLANE_DEPTH), 1e-6));

    let corner = tracker.project(Vec2::new(1.0, -1.0), &camera).expect("anchor");
    assert!(approx(corner, Vec3::new(half.x, -half.y, PLANE_DEPTH), 1e-5));

    let mid = tracker.project(Vec2::new(0.5, 0.25), &camera).expect("anchor");
    assert!(approx(mid, Vec3::new(0.5 * half.x, 0.25 * half.y, PLANE_DEPTH), 1e-5));
}

#[test]
fn ray_projection_hits_the_plane() {
    let camera = CameraState::looking_at_origin(1.0);
    let tracker = PointerTracker::new(Projection::Ray, PLANE_DEPTH);
    for ndc in [
        Vec2::ZERO,
        Vec2::new(0.5, 0.5),
        Vec2::new(-1.0, 1.0),
        Vec2::new(0.3, -0.9),
    ] {
        let anchor = tracker.project(ndc, &camera).expect("anchor");
        assert_eq!(anchor.z, PLANE_DEPTH);
    }
}

#[test]
fn ray_and_linear_meet_only_at_the_screen_centre() {
    let camera = CameraState::looking_at_origin(16.0 / 9.0);
    let linear = PointerTracker::new(Projection::Linear, PLANE_DEPTH);
    let ray = PointerTracker::new(Projection::Ray, PLANE_DEPTH);

    let a = linear.project(Vec2::ZERO, &camera).expect("linear anchor");
    let b = ray.project(Vec2::ZERO, &camera).expect("ray anchor");
    assert!(approx(a, b, 1e-4), "{a:?} vs {b:?}");

    // viewport scaling uses the target distance, the ray lands on the nearer plane
    let a = linear.project(Vec2::new(1.0, 1.0), &camera).expect("linear anchor");
    let b = ray.project(Vec2::new(1.0, 1.0), &camera).expect("ray anchor");
    assert!(a.x > b.x && a.y > b.y, "{a:?} vs {b:?}");
}

#[test]
fn linear_extents_follow_the_target_distance() {
    // eye at z=10 looking at the origin: extents at 10 units, not 8
    let camera = CameraState::looking_at_origin(1.0);
    let tracker = PointerTracker::new(Projection::Linear, PLANE_DEPTH);
    let corner = tracker.project(Vec2::new(1.0, 1.0), &camera).expect("anchor");
    let expected = (camera.fovy_radians * 0.5).tan() * 10.0;
    assert!((corner.x - expected).abs() < 1e-4, "{corner:?}");
    assert!((corner.y - expected).abs() < 1e-4, "{corner:?}");
    assert_eq!(corner.z, PLANE_DEPTH);

    // a full left-to-right swipe pays for the whole visible width
    let mut tracker = PointerTracker::new(Projection::Linear, PLANE_DEPTH);
    tracker.track(Vec2::new(-1.0, 0.0), &camera);
    let swipe = tracker.track(Vec2::new(1.0, 0.0), &camera).expect("anchor");
    let budget = (swipe.distance as f64 * SPAWN_DENSITY as f64).floor() as usize;
    assert_eq!(budget, 630);
}

#[test]
fn distance_is_euclidean_between_consecutive_anchors() {
    let camera = CameraState::looking_at_origin(1.0);
    let mut tracker = PointerTracker::new(Projection::Linear, PLANE_DEPTH);
    let a = tracker.track(Vec2::new(-0.2, 0.1), &camera).expect("anchor").anchor;
    let sample = tracker.track(Vec2::new(0.3, 0.4), &camera).expect("anchor");
    assert!((sample.distance - a.distance(sample.anchor)).abs() < 1e-6);
    assert!(sample.distance > 0.0);
}

#[test]
fn stationary_pointer_reports_zero_and_keeps_anchor() {
    let camera = CameraState::looking_at_origin(1.0);
    let mut tracker = PointerTracker::new(Projection::Ray, PLANE_DEPTH);
    let first = tracker.track(Vec2::new(0.4, 0.4), &camera).expect("anchor");
    let second = tracker.track(Vec2::new(0.4, 0.4), &camera).expect("anchor");
    assert_eq!(second.distance, 0.0);
    assert_eq!(first.anchor, second.anchor);
    assert_eq!(tracker.previous_anchor(), Some(second.anchor));
}

#[test]
fn degenerate_camera_skips_and_preserves_anchor() {
    let good = CameraState::looking_at_origin(1.0);
    let mut tracker = PointerTracker::new(Projection::Linear, PLANE_DEPTH);
    let kept = tracker.track(Vec2::new(0.1, 0.2), &good).expect("anchor").anchor;

    let mut collapsed = good.clone();
    collapsed.target = collapsed.eye;
    assert!(!collapsed.is_usable());
    assert!(tracker.track(Vec2::new(0.9, 0.9), &collapsed).is_none());

    let mut flat = good.clone();
    flat.aspect = 0.0;
    assert!(tracker.track(Vec2::new(0.9, 0.9), &flat).is_none());

    let mut nan = good.clone();
    nan.eye.x = f32::NAN;
    assert!(tracker.track(Vec2::new(0.9, 0.9), &nan).is_none());

    assert_eq!(tracker.previous_anchor(), Some(kept));
    let back = tracker.track(Vec2::new(0.1, 0.2), &good).expect("anchor");
    assert_eq!(back.distance, 0.0);
}

#[test]
fn ray_parallel_to_plane_is_rejected() {
    // Looking along +X: the center ray never reaches z = PLANE_DEPTH.
    let camera = CameraState {
        eye: Vec3::new(0.0, 0.0, 10.0),
        target: Vec3::new(10.0, 0.0, 10.0),
        ..CameraState::looking_at_origin(1.0)
    };
    assert!(camera.is_usable());
    let tracker = PointerTracker::new(Projection::Ray, PLANE_DEPTH);
    assert!(tracker.project(Vec2::ZERO, &camera).is_none());
}

#[test]
fn plane_behind_the_eye_is_rejected() {
    let camera = CameraState {
        eye: Vec3::new(0.0, 0.0, 1.0),
        ..CameraState::looking_at_origin(1.0)
    };
    let tracker = PointerTracker::new(Projection::Ray, PLANE_DEPTH);
    assert!(tracker.project(Vec2::ZERO, &camera).is_none());
}

#[test]
fn pointer_outside_unit_square_is_clamped() {
    let camera = CameraState::looking_at_origin(1.0);
    let tracker = PointerTracker::new(Projection::Linear, PLANE_DEPTH);
    let wild = tracker.project(Vec2::new(5.0, -3.0), &camera).expect("anchor");
    let edge = tracker.project(Vec2::new(1.0, -1.0), &camera).expect("anchor");
    assert_eq!(wild, edge);
    assert!(tracker.project(Vec2::new(f32::NAN, 0.0), &camera).is_none());
}

#[test]
fn reset_forgets_previous_anchor() {
    let camera = CameraState::looking_at_origin(1.0);
    let mut tracker = PointerTracker::new(Projection::Linear, PLANE_DEPTH);
    tracker.track(Vec2::new(-1.0, -1.0), &camera);
    tracker.reset();
    assert!(tracker.previous_anchor().is_none());
    let sample = tracker.track(Vec2::new(1.0, 1.0), &camera).expect("anchor");
    assert_eq!(sample.distance, 0.0);
}

#[test]
fn pixel_to_ndc_maps_corners_and_center() {
    let surface = Vec2::new(800.0, 600.0);
    assert_eq!(pixel_to_ndc(Vec2::new(400.0, 300.0), surface), Some(Vec2::ZERO));
    assert_eq!(pixel_to_ndc(Vec2::ZERO, surface), Some(Vec2::new(-1.0, 1.0)));
    assert_eq!(pixel_to_ndc(surface, surface), Some(Vec2::new(1.0, -1.0)));
    assert_eq!(
        pixel_to_ndc(Vec2::new(-50.0, 900.0), surface),
        Some(Vec2::new(-1.0, -1.0))
    );
    assert_eq!(pixel_to_ndc(Vec2::new(1.0, 1.0), Vec2::new(0.0, 600.0)), None);
}

#[test]
fn viewport_at_scales_with_distance() {
    let camera = CameraState::looking_at_origin(2.0);
    let near = camera.viewport_at(1.0);
    let far = camera.viewport_at(4.0);
    assert!((far.y - near.y * 4.0).abs() < 1e-5);
    assert!((near.x - near.y * 2.0).abs() < 1e-6);
}
