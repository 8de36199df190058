//! Pointer tracking: maps the pointer onto the trail plane by viewport scaling
//! (`Linear`) or by casting a ray from the eye (`Ray`).

use crate::camera::CameraState;
use crate::constants::MIN_RAY_Z;
use glam::{Vec2, Vec3};

/// How a normalized pointer is placed on the trail plane.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Projection {
    /// Scale the pointer by the viewport half-extents at the target's depth.
    #[default]
    Linear,
    /// Cast a ray from the eye through the pointer and hit the plane.
    Ray,
}

/// One frame of tracker output.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerSample {
    pub anchor: Vec3,
    /// Distance from the previous anchor; finite and never negative.
    pub distance: f32,
}

/// Turns the pointer into an anchor on the plane `z = plane_depth` and
/// remembers it so the next frame can report how far it moved.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    projection: Projection,
    plane_depth: f32,
    previous: Option<Vec3>,
}

impl PointerTracker {
    pub fn new(projection: Projection, plane_depth: f32) -> Self {
        Self {
            projection,
            plane_depth,
            previous: None,
        }
    }

    pub fn projection(&self) -> Projection {
        self.projection
    }

    pub fn plane_depth(&self) -> f32 {
        self.plane_depth
    }

    /// Last anchor produced, if any frame has been tracked yet.
    pub fn previous_anchor(&self) -> Option<Vec3> {
        self.previous
    }

    /// Forget the remembered anchor; the next frame reports zero travel.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Map the pointer for this frame.
    ///
    /// Returns `None` when the camera cannot produce an anchor. The caller
    /// skips the frame and the remembered anchor is left as it was.
    pub fn track(&mut self, pointer: Vec2, camera: &CameraState) -> Option<PointerSample> {
        let anchor = self.project(pointer, camera)?;
        let distance = match self.previous {
            Some(prev) => sanitize_distance(anchor.distance(prev)),
            None => 0.0,
        };
        self.previous = Some(anchor);
        Some(PointerSample { anchor, distance })
    }

    /// Anchor for `pointer` without touching tracker state.
    pub fn project(&self, pointer: Vec2, camera: &CameraState) -> Option<Vec3> {
        if !pointer.is_finite() || !camera.is_usable() {
            return None;
        }
        let ndc = pointer.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
        let anchor = match self.projection {
            Projection::Linear => self.project_linear(ndc, camera),
            Projection::Ray => self.project_ray(ndc, camera)?,
        };
        anchor.is_finite().then_some(anchor)
    }

    // Extents are measured where the camera looks, not at the plane, so the
    // anchor sweeps a wider area than the ray hit for the same pointer.
    fn project_linear(&self, ndc: Vec2, camera: &CameraState) -> Vec3 {
        let half = camera.viewport_at(camera.eye.distance(camera.target)) * 0.5;
        Vec3::new(ndc.x * half.x, ndc.y * half.y, self.plane_depth)
    }

    fn project_ray(&self, ndc: Vec2, camera: &CameraState) -> Option<Vec3> {
        let (ro, rd) = camera.ray_through(ndc);
        if rd.z.abs() <= MIN_RAY_Z {
            return None;
        }
        let t = (self.plane_depth - ro.z) / rd.z;
        // behind the eye, or past the far plane where a near-parallel ray lands
        if !(0.0..=camera.zfar).contains(&t) {
            return None;
        }
        let mut hit = ro + rd * t;
        // pin to the plane exactly; t * rd.z leaves rounding noise in z
        hit.z = self.plane_depth;
        Some(hit)
    }
}

/// Convert a pixel position (origin top-left, +Y down) into normalized
/// device coordinates with +Y up. `None` for an empty surface.
#[inline]
pub fn pixel_to_ndc(px: Vec2, surface: Vec2) -> Option<Vec2> {
    if surface.x <= 0.0 || surface.y <= 0.0 {
        return None;
    }
    let ndc_x = (2.0 * px.x / surface.x) - 1.0;
    let ndc_y = 1.0 - (2.0 * px.y / surface.y);
    Some(Vec2::new(ndc_x, ndc_y).clamp(Vec2::splat(-1.0), Vec2::splat(1.0)))
}

#[inline]
fn sanitize_distance(d: f32) -> f32 {
    if d.is_finite() && d > 0.0 {
        d
    } else {
        0.0
    }
}
