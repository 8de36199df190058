//! Camera state handed to the trail by the host each frame.
//!
//! These types avoid any platform API so both the native frontend and tests
//! can build them. The pointer tracker only reads them; the host owns the
//! camera and whatever easing it applies.

use crate::constants::*;
use glam::{Mat4, Vec2, Vec3, Vec4};

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraState {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraState {
    fn default() -> Self {
        Self::looking_at_origin(1.0)
    }
}

impl CameraState {
    /// The fixed scene camera: eye on +Z looking at the origin.
    pub fn looking_at_origin(aspect: f32) -> Self {
        Self {
            eye: camera_eye_vec3(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Whether matrices built from this camera are invertible and finite.
    pub fn is_usable(&self) -> bool {
        let finite = self.eye.is_finite()
            && self.target.is_finite()
            && self.up.is_finite()
            && self.aspect.is_finite()
            && self.fovy_radians.is_finite()
            && self.znear.is_finite()
            && self.zfar.is_finite();
        if !finite {
            return false;
        }
        let forward = self.target - self.eye;
        self.aspect > 0.0
            && self.fovy_radians > 0.0
            && self.fovy_radians < std::f32::consts::PI
            && self.znear > 0.0
            && self.znear < self.zfar
            && forward.length_squared() > f32::EPSILON
            && forward.cross(self.up).length_squared() > f32::EPSILON
    }

    /// Full width and height of the visible frustum slice at `distance`
    /// from the eye.
    pub fn viewport_at(&self, distance: f32) -> Vec2 {
        let height = 2.0 * (self.fovy_radians * 0.5).tan() * distance.abs();
        Vec2::new(height * self.aspect, height)
    }

    /// World-space ray through a normalized pointer position.
    ///
    /// `ndc` is in \[-1, 1\] on both axes with +Y up. Returns
    /// `(ray_origin, ray_direction)`; the direction is normalized.
    pub fn ray_through(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.view_proj().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let p1: Vec3 = p_far.truncate() / p_far.w;
        let ro = self.eye;
        let rd = (p1 - ro).normalize_or_zero();
        (ro, rd)
    }
}
