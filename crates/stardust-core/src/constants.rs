use glam::Vec3;

// Shared trail tuning constants used by the core and the native frontend.

// Pool sizing
pub const DEFAULT_COUNT: usize = 1500; // pool capacity when none is configured
pub const SPACE_COUNT: usize = 2000; // capacity of the full-scene preset

// Emission and ageing
pub const SPAWN_DENSITY: f32 = 100.0; // spawns per world unit of anchor travel
pub const DECAY_RATE: f32 = 0.008; // life lost per frame (~125 frame lifetime)

// Spawn shape
pub const SPAWN_JITTER: f32 = 0.025; // half-extent of the spawn square per axis
pub const MAX_DRIFT_SPEED: f32 = 0.005; // world units per frame

// Sizing: a small share of slots gets the rare size
pub const COMMON_SIZE: f32 = 0.1;
pub const RARE_SIZE: f32 = 0.05;
pub const RARE_FRACTION: f32 = 0.1;

// Color
pub const COLOR_BOOST: f32 = 1.0; // >1 pushes colors over-bright for glow
pub const HERO_COLOR_BOOST: f32 = 1.5;
pub const WHITE: [f32; 3] = [1.0, 1.0, 1.0];
pub const HERO_TINT: [f32; 3] = [0.82, 0.45, 1.0]; // violet

// Reference plane the trail lives on
pub const PLANE_DEPTH: f32 = 2.0;

// Ray projection guard: rays flatter than this never reach the plane
pub const MIN_RAY_Z: f32 = 1e-6;

// Default camera, matching the scene the trail was tuned in
pub const CAMERA_EYE: [f32; 3] = [0.0, 0.0, 10.0];
pub const CAMERA_FOVY_DEG: f32 = 35.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;

// Point sprite sizing used by the shader: pixels = size * POINT_SCALE / depth
pub const POINT_SCALE: f32 = 300.0;

#[inline]
pub fn camera_eye_vec3() -> Vec3 {
    Vec3::new(CAMERA_EYE[0], CAMERA_EYE[1], CAMERA_EYE[2])
}
