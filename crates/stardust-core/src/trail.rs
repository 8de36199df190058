//! Per-frame driver tying the pointer tracker to the particle pool.

use crate::buffers::TrailBuffers;
use crate::camera::CameraState;
use crate::config::TrailConfig;
use crate::error::ConfigError;
use crate::pointer::{PointerSample, PointerTracker};
use crate::pool::{FrameStats, ParticleTrailPool};
use glam::Vec2;

/// What the host hands over each frame.
#[derive(Clone, Debug, Default)]
pub struct FrameInput {
    /// Pointer in normalized device coordinates, +Y up.
    pub pointer: Vec2,
    /// `None` while the host has no camera or viewport yet.
    pub camera: Option<CameraState>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameOutcome {
    /// No usable camera; pool and buffers are untouched.
    Skipped,
    Updated {
        sample: PointerSample,
        stats: FrameStats,
    },
}

impl FrameOutcome {
    pub fn is_skipped(&self) -> bool {
        matches!(self, FrameOutcome::Skipped)
    }
}

pub struct StardustTrail {
    tracker: PointerTracker,
    pool: ParticleTrailPool,
    frames: u64,
    skipped: u64,
}

impl StardustTrail {
    pub fn new(config: TrailConfig) -> Result<Self, ConfigError> {
        let tracker = PointerTracker::new(config.projection, config.plane_depth);
        let pool = ParticleTrailPool::new(config)?;
        log::info!(
            "[trail] ready: {} particles, {:?} projection",
            pool.capacity(),
            tracker.projection()
        );
        Ok(Self {
            tracker,
            pool,
            frames: 0,
            skipped: 0,
        })
    }

    /// Run one frame: track the pointer, then update the pool as one unit.
    pub fn frame(&mut self, input: &FrameInput) -> FrameOutcome {
        self.frames += 1;
        let sample = input
            .camera
            .as_ref()
            .and_then(|camera| self.tracker.track(input.pointer, camera));
        let Some(sample) = sample else {
            self.skipped += 1;
            log::debug!("[trail] frame {} skipped: no usable camera", self.frames);
            return FrameOutcome::Skipped;
        };
        let stats = self.pool.update(sample.anchor, sample.distance);
        if stats.spawned > 0 {
            log::trace!(
                "[trail] frame {} moved {:.4} -> spawned {}",
                self.frames,
                sample.distance,
                stats.spawned
            );
        }
        FrameOutcome::Updated { sample, stats }
    }

    /// Idle all particles and forget the last anchor.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.pool.clear();
    }

    pub fn tracker(&self) -> &PointerTracker {
        &self.tracker
    }

    pub fn pool(&self) -> &ParticleTrailPool {
        &self.pool
    }

    pub fn buffers(&self) -> &TrailBuffers {
        self.pool.buffers()
    }

    pub fn buffers_mut(&mut self) -> &mut TrailBuffers {
        self.pool.buffers_mut()
    }

    /// Frames seen, including skipped ones.
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn skipped_count(&self) -> u64 {
        self.skipped
    }
}
