//! Fixed-capacity dust particle pool.
//!
//! Slots are allocated once and recycled in place. A slot is active while its
//! `life` is above zero; `life` also drives the fade, so there is no separate
//! alive flag to keep in sync. Every [`ParticleTrailPool::update`] makes a
//! single pass in slot order that ages active particles, spends the spawn
//! budget on idle slots, and serializes the slot into [`TrailBuffers`].

use crate::buffers::TrailBuffers;
use crate::config::TrailConfig;
use crate::error::ConfigError;
use glam::{Vec2, Vec3};
use rand::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Planar displacement applied each frame.
    pub velocity: Vec2,
    /// Remaining lifetime in \[0, 1\]; zero means the slot is idle.
    pub life: f32,
    size: f32,
    // frames aged since the last spawn
    age: u32,
}

impl Particle {
    #[inline]
    pub fn is_active(&self) -> bool {
        self.life > 0.0
    }

    /// Point size, fixed when the pool was built.
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }
}

/// Per-update counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Idle slots activated this frame.
    pub spawned: usize,
    /// Particles whose life ran out this frame.
    pub expired: usize,
    /// Particles with life left after the update.
    pub active: usize,
}

pub struct ParticleTrailPool {
    config: TrailConfig,
    particles: Vec<Particle>,
    buffers: TrailBuffers,
    rng: StdRng,
}

impl ParticleTrailPool {
    pub fn new(config: TrailConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sizes = config.sizes;
        let particles = (0..config.count)
            .map(|_| Particle {
                size: if rng.gen::<f32>() < sizes.rare_fraction {
                    sizes.rare_size
                } else {
                    sizes.common_size
                },
                ..Particle::default()
            })
            .collect::<Vec<_>>();
        let mut pool = Self {
            buffers: TrailBuffers::new(config.count),
            config,
            particles,
            rng,
        };
        pool.serialize_all();
        log::debug!(
            "[pool] {} slots, density={} decay={}",
            pool.particles.len(),
            pool.config.spawn_density,
            pool.config.decay_rate
        );
        Ok(pool)
    }

    pub fn config(&self) -> &TrailConfig {
        &self.config
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn active_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_active()).count()
    }

    pub fn buffers(&self) -> &TrailBuffers {
        &self.buffers
    }

    /// Mutable access for clearing refresh flags after an upload.
    pub fn buffers_mut(&mut self) -> &mut TrailBuffers {
        &mut self.buffers
    }

    /// Number of spawns `distance` of anchor travel pays for.
    ///
    /// Negative, NaN and infinite distances pay for nothing.
    pub fn spawn_budget(&self, distance: f32) -> usize {
        if !(distance.is_finite() && distance > 0.0) {
            return 0;
        }
        // f64 keeps e.g. 0.05 * 100 from landing just under 5
        (distance as f64 * self.config.spawn_density as f64).floor() as usize
    }

    /// Advance the whole pool by one frame and rewrite every buffer slot.
    ///
    /// Life is recomputed from the frame count since spawn instead of
    /// subtracted in place, so a particle retires exactly when
    /// `age * decay_rate >= 1` and never sooner.
    pub fn update(&mut self, anchor: Vec3, distance: f32) -> FrameStats {
        let mut budget = if anchor.is_finite() {
            self.spawn_budget(distance)
        } else {
            0
        };
        let mut stats = FrameStats::default();
        let cfg = &self.config;

        for (i, p) in self.particles.iter_mut().enumerate() {
            if p.is_active() {
                p.position.x += p.velocity.x;
                p.position.y += p.velocity.y;
                p.age = p.age.saturating_add(1);
                p.life = remaining_life(p.age, cfg.decay_rate);
                if p.life <= 0.0 {
                    p.life = 0.0;
                    stats.expired += 1;
                }
            } else if budget > 0 {
                respawn(p, anchor, cfg, &mut self.rng);
                budget -= 1;
                stats.spawned += 1;
            }
            if p.is_active() {
                stats.active += 1;
            }
            self.buffers.write(i, p.position, shade(p.life, cfg), p.size);
        }
        self.buffers.flag_all();

        log::trace!(
            "[pool] spawned={} expired={} active={} unspent={}",
            stats.spawned,
            stats.expired,
            stats.active,
            budget
        );
        stats
    }

    /// Idle every slot, e.g. when the effect is remounted.
    pub fn clear(&mut self) {
        for p in &mut self.particles {
            p.life = 0.0;
            p.age = 0;
            p.velocity = Vec2::ZERO;
        }
        self.serialize_all();
    }

    fn serialize_all(&mut self) {
        for (i, p) in self.particles.iter().enumerate() {
            self.buffers
                .write(i, p.position, shade(p.life, &self.config), p.size);
        }
        self.buffers.flag_all();
    }
}

fn respawn(p: &mut Particle, anchor: Vec3, cfg: &TrailConfig, rng: &mut StdRng) {
    let jx = (rng.gen::<f32>() - 0.5) * 2.0 * cfg.jitter;
    let jy = (rng.gen::<f32>() - 0.5) * 2.0 * cfg.jitter;
    p.position = Vec3::new(anchor.x + jx, anchor.y + jy, cfg.plane_depth);

    let angle = rng.gen::<f32>() * std::f32::consts::TAU;
    let speed = rng.gen::<f32>() * cfg.max_speed;
    p.velocity = Vec2::new(angle.cos(), angle.sin()) * speed;
    p.life = 1.0;
    p.age = 0;
}

/// `1 - age * decay` without the drift of repeated f32 subtraction.
#[inline]
fn remaining_life(age: u32, decay_rate: f32) -> f32 {
    (1.0 - age as f64 * decay_rate as f64) as f32
}

#[inline]
fn shade(life: f32, cfg: &TrailConfig) -> [f32; 3] {
    let k = life * cfg.color_boost;
    [k * cfg.tint[0], k * cfg.tint[1], k * cfg.tint[2]]
}
