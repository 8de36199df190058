//! Trail configuration.
//!
//! `TrailConfig` carries the recognised options (`count`, `spawn_density`,
//! `decay_rate`, `color_boost`, `plane_depth`) together with the spawn shape,
//! palette and projection tunables. Start from [`TrailConfig::default`] or one
//! of the presets and adjust with the `with_*` setters; the pool validates it
//! on construction.

use crate::constants::*;
use crate::error::ConfigError;
use crate::pointer::Projection;

/// Two-valued size distribution assigned once per slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizeDistribution {
    pub common_size: f32,
    pub rare_size: f32,
    /// Probability that a slot receives `rare_size`.
    pub rare_fraction: f32,
}

impl Default for SizeDistribution {
    fn default() -> Self {
        Self {
            common_size: COMMON_SIZE,
            rare_size: RARE_SIZE,
            rare_fraction: RARE_FRACTION,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrailConfig {
    pub count: usize,
    pub spawn_density: f32,
    pub decay_rate: f32,
    pub color_boost: f32,
    pub plane_depth: f32,
    pub jitter: f32,
    pub max_speed: f32,
    pub tint: [f32; 3],
    pub sizes: SizeDistribution,
    pub projection: Projection,
    /// Fixed RNG seed; `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
            spawn_density: SPAWN_DENSITY,
            decay_rate: DECAY_RATE,
            color_boost: COLOR_BOOST,
            plane_depth: PLANE_DEPTH,
            jitter: SPAWN_JITTER,
            max_speed: MAX_DRIFT_SPEED,
            tint: WHITE,
            sizes: SizeDistribution::default(),
            projection: Projection::Linear,
            seed: None,
        }
    }
}

impl TrailConfig {
    /// Full-scene look: dense white dust mapped straight onto the viewport.
    pub fn space() -> Self {
        Self {
            count: SPACE_COUNT,
            ..Self::default()
        }
    }

    /// Close-up look: tinted, over-bright dust placed by ray unprojection.
    pub fn hero() -> Self {
        Self {
            color_boost: HERO_COLOR_BOOST,
            tint: HERO_TINT,
            projection: Projection::Ray,
            ..Self::default()
        }
    }

    /// Look up a preset by name (`space` or `hero`).
    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "space" => Some(Self::space()),
            "hero" => Some(Self::hero()),
            _ => None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_spawn_density(mut self, density: f32) -> Self {
        self.spawn_density = density;
        self
    }

    pub fn with_decay_rate(mut self, rate: f32) -> Self {
        self.decay_rate = rate;
        self
    }

    pub fn with_color_boost(mut self, boost: f32) -> Self {
        self.color_boost = boost;
        self
    }

    pub fn with_plane_depth(mut self, depth: f32) -> Self {
        self.plane_depth = depth;
        self
    }

    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_max_speed(mut self, speed: f32) -> Self {
        self.max_speed = speed;
        self
    }

    pub fn with_tint(mut self, tint: [f32; 3]) -> Self {
        self.tint = tint;
        self
    }

    pub fn with_sizes(mut self, sizes: SizeDistribution) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every option; the first violation found is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !(self.decay_rate.is_finite() && self.decay_rate > 0.0 && self.decay_rate <= 1.0) {
            return Err(ConfigError::NonPositiveDecay(self.decay_rate));
        }
        check("spawn_density", self.spawn_density, |v| v >= 0.0)?;
        check("color_boost", self.color_boost, |v| v >= 1.0)?;
        check("plane_depth", self.plane_depth, |_| true)?;
        check("jitter", self.jitter, |v| v >= 0.0)?;
        check("max_speed", self.max_speed, |v| v >= 0.0)?;
        for channel in self.tint {
            check("tint", channel, |v| v >= 0.0)?;
        }

        let s = &self.sizes;
        if !(s.rare_fraction.is_finite() && (0.0..=1.0).contains(&s.rare_fraction)) {
            return Err(ConfigError::InvalidSizeDistribution(
                "rare_fraction must be within [0, 1]",
            ));
        }
        if !(s.common_size.is_finite() && s.common_size > 0.0) {
            return Err(ConfigError::InvalidSizeDistribution(
                "common_size must be positive",
            ));
        }
        if !(s.rare_size.is_finite() && s.rare_size > 0.0) {
            return Err(ConfigError::InvalidSizeDistribution(
                "rare_size must be positive",
            ));
        }
        Ok(())
    }
}

#[inline]
fn check(name: &'static str, value: f32, ok: impl Fn(f32) -> bool) -> Result<(), ConfigError> {
    if value.is_finite() && ok(value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter { name, value })
    }
}
