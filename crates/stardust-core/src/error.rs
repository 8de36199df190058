//! Construction-time errors.
//!
//! The trail is a best-effort visual effect, so nothing fails per frame.
//! Bad configuration is the only thing rejected, and it is rejected before a
//! pool exists.

use thiserror::Error;

/// Reasons a [`TrailConfig`](crate::TrailConfig) is refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// The pool needs at least one slot.
    #[error("particle count must be at least 1")]
    ZeroCapacity,
    /// Particles would never expire.
    #[error("decay rate must be in (0, 1], got {0}")]
    NonPositiveDecay(f32),
    /// A numeric option is NaN, infinite or outside its range.
    #[error("invalid value for `{name}`: {value}")]
    InvalidParameter { name: &'static str, value: f32 },
    /// The size distribution cannot produce valid point sizes.
    #[error("invalid size distribution: {0}")]
    InvalidSizeDistribution(&'static str),
}
