//! Flat output buffers shared with the renderer.
//!
//! The pool rewrites every slot once per update and raises one refresh flag
//! per buffer. A renderer uploads the flagged buffers verbatim as per-point
//! vertex attributes and then calls [`TrailBuffers::mark_uploaded`].
//!
//! Layout for a pool of `count` particles:
//!
//! | buffer      | length      | contents                  |
//! |-------------|-------------|---------------------------|
//! | `positions` | `count * 3` | `x, y, z` per particle    |
//! | `colors`    | `count * 3` | `r, g, b` per particle    |
//! | `sizes`     | `count`     | point size per particle   |

use glam::Vec3;

/// Which buffers were rewritten since the last upload.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BufferRefresh {
    pub positions: bool,
    pub colors: bool,
    pub sizes: bool,
}

impl BufferRefresh {
    pub fn any(&self) -> bool {
        self.positions || self.colors || self.sizes
    }

    pub fn all(&self) -> bool {
        self.positions && self.colors && self.sizes
    }
}

#[derive(Clone, Debug)]
pub struct TrailBuffers {
    positions: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
    refresh: BufferRefresh,
}

impl TrailBuffers {
    /// Zero-filled buffers for `count` particles. Allocated once.
    pub fn new(count: usize) -> Self {
        Self {
            positions: vec![0.0; count * 3],
            colors: vec![0.0; count * 3],
            sizes: vec![0.0; count],
            refresh: BufferRefresh::default(),
        }
    }

    /// Number of particles the buffers describe.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    pub fn positions_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn colors_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.colors)
    }

    pub fn sizes_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.sizes)
    }

    pub fn refresh(&self) -> BufferRefresh {
        self.refresh
    }

    /// Clear all refresh flags after the renderer has consumed the data.
    pub fn mark_uploaded(&mut self) {
        self.refresh = BufferRefresh::default();
    }

    #[inline]
    pub(crate) fn write(&mut self, slot: usize, position: Vec3, color: [f32; 3], size: f32) {
        let base = slot * 3;
        self.positions[base..base + 3].copy_from_slice(&position.to_array());
        self.colors[base..base + 3].copy_from_slice(&color);
        self.sizes[slot] = size;
    }

    pub(crate) fn flag_all(&mut self) {
        self.refresh = BufferRefresh {
            positions: true,
            colors: true,
            sizes: true,
        };
    }
}
