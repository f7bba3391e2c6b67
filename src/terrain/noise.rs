//! Coherent 2D height noise

use glam::Vec2;
use noise::{NoiseFn, Perlin};

/// Deterministic gradient noise sampled over the voxel XZ plane.
///
/// Samples are mapped from Perlin's `[-1, 1]` into `[0, 1]`.
#[derive(Clone, Debug)]
pub struct HeightNoise {
    perlin: Perlin,
    scale: f32,
    offset: Vec2,
}

impl HeightNoise {
    pub fn new(seed: u32, scale: f32, offset: Vec2) -> Self {
        Self {
            perlin: Perlin::new(seed),
            scale,
            offset,
        }
    }

    /// Noise value in `[0, 1]` at raw noise-space coordinates
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        let value = self.perlin.get([x as f64, y as f64]);
        (((value + 1.0) / 2.0) as f32).clamp(0.0, 1.0)
    }

    /// Noise value for the voxel column at `(x, z)`
    pub fn at_column(&self, x: u32, z: u32) -> f32 {
        self.sample(
            x as f32 * self.scale + self.offset.x,
            z as f32 * self.scale + self.offset.y,
        )
    }
}
