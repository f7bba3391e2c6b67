//! Terrain configuration, fixed at construction.

use std::path::Path;

use glam::{IVec3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::voxel::edit::EditPolicy;
use crate::voxel::grid::GridDims;

/// Parameters controlling the size, shape and edit behaviour of a terrain
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Chunks per horizontal axis
    pub width: i32,
    /// World height in voxels
    pub height: i32,
    /// Voxel footprint of one chunk (y must be positive but is not used
    /// for partitioning; chunks span the full height)
    pub chunk_size: IVec3,
    /// Surface bias in [0, 1]; higher values raise the ground
    pub surface_level: f32,
    /// Noise-space distance between neighbouring voxel columns
    pub noise_scale: f32,
    /// Noise-space offset of column (0, 0)
    pub noise_offset: Vec2,
    /// Perlin seed
    pub seed: u32,
    /// Physical size of one voxel
    pub voxel_size: Vec3,
    /// World-space position of the terrain's minimum corner
    pub origin: Vec3,
    /// Maintain the per-voxel blocky visual path alongside the mesh
    pub blocky_visuals: bool,
    /// Neighbour chunk re-extraction on edits
    pub edit_policy: EditPolicy,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 10,
            chunk_size: IVec3::new(16, 10, 16),
            surface_level: 0.5,
            noise_scale: 4.0,
            noise_offset: Vec2::ZERO,
            seed: 0,
            voxel_size: Vec3::ONE,
            origin: Vec3::ZERO,
            blocky_visuals: false,
            edit_policy: EditPolicy::default(),
        }
    }
}

impl TerrainConfig {
    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every constraint and derive the grid dimensions.
    pub fn validate(&self) -> Result<GridDims> {
        if !(0.0..=1.0).contains(&self.surface_level) {
            return Err(Error::Config(format!(
                "surface_level must be in [0, 1], got {}",
                self.surface_level
            )));
        }
        if !self.noise_scale.is_finite() || !self.noise_offset.is_finite() {
            return Err(Error::Config("noise scale and offset must be finite".to_string()));
        }
        if !self.voxel_size.is_finite() || self.voxel_size.cmple(Vec3::ZERO).any() {
            return Err(Error::Config(format!(
                "voxel_size components must be positive, got {}",
                self.voxel_size
            )));
        }
        if !self.origin.is_finite() {
            return Err(Error::Config("origin must be finite".to_string()));
        }
        GridDims::new(self.width, self.height, self.chunk_size)
    }
}
