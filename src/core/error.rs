//! Error types for terrain generation and editing

use glam::{IVec3, UVec3};
use thiserror::Error;

/// Main error type for the terrain system
#[derive(Debug, Error)]
pub enum Error {
    #[error("voxel position {position} is outside the grid (size {grid_size})")]
    OutOfBounds { position: IVec3, grid_size: UVec3 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
