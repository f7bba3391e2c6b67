//! Terravox - chunked voxel terrain with marching-cubes surface extraction

pub mod core;
pub mod math;
pub mod voxel;
pub mod mesh;
pub mod terrain;

pub use terrain::{TerrainConfig, TerrainGenerator};
