//! Procedural terrain generation

pub mod config;
pub mod noise;
pub mod populator;
pub mod generator;

pub use config::TerrainConfig;
pub use generator::{GenerationStats, TerrainGenerator};
pub use noise::HeightNoise;
pub use populator::{PopulateStats, populate};
