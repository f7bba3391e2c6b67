//! Voxel data structures and operations

pub mod grid;
pub mod occupancy;
pub mod density;
pub mod world;
pub mod visibility;
pub mod chunk;
pub mod chunk_manager;
pub mod edit;

pub use chunk::{Chunk, ChunkCoord, ChunkState};
pub use chunk_manager::ChunkManager;
pub use density::DensityField;
pub use edit::{EditEngine, EditOutcome, EditPolicy, NeighborSweep};
pub use grid::GridDims;
pub use occupancy::OccupancyGrid;
pub use world::VoxelWorld;
