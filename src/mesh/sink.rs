//! Capabilities required from the engine objects that display chunks.
//!
//! The marching-cubes surface is the primary output and goes through
//! [`MeshSink`]. The per-voxel "blocky" representation is an optional
//! alternate renderer behind [`BlockSink`]; a terrain works with either,
//! both, or neither attached.

use glam::UVec3;

use super::buffer::MeshBuffer;
use crate::voxel::chunk::ChunkCoord;

/// Receiver of chunk surface meshes (rendering and collision).
pub trait MeshSink {
    /// Replace the render mesh and collision geometry of a chunk.
    fn set_mesh(&mut self, coord: ChunkCoord, mesh: &MeshBuffer);

    /// Release the visual object of a chunk on teardown or regeneration.
    fn destroy_or_disable(&mut self, coord: ChunkCoord);
}

/// Receiver of per-voxel visibility changes for the blocky visual path.
pub trait BlockSink {
    fn enable_block(&mut self, coord: ChunkCoord, position: UVec3);

    fn disable_block(&mut self, coord: ChunkCoord, position: UVec3);
}
