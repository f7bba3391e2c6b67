//! Chunks: fixed-footprint, full-height columns of the voxel world

use std::collections::HashSet;
use std::sync::Arc;

use glam::UVec3;

use crate::mesh::MeshBuffer;

/// Coordinate of a chunk in the horizontal chunk grid (y is always 0)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkCoord {
    pub x: u32,
    pub z: u32,
}

impl ChunkCoord {
    /// Create a new chunk coordinate
    pub fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }

    /// Chunk owning a voxel position
    pub fn from_voxel(pos: UVec3, chunk_size: UVec3) -> Self {
        Self {
            x: pos.x / chunk_size.x,
            z: pos.z / chunk_size.z,
        }
    }

    /// Minimum voxel corner of this chunk
    pub fn voxel_origin(&self, chunk_size: UVec3) -> UVec3 {
        UVec3::new(self.x * chunk_size.x, 0, self.z * chunk_size.z)
    }
}

/// Lifecycle of a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkState {
    /// Created but never meshed
    Uninitialized,
    /// Holds a mesh reflecting the density field at its last extraction
    Meshed,
    /// Torn down; no further meshes are accepted
    Disposed,
}

/// A single chunk and the surface geometry it owns.
#[derive(Debug)]
pub struct Chunk {
    /// Coordinate of this chunk in the chunk grid
    pub coord: ChunkCoord,
    state: ChunkState,
    mesh: Arc<MeshBuffer>,
    /// Collision geometry; shares the render mesh once meshed
    collision: Option<Arc<MeshBuffer>>,
    /// Voxels shown by the optional blocky visual path
    enabled_blocks: HashSet<UVec3>,
    /// Incremented on every mesh replacement
    generation: u32,
}

impl Chunk {
    /// Create a new, unmeshed chunk at the given coordinate
    pub fn new(coord: ChunkCoord) -> Self {
        Self {
            coord,
            state: ChunkState::Uninitialized,
            mesh: Arc::new(MeshBuffer::new()),
            collision: None,
            enabled_blocks: HashSet::new(),
            generation: 0,
        }
    }

    pub fn state(&self) -> ChunkState {
        self.state
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }

    pub fn collision_mesh(&self) -> Option<&MeshBuffer> {
        self.collision.as_deref()
    }

    /// Whether the collision shape is the very geometry being rendered
    pub fn shares_collision_geometry(&self) -> bool {
        self.collision.as_ref().is_some_and(|c| Arc::ptr_eq(c, &self.mesh))
    }

    /// Replace the mesh wholesale and reuse it as collision geometry.
    ///
    /// Returns `false` and leaves the chunk untouched once it is disposed.
    pub fn set_mesh(&mut self, mesh: MeshBuffer) -> bool {
        if self.state == ChunkState::Disposed {
            return false;
        }
        self.mesh = Arc::new(mesh);
        self.collision = Some(Arc::clone(&self.mesh));
        self.state = ChunkState::Meshed;
        self.generation = self.generation.wrapping_add(1);
        true
    }

    /// Show a voxel in the blocky path; `true` if it was not shown before
    pub fn enable_block(&mut self, position: UVec3) -> bool {
        self.enabled_blocks.insert(position)
    }

    /// Hide a voxel in the blocky path; `true` if it was shown before
    pub fn disable_block(&mut self, position: UVec3) -> bool {
        self.enabled_blocks.remove(&position)
    }

    pub fn is_block_enabled(&self, position: UVec3) -> bool {
        self.enabled_blocks.contains(&position)
    }

    pub fn enabled_block_count(&self) -> usize {
        self.enabled_blocks.len()
    }

    /// Release the mesh, collision shape and blocks; the chunk is disposed
    pub fn destroy_or_disable(&mut self) {
        self.mesh = Arc::new(MeshBuffer::new());
        self.collision = None;
        self.enabled_blocks.clear();
        self.state = ChunkState::Disposed;
    }
}
