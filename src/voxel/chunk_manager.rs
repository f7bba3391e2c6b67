//! Chunk partition of the world and ownership of chunk meshes.

use glam::UVec3;

use super::chunk::{Chunk, ChunkCoord, ChunkState};
use super::grid::GridDims;
use super::world::VoxelWorld;
use crate::mesh::{BlockSink, MarchingCubes, MeshSink};

/// Owns every chunk, addressed directly by chunk coordinate.
///
/// Chunks are stored x-major (`index = x * width + z`), the same order they
/// are created in, so voxel-to-chunk lookup is a division and an index.
pub struct ChunkManager {
    width: u32,
    chunk_size: UVec3,
    chunks: Vec<Chunk>,
    mesh_sink: Option<Box<dyn MeshSink>>,
    block_sink: Option<Box<dyn BlockSink>>,
}

impl ChunkManager {
    /// Create a manager for the given grid; no chunks exist until
    /// [`init_chunks`](Self::init_chunks).
    pub fn new(dims: &GridDims) -> Self {
        Self {
            width: dims.width(),
            chunk_size: dims.chunk_size(),
            chunks: Vec::new(),
            mesh_sink: None,
            block_sink: None,
        }
    }

    pub fn set_mesh_sink(&mut self, sink: Box<dyn MeshSink>) {
        self.mesh_sink = Some(sink);
    }

    pub fn set_block_sink(&mut self, sink: Box<dyn BlockSink>) {
        self.block_sink = Some(sink);
    }

    /// Create all `width x width` chunks, replacing any previous partition.
    pub fn init_chunks(&mut self) {
        let width = self.width;
        self.chunks = (0..width)
            .flat_map(|x| (0..width).map(move |z| Chunk::new(ChunkCoord::new(x, z))))
            .collect();
        log::debug!("initialised {} chunks ({}x{})", self.chunks.len(), width, width);
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// Coordinates of all chunks in creation order
    pub fn coords(&self) -> Vec<ChunkCoord> {
        self.chunks.iter().map(|c| c.coord).collect()
    }

    fn index(&self, coord: ChunkCoord) -> Option<usize> {
        if coord.x < self.width && coord.z < self.width {
            let idx = coord.x as usize * self.width as usize + coord.z as usize;
            (idx < self.chunks.len()).then_some(idx)
        } else {
            None
        }
    }

    pub fn get(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.index(coord).map(|i| &self.chunks[i])
    }

    pub fn get_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.index(coord).map(|i| &mut self.chunks[i])
    }

    /// Coordinate of the chunk owning a voxel
    pub fn coord_at(&self, position: UVec3) -> ChunkCoord {
        ChunkCoord::from_voxel(position, self.chunk_size)
    }

    /// Chunk owning a voxel, `None` outside the partition
    pub fn chunk_at(&self, position: UVec3) -> Option<&Chunk> {
        self.get(self.coord_at(position))
    }

    /// Re-extract one chunk from the density field and publish its mesh.
    ///
    /// Returns `false` when the chunk does not exist or is disposed.
    pub fn remesh(&mut self, world: &VoxelWorld, mesher: &MarchingCubes, coord: ChunkCoord) -> bool {
        let Some(idx) = self.index(coord) else {
            log::warn!("remesh requested for missing chunk ({}, {})", coord.x, coord.z);
            return false;
        };
        let chunk = &mut self.chunks[idx];
        if chunk.state() == ChunkState::Disposed {
            log::warn!("remesh requested for disposed chunk ({}, {})", coord.x, coord.z);
            return false;
        }

        let mesh = match mesher.extract_chunk(world, coord) {
            Ok(mesh) => mesh,
            Err(e) => {
                log::warn!("remesh of chunk ({}, {}) failed: {e}", coord.x, coord.z);
                return false;
            }
        };
        chunk.set_mesh(mesh);
        if let Some(sink) = self.mesh_sink.as_mut() {
            sink.set_mesh(coord, chunk.mesh());
        }
        true
    }

    /// Re-extract every chunk, returning the total triangle count.
    pub fn remesh_all(&mut self, world: &VoxelWorld, mesher: &MarchingCubes) -> usize {
        let mut triangles = 0;
        for coord in self.coords() {
            if self.remesh(world, mesher, coord) {
                triangles += self.get(coord).map_or(0, |c| c.mesh().triangle_count());
            }
        }
        triangles
    }

    /// Show a voxel through the blocky path of its owning chunk.
    pub fn enable_block(&mut self, position: UVec3) -> bool {
        let coord = self.coord_at(position);
        let Some(idx) = self.index(coord) else {
            return false;
        };
        let changed = self.chunks[idx].enable_block(position);
        if changed {
            if let Some(sink) = self.block_sink.as_mut() {
                sink.enable_block(coord, position);
            }
        }
        changed
    }

    /// Hide a voxel from the blocky path of its owning chunk.
    pub fn disable_block(&mut self, position: UVec3) -> bool {
        let coord = self.coord_at(position);
        let Some(idx) = self.index(coord) else {
            return false;
        };
        let changed = self.chunks[idx].disable_block(position);
        if changed {
            if let Some(sink) = self.block_sink.as_mut() {
                sink.disable_block(coord, position);
            }
        }
        changed
    }

    /// Tear down every chunk; they stay disposed until the next
    /// [`init_chunks`](Self::init_chunks).
    pub fn dispose_all(&mut self) {
        for chunk in &mut self.chunks {
            if chunk.state() == ChunkState::Disposed {
                continue;
            }
            chunk.destroy_or_disable();
            if let Some(sink) = self.mesh_sink.as_mut() {
                sink.destroy_or_disable(chunk.coord);
            }
        }
        log::debug!("disposed {} chunks", self.chunks.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshBuffer;
    use crate::voxel::density::DENSITY_SOLID;
    use glam::{IVec3, Vec3};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        meshes: Vec<(ChunkCoord, usize)>,
        disposed: Vec<ChunkCoord>,
        enabled: Vec<UVec3>,
        disabled: Vec<UVec3>,
    }

    struct RecordingSink(Rc<RefCell<Recorder>>);

    impl MeshSink for RecordingSink {
        fn set_mesh(&mut self, coord: ChunkCoord, mesh: &MeshBuffer) {
            self.0.borrow_mut().meshes.push((coord, mesh.triangle_count()));
        }

        fn destroy_or_disable(&mut self, coord: ChunkCoord) {
            self.0.borrow_mut().disposed.push(coord);
        }
    }

    impl BlockSink for RecordingSink {
        fn enable_block(&mut self, _coord: ChunkCoord, position: UVec3) {
            self.0.borrow_mut().enabled.push(position);
        }

        fn disable_block(&mut self, _coord: ChunkCoord, position: UVec3) {
            self.0.borrow_mut().disabled.push(position);
        }
    }

    fn dims() -> GridDims {
        GridDims::new(3, 4, IVec3::new(2, 1, 3)).unwrap()
    }

    #[test]
    fn test_init_chunks() {
        let mut manager = ChunkManager::new(&dims());
        assert!(manager.is_empty());

        manager.init_chunks();
        assert_eq!(manager.len(), 9);
        assert!(manager.iter().all(|c| c.state() == ChunkState::Uninitialized));
        assert_eq!(manager.coords()[0], ChunkCoord::new(0, 0));
        assert_eq!(manager.coords()[1], ChunkCoord::new(0, 1));
        assert_eq!(manager.coords()[3], ChunkCoord::new(1, 0));
    }

    #[test]
    fn test_indexed_lookup_matches_search() {
        let dims = dims();
        let mut manager = ChunkManager::new(&dims);
        manager.init_chunks();

        for pos in dims.voxels() {
            let expected = ChunkCoord::new(pos.x / 2, pos.z / 3);
            let searched = manager.iter().find(|c| c.coord == expected).map(|c| c.coord);
            assert_eq!(manager.chunk_at(pos).map(|c| c.coord), searched);
            assert_eq!(searched, Some(expected));
        }
    }

    #[test]
    fn test_lookup_outside_partition() {
        let mut manager = ChunkManager::new(&dims());
        assert!(manager.get(ChunkCoord::new(0, 0)).is_none());

        manager.init_chunks();
        assert!(manager.get(ChunkCoord::new(3, 0)).is_none());
        assert!(manager.get(ChunkCoord::new(0, 3)).is_none());
        assert!(manager.chunk_at(UVec3::new(6, 0, 0)).is_none());
    }

    #[test]
    fn test_remesh_publishes_to_sink() {
        let dims = dims();
        let mut world = VoxelWorld::new(dims);
        world.density.set(UVec3::new(1, 1, 1), DENSITY_SOLID);

        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut manager = ChunkManager::new(&dims);
        manager.set_mesh_sink(Box::new(RecordingSink(recorder.clone())));
        manager.init_chunks();

        let mesher = MarchingCubes::new(Vec3::ONE);
        let total = manager.remesh_all(&world, &mesher);

        assert!(total > 0);
        assert!(manager.iter().all(|c| c.state() == ChunkState::Meshed));
        let recorded = recorder.borrow();
        assert_eq!(recorded.meshes.len(), 9);
        assert_eq!(recorded.meshes.iter().map(|(_, n)| n).sum::<usize>(), total);
        let origin = recorded.meshes.iter().find(|(c, _)| *c == ChunkCoord::new(0, 0)).unwrap();
        assert!(origin.1 > 0);
    }

    #[test]
    fn test_remesh_missing_chunk() {
        let dims = dims();
        let world = VoxelWorld::new(dims);
        let mut manager = ChunkManager::new(&dims);
        let mesher = MarchingCubes::new(Vec3::ONE);
        assert!(!manager.remesh(&world, &mesher, ChunkCoord::new(0, 0)));
    }

    #[test]
    fn test_block_path_routes_to_owning_chunk() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut manager = ChunkManager::new(&dims());
        manager.set_block_sink(Box::new(RecordingSink(recorder.clone())));
        manager.init_chunks();

        let pos = UVec3::new(3, 2, 4);
        assert!(manager.enable_block(pos));
        assert!(!manager.enable_block(pos));
        assert!(manager.get(ChunkCoord::new(1, 1)).unwrap().is_block_enabled(pos));

        assert!(manager.disable_block(pos));
        assert!(!manager.disable_block(pos));

        let recorded = recorder.borrow();
        assert_eq!(recorded.enabled, vec![pos]);
        assert_eq!(recorded.disabled, vec![pos]);
    }

    #[test]
    fn test_dispose_all() {
        let dims = dims();
        let world = VoxelWorld::new(dims);
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut manager = ChunkManager::new(&dims);
        manager.set_mesh_sink(Box::new(RecordingSink(recorder.clone())));
        manager.init_chunks();
        let mesher = MarchingCubes::new(Vec3::ONE);
        manager.remesh_all(&world, &mesher);

        manager.dispose_all();
        assert!(manager.iter().all(|c| c.state() == ChunkState::Disposed));
        assert_eq!(recorder.borrow().disposed.len(), 9);
        assert!(!manager.remesh(&world, &mesher, ChunkCoord::new(0, 0)));

        // Disposing twice does not notify again
        manager.dispose_all();
        assert_eq!(recorder.borrow().disposed.len(), 9);

        manager.init_chunks();
        assert!(manager.iter().all(|c| c.state() == ChunkState::Uninitialized));
    }
}
