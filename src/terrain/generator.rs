//! Terrain facade: generation, edits and geometry queries

use std::time::Instant;

use glam::{IVec3, Vec3};

use super::config::TerrainConfig;
use super::noise::HeightNoise;
use super::populator::populate;
use crate::core::Result;
use crate::math::Aabb;
use crate::mesh::{BlockSink, MarchingCubes, MeshSink};
use crate::voxel::chunk_manager::ChunkManager;
use crate::voxel::edit::{EditEngine, EditOutcome};
use crate::voxel::grid::GridDims;
use crate::voxel::visibility::visible_voxels;
use crate::voxel::world::VoxelWorld;

/// Summary of a full terrain build
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub solid_voxels: usize,
    pub chunks: usize,
    pub triangles: usize,
    pub visible_blocks: usize,
}

/// Procedural voxel terrain with marching-cubes chunk meshes.
///
/// Owns the voxel grids and the chunk partition. Every operation is
/// synchronous: when a call returns, grids and meshes are consistent.
pub struct TerrainGenerator {
    config: TerrainConfig,
    dims: GridDims,
    noise: HeightNoise,
    world: VoxelWorld,
    chunks: ChunkManager,
    mesher: MarchingCubes,
    editor: EditEngine,
}

impl TerrainGenerator {
    /// Validate `config` and allocate an empty world.
    pub fn new(config: TerrainConfig) -> Result<Self> {
        let dims = config.validate()?;
        let noise = HeightNoise::new(config.seed, config.noise_scale, config.noise_offset);
        let mesher = MarchingCubes::new(config.voxel_size);
        let editor = EditEngine::new(mesher, config.edit_policy, config.blocky_visuals);

        Ok(Self {
            world: VoxelWorld::new(dims),
            chunks: ChunkManager::new(&dims),
            config,
            dims,
            noise,
            mesher,
            editor,
        })
    }

    /// Attach the receiver of chunk meshes
    pub fn with_mesh_sink(mut self, sink: impl MeshSink + 'static) -> Self {
        self.chunks.set_mesh_sink(Box::new(sink));
        self
    }

    /// Attach the receiver of blocky visibility changes
    pub fn with_block_sink(mut self, sink: impl BlockSink + 'static) -> Self {
        self.chunks.set_block_sink(Box::new(sink));
        self
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    pub fn dims(&self) -> &GridDims {
        &self.dims
    }

    pub fn world(&self) -> &VoxelWorld {
        &self.world
    }

    pub fn chunks(&self) -> &ChunkManager {
        &self.chunks
    }

    /// Build the whole terrain from noise: populate, partition, mesh every
    /// chunk and, when enabled, show every visible block.
    ///
    /// Calling this again tears the previous terrain down first.
    pub fn generate_terrain(&mut self) -> GenerationStats {
        let start = Instant::now();
        if !self.chunks.is_empty() {
            self.teardown();
            self.world = VoxelWorld::new(self.dims);
        }

        let populated = populate(&mut self.world, &self.noise, self.config.surface_level);
        self.chunks.init_chunks();
        let triangles = self.chunks.remesh_all(&self.world, &self.mesher);
        let visible_blocks = if self.config.blocky_visuals {
            self.create_all_visible_blocks()
        } else {
            0
        };

        let stats = GenerationStats {
            solid_voxels: populated.solid_voxels,
            chunks: self.chunks.len(),
            triangles,
            visible_blocks,
        };
        log::info!(
            "Generated terrain {} in {:.1}ms: {} chunks, {} solid voxels, {} triangles",
            self.dims.grid_size(),
            start.elapsed().as_secs_f64() * 1000.0,
            stats.chunks,
            stats.solid_voxels,
            stats.triangles
        );
        stats
    }

    /// Enable every visible voxel in the blocky path of its chunk.
    fn create_all_visible_blocks(&mut self) -> usize {
        let visible: Vec<_> = visible_voxels(&self.world).collect();
        for &pos in &visible {
            self.chunks.enable_block(pos);
        }
        log::debug!("enabled {} visible blocks", visible.len());
        visible.len()
    }

    /// Make a voxel solid and re-extract affected chunks.
    pub fn add_block(&mut self, position: IVec3) -> Result<EditOutcome> {
        self.editor.add_block(&mut self.world, &mut self.chunks, position)
    }

    /// Make a voxel empty and re-extract affected chunks.
    pub fn destroy_block(&mut self, position: IVec3) -> Result<EditOutcome> {
        self.editor.destroy_block(&mut self.world, &mut self.chunks, position)
    }

    /// World-space bounds of the full voxel grid
    pub fn terrain_bounds(&self) -> Aabb {
        let size = self.dims.grid_size().as_vec3() * self.config.voxel_size;
        Aabb::from_center_size(self.config.origin + size * 0.5, size)
    }

    /// World-space centre of the voxel grid
    pub fn terrain_center(&self) -> Vec3 {
        self.terrain_bounds().center()
    }

    /// Dispose every chunk; grids are kept until the next generation.
    pub fn teardown(&mut self) {
        self.chunks.dispose_all();
    }
}
