//! Marching-cubes surface extraction over the shared density field.

use glam::{UVec3, Vec3};

use super::buffer::MeshBuffer;
use super::tables::{self, CORNER_COUNT, CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE};
use crate::core::{Error, Result};
use crate::voxel::chunk::ChunkCoord;
use crate::voxel::density::{DensityField, ISO_LEVEL};
use crate::voxel::world::VoxelWorld;

/// Table-driven triangulator producing terrain-local geometry.
///
/// Vertex positions are lattice coordinates scaled per axis by the physical
/// size of one voxel.
#[derive(Clone, Copy, Debug)]
pub struct MarchingCubes {
    voxel_size: Vec3,
}

impl MarchingCubes {
    pub fn new(voxel_size: Vec3) -> Self {
        Self { voxel_size }
    }

    pub fn voxel_size(&self) -> Vec3 {
        self.voxel_size
    }

    /// Triangulate every cell in the full-height column under `coord`.
    ///
    /// Fails with [`Error::OutOfBounds`] when `coord` lies outside the chunk
    /// partition.
    pub fn extract_chunk(&self, world: &VoxelWorld, coord: ChunkCoord) -> Result<MeshBuffer> {
        let dims = world.dims();
        let chunk_size = dims.chunk_size();
        let min = coord.voxel_origin(chunk_size);
        if coord.x >= dims.width() || coord.z >= dims.width() {
            return Err(Error::OutOfBounds {
                position: min.as_ivec3(),
                grid_size: dims.grid_size(),
            });
        }
        let max = UVec3::new(min.x + chunk_size.x, dims.height(), min.z + chunk_size.z);

        let mesh = self.extract_region(world.density(), min, max);
        log::trace!(
            "extracted chunk ({}, {}): {} triangles",
            coord.x, coord.z, mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Triangulate cells with minimum corner in `[min, max)`, scanning x, z, y.
    pub(crate) fn extract_region(&self, density: &DensityField, min: UVec3, max: UVec3) -> MeshBuffer {
        let mut mesh = MeshBuffer::new();
        for x in min.x..max.x {
            for z in min.z..max.z {
                for y in min.y..max.y {
                    self.march_cell(density, UVec3::new(x, y, z), &mut mesh);
                }
            }
        }
        mesh
    }

    /// Emit the triangles of a single cell, returning how many were added.
    pub(crate) fn march_cell(&self, density: &DensityField, cell: UVec3, mesh: &mut MeshBuffer) -> usize {
        let mut samples = [0.0f32; CORNER_COUNT];
        for (sample, offset) in samples.iter_mut().zip(CORNER_OFFSETS) {
            *sample = density.get(cell + offset);
        }

        let config = configuration(&samples);
        let edges = EDGE_TABLE[config as usize];
        if edges == 0 {
            return 0;
        }

        let mut edge_points = [Vec3::ZERO; 12];
        for (edge, [a, b]) in EDGE_CORNERS.iter().copied().enumerate() {
            if edges & (1 << edge) == 0 {
                continue;
            }
            let p0 = (cell + CORNER_OFFSETS[a]).as_vec3() * self.voxel_size;
            let p1 = (cell + CORNER_OFFSETS[b]).as_vec3() * self.voxel_size;
            edge_points[edge] = interpolate(p0, p1, samples[a], samples[b]);
        }

        let mut emitted = 0;
        for [e0, e1, e2] in tables::triangles(config) {
            mesh.push_triangle([edge_points[e0], edge_points[e1], edge_points[e2]]);
            emitted += 1;
        }
        emitted
    }
}

/// Eight-bit configuration code; bit `i` is set when corner `i` is inside.
pub fn configuration(samples: &[f32; CORNER_COUNT]) -> u8 {
    samples
        .iter()
        .enumerate()
        .filter(|&(_, &d)| DensityField::is_inside(d))
        .fold(0u8, |code, (i, _)| code | (1 << i))
}

/// Point on the segment where density crosses the iso level.
///
/// With binary samples the crossing is always the midpoint.
fn interpolate(p0: Vec3, p1: Vec3, d0: f32, d1: f32) -> Vec3 {
    let delta = d1 - d0;
    if delta.abs() <= f32::EPSILON {
        return p0.lerp(p1, 0.5);
    }
    let t = ((ISO_LEVEL - d0) / delta).clamp(0.0, 1.0);
    p0.lerp(p1, t)
}
