//! Fills occupancy and density from a height function.
//!
//! Voxels are visited x outer, z middle, y inner. Solid voxels write solid
//! density to all eight of their corners while empty voxels write air to
//! their minimum corner only, so neighbouring voxels overwrite each other's
//! shared corners and the last write wins. Keeping this order is what makes
//! two populations of the same configuration produce identical density
//! fields.

use glam::UVec3;

use super::noise::HeightNoise;
use crate::mesh::tables::CORNER_OFFSETS;
use crate::voxel::density::{DENSITY_AIR, DENSITY_SOLID};
use crate::voxel::world::VoxelWorld;

/// Summary of one population pass
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PopulateStats {
    pub solid_voxels: usize,
    pub empty_voxels: usize,
}

/// Populate `world` from coherent noise.
///
/// The column height threshold is `grid_height * noise(x, z)`.
pub fn populate(world: &mut VoxelWorld, noise: &HeightNoise, surface_level: f32) -> PopulateStats {
    let grid_height = world.dims().height() as f32;
    populate_with(world, surface_level, |x, z| grid_height * noise.at_column(x, z))
}

/// Populate `world` from an arbitrary column height threshold.
///
/// A voxel is solid iff `y <= threshold(x, z) - (1 - surface_level)`.
pub fn populate_with<F>(world: &mut VoxelWorld, surface_level: f32, threshold: F) -> PopulateStats
where
    F: Fn(u32, u32) -> f32,
{
    let size = world.dims().grid_size();
    let mut stats = PopulateStats::default();

    for x in 0..size.x {
        for z in 0..size.z {
            let limit = threshold(x, z) - (1.0 - surface_level);
            for y in 0..size.y {
                let pos = UVec3::new(x, y, z);
                let solid = y as f32 <= limit;
                world.occupancy.set(pos, solid);

                if solid {
                    for offset in CORNER_OFFSETS {
                        world.density.set(pos + offset, DENSITY_SOLID);
                    }
                    stats.solid_voxels += 1;
                } else {
                    world.density.set(pos, DENSITY_AIR);
                    stats.empty_voxels += 1;
                }
            }
        }
    }

    log::debug!(
        "populated {} solid / {} empty voxels",
        stats.solid_voxels, stats.empty_voxels
    );
    stats
}
