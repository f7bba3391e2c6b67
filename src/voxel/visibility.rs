//! Exposed-face test for the blocky visual path.

use glam::{IVec3, UVec3};

use super::occupancy::OccupancyGrid;
use super::world::VoxelWorld;
use crate::core::{Error, Result};
use crate::mesh::tables::FACE_NORMALS;

/// Whether a solid voxel has at least one empty in-bounds face neighbour.
///
/// Neighbours outside the grid never count as empty, so a solid voxel on the
/// world edge is hidden when all of its in-bounds neighbours are solid.
pub fn is_visible(occupancy: &OccupancyGrid, position: IVec3) -> Result<bool> {
    match occupancy.get(position) {
        Some(solid) => Ok(solid && has_empty_neighbour(occupancy, position)),
        None => Err(Error::OutOfBounds { position, grid_size: occupancy.size() }),
    }
}

fn has_empty_neighbour(occupancy: &OccupancyGrid, position: IVec3) -> bool {
    FACE_NORMALS
        .iter()
        .any(|&normal| occupancy.get(position + normal) == Some(false))
}

/// Every visible voxel of `world`, in population scan order.
pub fn visible_voxels(world: &VoxelWorld) -> impl Iterator<Item = UVec3> + '_ {
    let occupancy = world.occupancy();
    world
        .dims()
        .voxels()
        .filter(move |&pos| occupancy.is_solid(pos) && has_empty_neighbour(occupancy, pos.as_ivec3()))
}
