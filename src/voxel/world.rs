//! World container owning the occupancy grid and density field

use glam::{IVec3, UVec3};

use super::density::DensityField;
use super::grid::GridDims;
use super::occupancy::OccupancyGrid;
use crate::core::{Error, Result};

/// Owner of all voxel state for one terrain.
///
/// Only the populator and the edit engine mutate the grids; everything else
/// reads through the shared accessors.
#[derive(Clone, Debug)]
pub struct VoxelWorld {
    dims: GridDims,
    pub(crate) occupancy: OccupancyGrid,
    pub(crate) density: DensityField,
}

impl VoxelWorld {
    /// Allocate an empty world: no solid voxels, every density sample air
    pub fn new(dims: GridDims) -> Self {
        Self {
            occupancy: OccupancyGrid::new(dims.grid_size()),
            density: DensityField::new(dims.corner_size()),
            dims,
        }
    }

    pub fn dims(&self) -> &GridDims {
        &self.dims
    }

    pub fn occupancy(&self) -> &OccupancyGrid {
        &self.occupancy
    }

    pub fn density(&self) -> &DensityField {
        &self.density
    }

    /// Bounds-checked solid lookup
    pub fn is_solid(&self, pos: IVec3) -> Result<bool> {
        let pos = self.dims.check(pos)?;
        Ok(self.occupancy.is_solid(pos))
    }

    /// Bounds-checked density lookup on the corner lattice
    pub fn density_at(&self, corner: IVec3) -> Result<f32> {
        let size = self.dims.corner_size();
        if corner.cmpge(IVec3::ZERO).all() && corner.as_uvec3().cmplt(size).all() {
            Ok(self.density.get(corner.as_uvec3()))
        } else {
            Err(Error::OutOfBounds { position: corner, grid_size: size })
        }
    }

    /// Recompute density at every in-bounds voxel of the 3x3x3 block centred
    /// on `center` from the current occupancy.
    pub(crate) fn refresh_density_around(&mut self, center: UVec3) {
        let center = center.as_ivec3();
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let cell = center + IVec3::new(dx, dy, dz);
                    if !self.dims.contains(cell) {
                        continue;
                    }
                    let cell = cell.as_uvec3();
                    let solid = self.occupancy.is_solid(cell);
                    self.density.set(cell, DensityField::value_for(solid));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voxel::density::{DENSITY_AIR, DENSITY_SOLID};

    fn small_world() -> VoxelWorld {
        VoxelWorld::new(GridDims::new(1, 3, IVec3::new(3, 1, 3)).unwrap())
    }

    #[test]
    fn test_new_world_is_empty() {
        let world = small_world();
        assert_eq!(world.occupancy().solid_count(), 0);
        assert_eq!(world.density_at(IVec3::new(3, 3, 3)).unwrap(), DENSITY_AIR);
    }

    #[test]
    fn test_checked_samplers() {
        let world = small_world();
        assert!(!world.is_solid(IVec3::new(2, 2, 2)).unwrap());
        assert!(matches!(world.is_solid(IVec3::new(3, 0, 0)), Err(Error::OutOfBounds { .. })));
        assert!(world.density_at(IVec3::new(3, 0, 0)).is_ok());
        assert!(matches!(world.density_at(IVec3::new(4, 0, 0)), Err(Error::OutOfBounds { .. })));
    }

    #[test]
    fn test_refresh_density_around_clips_to_grid() {
        let mut world = small_world();
        world.occupancy.set(UVec3::ZERO, true);
        world.occupancy.set(UVec3::new(1, 1, 1), true);
        world.density.set(UVec3::new(2, 2, 2), DENSITY_SOLID);

        world.refresh_density_around(UVec3::ZERO);

        assert_eq!(world.density().get(UVec3::ZERO), DENSITY_SOLID);
        assert_eq!(world.density().get(UVec3::new(1, 1, 1)), DENSITY_SOLID);
        assert_eq!(world.density().get(UVec3::new(1, 0, 0)), DENSITY_AIR);
        // Outside the 3x3x3 neighbourhood: untouched
        assert_eq!(world.density().get(UVec3::new(2, 2, 2)), DENSITY_SOLID);
    }
}
