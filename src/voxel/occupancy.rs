//! Per-voxel solid/empty classification.

use glam::{IVec3, UVec3};

use super::grid::linear_index;

/// Dense boolean grid; `true` means the voxel is solid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    size: UVec3,
    cells: Vec<bool>,
}

impl OccupancyGrid {
    /// Create an all-empty grid of the given extent
    pub fn new(size: UVec3) -> Self {
        let len = size.x as usize * size.y as usize * size.z as usize;
        Self { size, cells: vec![false; len] }
    }

    pub fn size(&self) -> UVec3 {
        self.size
    }

    /// Whether the voxel at an in-bounds position is solid
    #[inline]
    pub fn is_solid(&self, pos: UVec3) -> bool {
        self.cells[linear_index(self.size, pos)]
    }

    /// Solid state at a signed position, `None` when out of bounds
    pub fn get(&self, pos: IVec3) -> Option<bool> {
        if pos.cmpge(IVec3::ZERO).all() && pos.as_uvec3().cmplt(self.size).all() {
            Some(self.is_solid(pos.as_uvec3()))
        } else {
            None
        }
    }

    #[inline]
    pub fn set(&mut self, pos: UVec3, solid: bool) {
        let idx = linear_index(self.size, pos);
        self.cells[idx] = solid;
    }

    /// Number of solid voxels
    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let grid = OccupancyGrid::new(UVec3::new(2, 3, 4));
        assert_eq!(grid.solid_count(), 0);
        assert!(!grid.is_solid(UVec3::new(1, 2, 3)));
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = OccupancyGrid::new(UVec3::new(2, 3, 4));
        grid.set(UVec3::new(1, 2, 3), true);
        assert!(grid.is_solid(UVec3::new(1, 2, 3)));
        assert_eq!(grid.get(IVec3::new(1, 2, 3)), Some(true));
        assert_eq!(grid.get(IVec3::new(0, 0, 0)), Some(false));
        assert_eq!(grid.solid_count(), 1);
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = OccupancyGrid::new(UVec3::new(2, 3, 4));
        assert_eq!(grid.get(IVec3::new(-1, 0, 0)), None);
        assert_eq!(grid.get(IVec3::new(2, 0, 0)), None);
        assert_eq!(grid.get(IVec3::new(0, 3, 0)), None);
        assert_eq!(grid.get(IVec3::new(0, 0, 4)), None);
    }
}
