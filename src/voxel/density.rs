//! Scalar density samples on the voxel-corner lattice.
//!
//! Samples are binary: [`DENSITY_SOLID`] inside terrain, [`DENSITY_AIR`]
//! outside. The lattice is one sample larger than the voxel grid on every
//! axis so each voxel can read all eight of its corners.

use glam::UVec3;

use super::grid::linear_index;

/// Density written for samples inside solid terrain
pub const DENSITY_SOLID: f32 = 0.0;
/// Density written for samples in open air
pub const DENSITY_AIR: f32 = 1.0;
/// Threshold separating inside from outside
pub const ISO_LEVEL: f32 = 0.5;

/// Dense density lattice of extent `grid_size + 1`.
#[derive(Clone, Debug, PartialEq)]
pub struct DensityField {
    size: UVec3,
    samples: Vec<f32>,
}

impl DensityField {
    /// Create a lattice of the given extent with every sample set to air
    pub fn new(size: UVec3) -> Self {
        let len = size.x as usize * size.y as usize * size.z as usize;
        Self { size, samples: vec![DENSITY_AIR; len] }
    }

    pub fn size(&self) -> UVec3 {
        self.size
    }

    #[inline]
    pub fn get(&self, corner: UVec3) -> f32 {
        self.samples[linear_index(self.size, corner)]
    }

    #[inline]
    pub fn set(&mut self, corner: UVec3, value: f32) {
        let idx = linear_index(self.size, corner);
        self.samples[idx] = value;
    }

    /// Density value corresponding to an occupancy state
    #[inline]
    pub fn value_for(solid: bool) -> f32 {
        if solid { DENSITY_SOLID } else { DENSITY_AIR }
    }

    /// Whether a sample counts as inside the surface
    #[inline]
    pub fn is_inside(value: f32) -> bool {
        value < ISO_LEVEL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_air() {
        let field = DensityField::new(UVec3::new(3, 3, 3));
        assert_eq!(field.get(UVec3::ZERO), DENSITY_AIR);
        assert_eq!(field.get(UVec3::new(2, 2, 2)), DENSITY_AIR);
    }

    #[test]
    fn test_set_get() {
        let mut field = DensityField::new(UVec3::new(3, 4, 5));
        field.set(UVec3::new(2, 3, 4), DENSITY_SOLID);
        assert_eq!(field.get(UVec3::new(2, 3, 4)), DENSITY_SOLID);
        assert_eq!(field.get(UVec3::new(2, 3, 3)), DENSITY_AIR);
    }

    #[test]
    fn test_threshold() {
        assert!(DensityField::is_inside(DensityField::value_for(true)));
        assert!(!DensityField::is_inside(DensityField::value_for(false)));
    }
}
