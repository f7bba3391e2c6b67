//! World grid dimensions and flat-buffer addressing.
//!
//! Occupancy and density are stored as flat contiguous buffers. Both are
//! addressed through [`linear_index`], laid out x-major, then z, then y, which
//! matches the population scan order so a column of voxels is contiguous.

use glam::{IVec3, UVec3};

use crate::core::{Error, Result};

/// Linear index of `pos` inside a dense buffer of extent `size`.
#[inline]
pub fn linear_index(size: UVec3, pos: UVec3) -> usize {
    debug_assert!(pos.x < size.x && pos.y < size.y && pos.z < size.z);
    (pos.x as usize * size.z as usize + pos.z as usize) * size.y as usize + pos.y as usize
}

/// Immutable dimensions of the voxel world.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    width: u32,
    height: u32,
    chunk_size: UVec3,
    grid_size: UVec3,
}

impl GridDims {
    /// Validate and derive the grid dimensions.
    ///
    /// `width` is the number of chunks per horizontal axis, `height` the
    /// voxel height of the world, `chunk_size` the voxel footprint of a chunk.
    /// `chunk_size.y` must be positive but chunks always span the full height.
    pub fn new(width: i32, height: i32, chunk_size: IVec3) -> Result<Self> {
        if width <= 0 {
            return Err(Error::Config(format!("width must be positive, got {width}")));
        }
        if height <= 0 {
            return Err(Error::Config(format!("height must be positive, got {height}")));
        }
        if chunk_size.cmple(IVec3::ZERO).any() {
            return Err(Error::Config(format!(
                "chunk size components must be positive, got {chunk_size}"
            )));
        }

        let width = width as u32;
        let height = height as u32;
        let chunk_size = chunk_size.as_uvec3();

        let overflow = || Error::Config("grid size overflows".to_string());
        let gx = width.checked_mul(chunk_size.x).ok_or_else(overflow)?;
        let gz = width.checked_mul(chunk_size.z).ok_or_else(overflow)?;
        let grid_size = UVec3::new(gx, height, gz);

        // Both lattices must be addressable; the corner lattice is the larger.
        let corners = grid_size + UVec3::ONE;
        (corners.x as usize)
            .checked_mul(corners.y as usize)
            .and_then(|n| n.checked_mul(corners.z as usize))
            .ok_or_else(overflow)?;

        Ok(Self { width, height, chunk_size, grid_size })
    }

    /// Chunks per horizontal axis
    pub fn width(&self) -> u32 {
        self.width
    }

    /// World height in voxels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Voxel footprint of one chunk
    pub fn chunk_size(&self) -> UVec3 {
        self.chunk_size
    }

    /// Voxel extent of the whole world: `(width*cs.x, height, width*cs.z)`
    pub fn grid_size(&self) -> UVec3 {
        self.grid_size
    }

    /// Extent of the density lattice, one sample larger per axis
    pub fn corner_size(&self) -> UVec3 {
        self.grid_size + UVec3::ONE
    }

    pub fn voxel_count(&self) -> usize {
        let s = self.grid_size;
        s.x as usize * s.y as usize * s.z as usize
    }

    pub fn corner_count(&self) -> usize {
        let s = self.corner_size();
        s.x as usize * s.y as usize * s.z as usize
    }

    /// Whether `pos` lies inside `[0, grid_size)` on every axis.
    pub fn contains(&self, pos: IVec3) -> bool {
        pos.cmpge(IVec3::ZERO).all() && pos.as_uvec3().cmplt(self.grid_size).all()
    }

    /// Bounds-check a voxel coordinate, converting it to an unsigned position.
    pub fn check(&self, pos: IVec3) -> Result<UVec3> {
        if self.contains(pos) {
            Ok(pos.as_uvec3())
        } else {
            Err(Error::OutOfBounds { position: pos, grid_size: self.grid_size })
        }
    }

    /// Iterate every voxel coordinate, x outer, z middle, y inner.
    pub fn voxels(&self) -> impl Iterator<Item = UVec3> + use<> {
        let size = self.grid_size;
        (0..size.x).flat_map(move |x| {
            (0..size.z).flat_map(move |z| (0..size.y).map(move |y| UVec3::new(x, y, z)))
        })
    }
}
