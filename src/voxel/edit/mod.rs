//! Voxel edit system.
//!
//! Edits flip one voxel of the occupancy grid, rebuild the density samples
//! around it and re-extract the affected chunk meshes before returning.

pub mod engine;
pub mod policy;

pub use engine::{EditEngine, EditOutcome};
pub use policy::{EditPolicy, NeighborSweep};
