//! Which neighbouring chunks an edit re-extracts besides its own.

use glam::IVec3;
use serde::{Deserialize, Serialize};

/// Pattern of horizontal probe positions around an edited voxel.
///
/// Every probe that lands in a different chunk than the edited voxel causes
/// that chunk to be re-extracted too.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeighborSweep {
    /// Only the owning chunk is re-extracted
    #[default]
    None,
    /// Probes `(x+i, y, z+i)` for `i` in -1..=1; reaches diagonal chunks
    /// but skips chunks that only touch along a single axis
    Diagonal,
    /// Probes `(x+i, y, z+j)` for `i, j` in -1..=1
    Full,
}

impl NeighborSweep {
    /// Probe positions for an edit at `position`, in visiting order.
    pub fn probes(self, position: IVec3) -> Vec<IVec3> {
        match self {
            NeighborSweep::None => Vec::new(),
            NeighborSweep::Diagonal => (-1..=1)
                .map(|i| position + IVec3::new(i, 0, i))
                .collect(),
            NeighborSweep::Full => (-1..=1)
                .flat_map(|i| (-1..=1).map(move |j| position + IVec3::new(i, 0, j)))
                .collect(),
        }
    }
}

/// Neighbour re-extraction behaviour for both edit kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditPolicy {
    /// Sweep used after adding a voxel
    pub add: NeighborSweep,
    /// Sweep used after removing a voxel
    pub destroy: NeighborSweep,
}

impl Default for EditPolicy {
    fn default() -> Self {
        Self {
            add: NeighborSweep::None,
            destroy: NeighborSweep::Diagonal,
        }
    }
}
