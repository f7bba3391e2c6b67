//! Single-voxel add/remove edits with localized re-extraction.

use glam::{IVec3, UVec3};

use super::policy::{EditPolicy, NeighborSweep};
use crate::core::Result;
use crate::mesh::tables::FACE_NORMALS;
use crate::mesh::MarchingCubes;
use crate::voxel::chunk::ChunkCoord;
use crate::voxel::chunk_manager::ChunkManager;
use crate::voxel::visibility::is_visible;
use crate::voxel::world::VoxelWorld;

/// Result of an edit request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// The voxel already had the requested state; nothing was touched
    Unchanged,
    /// The voxel changed; these chunks were re-extracted, owning chunk first
    Applied { remeshed: Vec<ChunkCoord> },
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }

    /// Chunks re-extracted by the edit
    pub fn remeshed(&self) -> &[ChunkCoord] {
        match self {
            EditOutcome::Unchanged => &[],
            EditOutcome::Applied { remeshed } => remeshed,
        }
    }
}

/// Applies voxel edits to a world and keeps chunk meshes in step.
#[derive(Clone, Copy, Debug)]
pub struct EditEngine {
    mesher: MarchingCubes,
    policy: EditPolicy,
    /// Whether the blocky visual path is maintained
    blocky: bool,
}

impl EditEngine {
    pub fn new(mesher: MarchingCubes, policy: EditPolicy, blocky: bool) -> Self {
        Self { mesher, policy, blocky }
    }

    pub fn policy(&self) -> &EditPolicy {
        &self.policy
    }

    /// Make the voxel at `position` solid.
    pub fn add_block(
        &self,
        world: &mut VoxelWorld,
        chunks: &mut ChunkManager,
        position: IVec3,
    ) -> Result<EditOutcome> {
        self.apply(world, chunks, position, true, self.policy.add)
    }

    /// Make the voxel at `position` empty.
    pub fn destroy_block(
        &self,
        world: &mut VoxelWorld,
        chunks: &mut ChunkManager,
        position: IVec3,
    ) -> Result<EditOutcome> {
        self.apply(world, chunks, position, false, self.policy.destroy)
    }

    fn apply(
        &self,
        world: &mut VoxelWorld,
        chunks: &mut ChunkManager,
        position: IVec3,
        solid: bool,
        sweep: NeighborSweep,
    ) -> Result<EditOutcome> {
        let pos = world.dims().check(position)?;
        if world.occupancy.is_solid(pos) == solid {
            log::trace!("edit at {pos} is a no-op (solid = {solid})");
            return Ok(EditOutcome::Unchanged);
        }

        world.occupancy.set(pos, solid);
        if self.blocky {
            self.update_visibility(world, chunks, pos)?;
        }
        world.refresh_density_around(pos);

        let primary = chunks.coord_at(pos);
        let mut remeshed = Vec::with_capacity(4);
        if chunks.remesh(world, &self.mesher, primary) {
            remeshed.push(primary);
        }

        for probe in sweep.probes(position) {
            if !world.dims().contains(probe) {
                continue;
            }
            let coord = chunks.coord_at(probe.as_uvec3());
            if coord == primary || remeshed.contains(&coord) {
                continue;
            }
            if chunks.remesh(world, &self.mesher, coord) {
                remeshed.push(coord);
            }
        }

        log::debug!(
            "{} voxel at {pos}; remeshed {} chunk(s): {:?}",
            if solid { "added" } else { "removed" },
            remeshed.len(),
            remeshed
        );
        Ok(EditOutcome::Applied { remeshed })
    }

    /// Re-evaluate the blocky visibility of the six in-bounds face
    /// neighbours and, beyond those, of the edited voxel itself so an added
    /// voxel is shown and a removed one is hidden.
    fn update_visibility(
        &self,
        world: &VoxelWorld,
        chunks: &mut ChunkManager,
        pos: UVec3,
    ) -> Result<()> {
        let center = pos.as_ivec3();
        let neighbours = FACE_NORMALS
            .iter()
            .map(|&n| center + n)
            .filter(|&n| world.dims().contains(n));

        for voxel in std::iter::once(center).chain(neighbours) {
            if is_visible(world.occupancy(), voxel)? {
                chunks.enable_block(voxel.as_uvec3());
            } else {
                chunks.disable_block(voxel.as_uvec3());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::voxel::density::{DENSITY_AIR, DENSITY_SOLID};
    use crate::voxel::grid::GridDims;
    use glam::Vec3;

    struct Fixture {
        world: VoxelWorld,
        chunks: ChunkManager,
        engine: EditEngine,
    }

    impl Fixture {
        /// Flat terrain: every voxel with `y < ground` is solid and the
        /// density field agrees with occupancy.
        fn flat(width: i32, height: i32, chunk: IVec3, ground: u32, policy: EditPolicy) -> Self {
            let dims = GridDims::new(width, height, chunk).unwrap();
            let mut world = VoxelWorld::new(dims);
            for pos in dims.voxels() {
                if pos.y < ground {
                    world.occupancy.set(pos, true);
                    world.density.set(pos, DENSITY_SOLID);
                }
            }
            let mesher = MarchingCubes::new(Vec3::ONE);
            let mut chunks = ChunkManager::new(&dims);
            chunks.init_chunks();
            chunks.remesh_all(&world, &mesher);
            Self { world, chunks, engine: EditEngine::new(mesher, policy, true) }
        }

        fn add(&mut self, pos: IVec3) -> Result<EditOutcome> {
            self.engine.add_block(&mut self.world, &mut self.chunks, pos)
        }

        fn destroy(&mut self, pos: IVec3) -> Result<EditOutcome> {
            self.engine.destroy_block(&mut self.world, &mut self.chunks, pos)
        }

        fn generations(&self) -> Vec<u32> {
            self.chunks.iter().map(|c| c.generation()).collect()
        }
    }

    #[test]
    fn test_first_voxel_in_empty_world() {
        let mut fx = Fixture::flat(1, 1, IVec3::new(2, 1, 2), 0, EditPolicy::default());
        let coord = ChunkCoord::new(0, 0);
        assert!(fx.chunks.get(coord).unwrap().mesh().is_empty());

        fx.add(IVec3::ZERO).unwrap();

        let mesh = fx.chunks.get(coord).unwrap().mesh();
        assert!(!mesh.is_empty());
        let bounds = mesh.bounds().unwrap();
        assert!(bounds.min.cmpge(Vec3::ZERO).all());
        assert!(bounds.max.cmple(Vec3::ONE).all());
    }

    #[test]
    fn test_add_on_solid_is_noop() {
        let mut fx = Fixture::flat(2, 4, IVec3::new(3, 1, 3), 2, EditPolicy::default());
        let density_before = fx.world.density().clone();
        let generations = fx.generations();

        let outcome = fx.add(IVec3::new(1, 0, 1)).unwrap();

        assert_eq!(outcome, EditOutcome::Unchanged);
        assert_eq!(fx.world.density(), &density_before);
        assert_eq!(fx.generations(), generations);
    }

    #[test]
    fn test_destroy_on_empty_is_noop() {
        let mut fx = Fixture::flat(2, 4, IVec3::new(3, 1, 3), 2, EditPolicy::default());
        let generations = fx.generations();

        let outcome = fx.destroy(IVec3::new(1, 3, 1)).unwrap();

        assert!(!outcome.is_applied());
        assert!(outcome.remeshed().is_empty());
        assert_eq!(fx.generations(), generations);
    }

    #[test]
    fn test_add_updates_density_neighbourhood() {
        let mut fx = Fixture::flat(2, 4, IVec3::new(3, 1, 3), 2, EditPolicy::default());
        let pos = IVec3::new(1, 2, 1);

        let outcome = fx.add(pos).unwrap();

        assert_eq!(outcome.remeshed(), &[ChunkCoord::new(0, 0)]);
        assert!(fx.world.is_solid(pos).unwrap());
        assert_eq!(fx.world.density().get(UVec3::new(1, 2, 1)), DENSITY_SOLID);
        assert_eq!(fx.world.density().get(UVec3::new(1, 3, 1)), DENSITY_AIR);
        assert_eq!(fx.world.density().get(UVec3::new(0, 1, 0)), DENSITY_SOLID);
    }

    #[test]
    fn test_add_then_destroy_round_trip() {
        let mut fx = Fixture::flat(2, 4, IVec3::new(3, 1, 3), 2, EditPolicy::default());
        let pos = IVec3::new(4, 2, 1);
        let occupancy_before = fx.world.occupancy().clone();
        let density_before = fx.world.density().clone();
        let mesh_before = fx.chunks.chunk_at(pos.as_uvec3()).unwrap().mesh().clone();

        assert!(fx.add(pos).unwrap().is_applied());
        let mesh_edited = fx.chunks.chunk_at(pos.as_uvec3()).unwrap().mesh().clone();
        assert!(!mesh_edited.same_triangles(&mesh_before));

        assert!(fx.destroy(pos).unwrap().is_applied());

        assert_eq!(fx.world.occupancy(), &occupancy_before);
        assert_eq!(fx.world.density(), &density_before);
        let mesh_after = fx.chunks.chunk_at(pos.as_uvec3()).unwrap().mesh();
        assert!(mesh_after.same_triangles(&mesh_before));
    }

    #[test]
    fn test_destroy_sweeps_diagonal_chunks() {
        // Chunk boundary at x = 3 and z = 3
        let mut fx = Fixture::flat(2, 4, IVec3::new(3, 1, 3), 2, EditPolicy::default());

        // The corner voxel reaches the diagonal chunk but not (0, 1) or (1, 0)
        let outcome = fx.destroy(IVec3::new(3, 1, 3)).unwrap();
        assert_eq!(outcome.remeshed(), &[ChunkCoord::new(1, 1), ChunkCoord::new(0, 0)]);

        let outcome = fx.destroy(IVec3::new(3, 1, 1)).unwrap();
        assert_eq!(outcome.remeshed(), &[ChunkCoord::new(1, 0), ChunkCoord::new(0, 0)]);
    }

    #[test]
    fn test_full_sweep_reaches_axis_neighbours() {
        let policy = EditPolicy { add: NeighborSweep::Full, destroy: NeighborSweep::Full };
        let mut fx = Fixture::flat(2, 4, IVec3::new(3, 1, 3), 2, policy);

        let outcome = fx.destroy(IVec3::new(3, 1, 3)).unwrap();
        let remeshed = outcome.remeshed();
        assert_eq!(remeshed.len(), 4);
        assert_eq!(remeshed[0], ChunkCoord::new(1, 1));
        for coord in [ChunkCoord::new(0, 0), ChunkCoord::new(0, 1), ChunkCoord::new(1, 0)] {
            assert!(remeshed.contains(&coord));
        }

        let outcome = fx.add(IVec3::new(2, 2, 4)).unwrap();
        assert_eq!(outcome.remeshed(), &[ChunkCoord::new(0, 1), ChunkCoord::new(1, 1)]);
    }

    #[test]
    fn test_add_default_policy_remeshes_owner_only() {
        let mut fx = Fixture::flat(2, 4, IVec3::new(3, 1, 3), 2, EditPolicy::default());
        let outcome = fx.add(IVec3::new(3, 2, 3)).unwrap();
        assert_eq!(outcome.remeshed(), &[ChunkCoord::new(1, 1)]);
    }

    #[test]
    fn test_edits_reject_out_of_bounds() {
        let mut fx = Fixture::flat(1, 2, IVec3::new(2, 1, 2), 1, EditPolicy::default());
        let generations = fx.generations();

        for pos in [IVec3::new(-1, 0, 0), IVec3::new(2, 0, 0), IVec3::new(0, 2, 0), IVec3::new(0, 0, 5)] {
            assert!(matches!(fx.add(pos), Err(Error::OutOfBounds { .. })));
            assert!(matches!(fx.destroy(pos), Err(Error::OutOfBounds { .. })));
        }
        assert_eq!(fx.generations(), generations);
    }

    #[test]
    fn test_blocky_visibility_follows_edits() {
        let mut fx = Fixture::flat(1, 4, IVec3::new(3, 1, 3), 2, EditPolicy::default());
        let below = UVec3::new(1, 1, 1);
        let target = IVec3::new(1, 2, 1);

        fx.add(target).unwrap();
        let chunk = fx.chunks.get(ChunkCoord::new(0, 0)).unwrap();
        assert!(chunk.is_block_enabled(target.as_uvec3()));
        assert!(!chunk.is_block_enabled(below));

        fx.destroy(target).unwrap();
        let chunk = fx.chunks.get(ChunkCoord::new(0, 0)).unwrap();
        assert!(!chunk.is_block_enabled(target.as_uvec3()));
        assert!(chunk.is_block_enabled(below));
    }
}
