//! Triangle-soup mesh storage handed to renderers and colliders.

use glam::Vec3;

use crate::math::Aabb;

/// Vertex and index lists for one chunk surface.
///
/// Triangles are stored as a soup: every triangle owns three fresh vertices
/// and `indices` simply enumerates them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one triangle
    pub fn push_triangle(&mut self, tri: [Vec3; 3]) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&tri);
        self.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate triangles as vertex triples
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                self.vertices[tri[0] as usize],
                self.vertices[tri[1] as usize],
                self.vertices[tri[2] as usize],
            ]
        })
    }

    /// Bounding box of all vertices, `None` for an empty mesh
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices.iter().copied())
    }

    /// Raw vertex data (tightly packed `[f32; 3]`) for GPU upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Raw `u32` index data for GPU upload
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    /// Order-independent comparison of the triangle sets of two meshes.
    ///
    /// Triangles are compared by exact vertex bit patterns with winding
    /// preserved up to rotation.
    pub fn same_triangles(&self, other: &MeshBuffer) -> bool {
        self.triangle_count() == other.triangle_count()
            && self.triangle_keys() == other.triangle_keys()
    }

    fn triangle_keys(&self) -> Vec<[[u32; 3]; 3]> {
        let mut keys: Vec<_> = self
            .triangles()
            .map(|tri| {
                let mut key = tri.map(|v| v.to_array().map(f32::to_bits));
                // Rotate so the smallest vertex leads; keeps winding intact.
                let lead = (0..3).min_by_key(|&i| key[i]).unwrap_or(0);
                key.rotate_left(lead);
                key
            })
            .collect();
        keys.sort_unstable();
        keys
    }
}
