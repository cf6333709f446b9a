mod tessellate_solid;

pub use tessellate_solid::TessellateSolid;

use crate::math::{Point3, Vector3};

/// A triangle mesh approximation of a solid's boundary.
#[derive(Debug, Clone, Default)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// One unit normal per triangle.
    pub normals: Vec<Vector3>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

impl TriangleMesh {
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends another mesh, re-indexing its triangles.
    #[allow(clippy::cast_possible_truncation)]
    pub fn merge(&mut self, other: &TriangleMesh) {
        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices
            .extend(other.indices.iter().map(|t| t.map(|i| i + base)));
    }

    /// Iterates triangles as `(normal, [a, b, c])`.
    pub fn triangles(&self) -> impl Iterator<Item = (Vector3, [Point3; 3])> + '_ {
        self.indices.iter().zip(&self.normals).map(|(tri, normal)| {
            (*normal, tri.map(|i| self.vertices[i as usize]))
        })
    }
}
