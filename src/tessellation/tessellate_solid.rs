use crate::error::Result;
use crate::solid::{SolidId, SolidStore};

use super::TriangleMesh;

/// Tessellates all facets of a solid into a combined triangle mesh.
///
/// Facets are convex, so each is fanned from its first vertex.
pub struct TessellateSolid {
    solid: SolidId,
}

impl TessellateSolid {
    /// Creates a new `TessellateSolid` operation.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the tessellation, returning a combined triangle mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing.
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self, store: &SolidStore) -> Result<TriangleMesh> {
        let solid = store.solid(self.solid)?;
        let mut mesh = TriangleMesh::default();
        for facet in &solid.facets {
            let base = mesh.vertices.len() as u32;
            mesh.vertices.extend_from_slice(&facet.vertices);
            for i in 1..facet.vertices.len().saturating_sub(1) {
                let i = i as u32;
                mesh.indices.push([base, base + i, base + i + 1]);
                mesh.normals.push(facet.plane.normal);
            }
        }
        Ok(mesh)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point2;
    use crate::operations::shaping::ExtrudeLinear;
    use crate::solid::SolidData;

    #[test]
    fn cube_tessellates_to_twelve_triangles() {
        let mut store = SolidStore::new();
        let id = ExtrudeLinear::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
            1.0,
        )
        .execute(&mut store)
        .unwrap();
        let mesh = TessellateSolid::new(id).execute(&store).unwrap();
        assert_eq!(mesh.triangle_count(), 12);
        for (normal, [a, b, c]) in mesh.triangles() {
            let face_normal = (b - a).cross(&(c - a)).normalize();
            assert_relative_eq!(face_normal, normal, epsilon = 1e-9);
        }
    }

    #[test]
    fn empty_solid_gives_empty_mesh() {
        let mut store = SolidStore::new();
        let id = store.add_solid(SolidData::default());
        assert!(TessellateSolid::new(id).execute(&store).unwrap().is_empty());
    }

    #[test]
    fn merge_reindexes() {
        let mut store = SolidStore::new();
        let id = ExtrudeLinear::new(
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)],
            1.0,
        )
        .execute(&mut store)
        .unwrap();
        let mesh = TessellateSolid::new(id).execute(&store).unwrap();
        let mut combined = mesh.clone();
        combined.merge(&mesh);
        assert_eq!(combined.triangle_count(), 2 * mesh.triangle_count());
        let max = combined.indices.iter().flatten().max().copied().unwrap();
        assert_eq!(max as usize, combined.vertices.len() - 1);
    }
}
