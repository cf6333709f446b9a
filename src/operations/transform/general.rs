use crate::error::{KernelError, Result};
use crate::math::{Matrix4, Point3};
use crate::solid::{Facet, Plane, SolidId, SolidStore};

/// Applies an arbitrary affine 4x4 matrix to a solid.
pub struct GeneralTransform {
    solid: SolidId,
    matrix: Matrix4,
}

impl GeneralTransform {
    /// Creates a new `GeneralTransform` operation.
    #[must_use]
    pub fn new(solid: SolidId, matrix: Matrix4) -> Self {
        Self { solid, matrix }
    }

    /// Executes the transformation, modifying the solid in-place.
    ///
    /// Every vertex is mapped through the matrix and each facet plane is
    /// refitted. A mirroring matrix reverses facet winding so normals keep
    /// pointing outward.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing or the matrix is singular.
    pub fn execute(&self, store: &mut SolidStore) -> Result<()> {
        let linear = self.matrix.fixed_view::<3, 3>(0, 0).into_owned();
        let det = linear.determinant();
        if det.abs() < f64::EPSILON {
            return Err(KernelError::InvalidInput("transform matrix is singular".into()).into());
        }
        let mirrored = det < 0.0;

        let solid = store.solid_mut(self.solid)?;
        for facet in &mut solid.facets {
            transform_facet(&self.matrix, facet, mirrored);
        }
        Ok(())
    }
}

fn transform_facet(matrix: &Matrix4, facet: &mut Facet, mirrored: bool) {
    for v in &mut facet.vertices {
        *v = transform_point(matrix, v);
    }
    if mirrored {
        facet.vertices.reverse();
    }
    if let Some(plane) = Plane::from_polygon(&facet.vertices) {
        facet.plane = plane;
    }
}

/// Transforms a point by a 4x4 matrix (homogeneous coordinates).
#[must_use]
pub fn transform_point(matrix: &Matrix4, point: &Point3) -> Point3 {
    matrix.transform_point(point)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::{Point2, Vector3};
    use crate::operations::shaping::ExtrudeLinear;

    fn unit_cube(store: &mut SolidStore) -> SolidId {
        ExtrudeLinear::new(
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(1.0, 0.0),
                Point2::new(1.0, 1.0),
                Point2::new(0.0, 1.0),
            ],
            1.0,
        )
        .execute(store)
        .unwrap()
    }

    #[test]
    fn scaling_multiplies_volume() {
        let mut store = SolidStore::new();
        let id = unit_cube(&mut store);
        GeneralTransform::new(id, Matrix4::new_nonuniform_scaling(&Vector3::new(2.0, 3.0, 4.0)))
            .execute(&mut store)
            .unwrap();
        assert_relative_eq!(store.solid(id).unwrap().volume(), 24.0, epsilon = 1e-9);
    }

    #[test]
    fn mirror_keeps_volume_positive() {
        let mut store = SolidStore::new();
        let id = unit_cube(&mut store);
        GeneralTransform::new(id, Matrix4::new_nonuniform_scaling(&Vector3::new(-1.0, 1.0, 1.0)))
            .execute(&mut store)
            .unwrap();
        let solid = store.solid(id).unwrap();
        assert_relative_eq!(solid.volume(), 1.0, epsilon = 1e-9);
        let center = Point3::new(-0.5, 0.5, 0.5);
        assert!(solid.facets.iter().all(|f| f.plane.distance(&center) < 0.0));
    }

    #[test]
    fn singular_matrix_is_rejected() {
        let mut store = SolidStore::new();
        let id = unit_cube(&mut store);
        let flat = Matrix4::new_nonuniform_scaling(&Vector3::new(1.0, 1.0, 0.0));
        assert!(GeneralTransform::new(id, flat).execute(&mut store).is_err());
    }
}
