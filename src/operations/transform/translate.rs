use crate::error::Result;
use crate::math::{Matrix4, Vector3};
use crate::solid::{SolidId, SolidStore};

use super::GeneralTransform;

/// Translates a solid by a displacement vector.
pub struct Translate {
    solid: SolidId,
    displacement: Vector3,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(solid: SolidId, displacement: Vector3) -> Self {
        Self {
            solid,
            displacement,
        }
    }

    /// Executes the translation, modifying the solid in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing.
    pub fn execute(&self, store: &mut SolidStore) -> Result<()> {
        GeneralTransform::new(self.solid, Matrix4::new_translation(&self.displacement))
            .execute(store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point2;
    use crate::operations::shaping::ExtrudeLinear;

    #[test]
    fn translate_moves_bounds() {
        let mut store = SolidStore::new();
        let id = ExtrudeLinear::new(
            vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(0.0, 1.0)],
            2.0,
        )
        .execute(&mut store)
        .unwrap();
        Translate::new(id, Vector3::new(1.0, -2.0, -1.0))
            .execute(&mut store)
            .unwrap();
        let (lo, hi) = store.solid(id).unwrap().aabb().unwrap();
        assert_relative_eq!(lo.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(lo.y, -2.0, epsilon = 1e-12);
        assert_relative_eq!(lo.z, -1.0, epsilon = 1e-12);
        assert_relative_eq!(hi.z, 1.0, epsilon = 1e-12);
    }
}
