use crate::error::Result;
use crate::solid::{SolidId, SolidStore};

use super::engine::{boolean_execute, BooleanOp};

/// Computes the boolean difference `solid_a - solid_b`.
pub struct Subtract {
    solid_a: SolidId,
    solid_b: SolidId,
}

impl Subtract {
    /// Creates a new `Subtract` operation.
    #[must_use]
    pub fn new(solid_a: SolidId, solid_b: SolidId) -> Self {
        Self { solid_a, solid_b }
    }

    /// Executes the subtraction, creating the result solid in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if either solid is missing.
    pub fn execute(&self, store: &mut SolidStore) -> Result<SolidId> {
        boolean_execute(store, self.solid_a, self.solid_b, BooleanOp::Subtract)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::{Point2, Vector3};
    use crate::operations::shaping::ExtrudeLinear;
    use crate::operations::transform::Translate;

    fn prism(store: &mut SolidStore, lo: f64, hi: f64, height: f64) -> SolidId {
        ExtrudeLinear::new(
            vec![
                Point2::new(lo, lo),
                Point2::new(hi, lo),
                Point2::new(hi, hi),
                Point2::new(lo, hi),
            ],
            height,
        )
        .execute(store)
        .unwrap()
    }

    #[test]
    fn hole_through_block() {
        let mut store = SolidStore::new();
        let block = prism(&mut store, 0.0, 4.0, 1.0);
        let hole = prism(&mut store, 1.0, 3.0, 3.0);
        Translate::new(hole, Vector3::new(0.0, 0.0, -1.0))
            .execute(&mut store)
            .unwrap();
        let result = Subtract::new(block, hole).execute(&mut store).unwrap();
        assert_relative_eq!(store.solid(result).unwrap().volume(), 12.0, epsilon = 1e-6);
    }

    #[test]
    fn subtracting_disjoint_solid_keeps_original() {
        let mut store = SolidStore::new();
        let block = prism(&mut store, 0.0, 1.0, 1.0);
        let far = prism(&mut store, 5.0, 6.0, 1.0);
        let result = Subtract::new(block, far).execute(&mut store).unwrap();
        assert_eq!(
            store.solid(result).unwrap().facets,
            store.solid(block).unwrap().facets
        );
    }
}
