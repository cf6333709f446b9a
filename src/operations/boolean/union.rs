use crate::error::Result;
use crate::solid::{SolidId, SolidStore};

use super::engine::{boolean_execute, BooleanOp};

/// Computes the boolean union of two solids.
pub struct Union {
    solid_a: SolidId,
    solid_b: SolidId,
}

impl Union {
    /// Creates a new `Union` operation.
    #[must_use]
    pub fn new(solid_a: SolidId, solid_b: SolidId) -> Self {
        Self { solid_a, solid_b }
    }

    /// Executes the union, creating the result solid in the store.
    ///
    /// # Errors
    ///
    /// Returns an error if either solid is missing.
    pub fn execute(&self, store: &mut SolidStore) -> Result<SolidId> {
        boolean_execute(store, self.solid_a, self.solid_b, BooleanOp::Union)
    }
}

/// Unions any number of solids, left to right.
///
/// Returns `None` for an empty list. A single solid is returned as is.
pub struct UnionAll {
    solids: Vec<SolidId>,
}

impl UnionAll {
    /// Creates a new `UnionAll` operation.
    #[must_use]
    pub fn new(solids: Vec<SolidId>) -> Self {
        Self { solids }
    }

    /// Executes the union.
    ///
    /// # Errors
    ///
    /// Returns an error if any solid is missing.
    pub fn execute(&self, store: &mut SolidStore) -> Result<Option<SolidId>> {
        let mut iter = self.solids.iter().copied();
        let Some(mut acc) = iter.next() else {
            return Ok(None);
        };
        for next in iter {
            acc = Union::new(acc, next).execute(store)?;
        }
        Ok(Some(acc))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Point2;
    use crate::operations::shaping::ExtrudeLinear;

    fn square(store: &mut SolidStore, x: f64, size: f64) -> SolidId {
        ExtrudeLinear::new(
            vec![
                Point2::new(x, 0.0),
                Point2::new(x + size, 0.0),
                Point2::new(x + size, size),
                Point2::new(x, size),
            ],
            size,
        )
        .execute(store)
        .unwrap()
    }

    #[test]
    fn overlapping_cubes_union_volume() {
        let mut store = SolidStore::new();
        let a = square(&mut store, 0.0, 2.0);
        let b = square(&mut store, 1.0, 2.0);
        let u = Union::new(a, b).execute(&mut store).unwrap();
        assert_relative_eq!(store.solid(u).unwrap().volume(), 12.0, epsilon = 1e-6);
    }

    #[test]
    fn disjoint_union_keeps_both() {
        let mut store = SolidStore::new();
        let a = square(&mut store, 0.0, 1.0);
        let b = square(&mut store, 5.0, 1.0);
        let u = Union::new(a, b).execute(&mut store).unwrap();
        let per_cube = store.solid(a).unwrap().facets.len();
        let solid = store.solid(u).unwrap();
        assert_eq!(solid.facets.len(), 2 * per_cube);
        assert_relative_eq!(solid.volume(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn union_all_of_nothing_is_none() {
        let mut store = SolidStore::new();
        assert!(UnionAll::new(vec![]).execute(&mut store).unwrap().is_none());
    }

    #[test]
    fn union_all_folds_every_solid() {
        let mut store = SolidStore::new();
        let ids = vec![
            square(&mut store, 0.0, 1.0),
            square(&mut store, 3.0, 1.0),
            square(&mut store, 6.0, 1.0),
        ];
        let u = UnionAll::new(ids).execute(&mut store).unwrap().unwrap();
        assert_relative_eq!(store.solid(u).unwrap().volume(), 3.0, epsilon = 1e-9);
    }
}
