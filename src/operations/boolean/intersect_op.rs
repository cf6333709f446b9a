use crate::error::Result;
use crate::solid::{SolidId, SolidStore};

use super::engine::{boolean_execute, BooleanOp};

/// Computes the boolean intersection of two solids.
pub struct Intersect {
    solid_a: SolidId,
    solid_b: SolidId,
}

impl Intersect {
    /// Creates a new `Intersect` operation.
    #[must_use]
    pub fn new(solid_a: SolidId, solid_b: SolidId) -> Self {
        Self { solid_a, solid_b }
    }

    /// Executes the intersection, creating the result solid in the store.
    ///
    /// Solids that do not overlap give an empty solid.
    ///
    /// # Errors
    ///
    /// Returns an error if either solid is missing.
    pub fn execute(&self, store: &mut SolidStore) -> Result<SolidId> {
        boolean_execute(store, self.solid_a, self.solid_b, BooleanOp::Intersect)
    }
}
