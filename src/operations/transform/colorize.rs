use crate::error::Result;
use crate::solid::{Color, SolidId, SolidStore};

/// Sets the display color of a solid.
pub struct Colorize {
    solid: SolidId,
    color: Color,
}

impl Colorize {
    /// Creates a new `Colorize` operation.
    #[must_use]
    pub fn new(solid: SolidId, color: Color) -> Self {
        Self { solid, color }
    }

    /// Executes the operation, modifying the solid in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing.
    pub fn execute(&self, store: &mut SolidStore) -> Result<()> {
        store.solid_mut(self.solid)?.color = Some(self.color);
        Ok(())
    }
}
