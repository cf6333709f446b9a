use nalgebra::Rotation3;

use crate::error::Result;
use crate::math::Vector3;
use crate::solid::{SolidId, SolidStore};

use super::GeneralTransform;

/// Rotates a solid about the origin by Euler angles.
///
/// The rotation about X is applied first, then Y, then Z.
pub struct Rotate {
    solid: SolidId,
    angles: Vector3,
}

impl Rotate {
    /// Creates a new `Rotate` operation.
    ///
    /// * `angles` - Rotation about X, Y and Z in radians.
    #[must_use]
    pub fn new(solid: SolidId, angles: Vector3) -> Self {
        Self { solid, angles }
    }

    /// Executes the rotation, modifying the solid in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing.
    pub fn execute(&self, store: &mut SolidStore) -> Result<()> {
        let rotation = Rotation3::from_euler_angles(self.angles.x, self.angles.y, self.angles.z);
        GeneralTransform::new(self.solid, rotation.to_homogeneous()).execute(store)
    }
}
