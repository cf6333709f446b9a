mod facet;

pub use facet::{newell_normal, Facet, Plane};

use slotmap::SlotMap;

use crate::error::KernelError;
use crate::math::Point3;

slotmap::new_key_type! {
    /// Unique identifier for a solid in the solid store.
    pub struct SolidId;
}

/// RGB color in `[0, 1]`.
pub type Color = [f32; 3];

/// A closed polyhedral solid stored as its boundary facets.
///
/// A solid with no facets is valid: it is the empty result of a boolean.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolidData {
    pub facets: Vec<Facet>,
    pub color: Option<Color>,
}

impl SolidData {
    #[must_use]
    pub fn new(facets: Vec<Facet>) -> Self {
        Self {
            facets,
            color: None,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty solid.
    #[must_use]
    pub fn aabb(&self) -> Option<(Point3, Point3)> {
        let mut points = self.facets.iter().flat_map(|f| f.vertices.iter());
        let first = *points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| {
            (lo.inf(p), hi.sup(p))
        }))
    }

    /// Enclosed volume, from the divergence theorem over fan triangles.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let mut six_v = 0.0;
        for facet in &self.facets {
            let v = &facet.vertices;
            for i in 1..v.len().saturating_sub(1) {
                six_v += v[0].coords.dot(&v[i].coords.cross(&v[i + 1].coords));
            }
        }
        six_v / 6.0
    }
}

/// Central arena that owns all solids.
#[derive(Debug, Default)]
pub struct SolidStore {
    solids: SlotMap<SolidId, SolidData>,
}

impl SolidStore {
    /// Creates a new, empty solid store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a solid and returns its ID.
    pub fn add_solid(&mut self, data: SolidData) -> SolidId {
        self.solids.insert(data)
    }

    /// Returns a reference to the solid data.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, KernelError> {
        self.solids.get(id).ok_or(KernelError::SolidNotFound)
    }

    /// Returns a mutable reference to the solid data.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn solid_mut(&mut self, id: SolidId) -> Result<&mut SolidData, KernelError> {
        self.solids.get_mut(id).ok_or(KernelError::SolidNotFound)
    }

    /// Removes a solid that is no longer needed.
    pub fn remove_solid(&mut self, id: SolidId) -> Option<SolidData> {
        self.solids.remove(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn store_round_trips_solids() {
        let mut store = SolidStore::new();
        let id = store.add_solid(SolidData::default());
        assert!(store.solid(id).unwrap().is_empty());
        store.solid_mut(id).unwrap().color = Some([0.0, 1.0, 0.0]);
        assert_eq!(store.solid(id).unwrap().color, Some([0.0, 1.0, 0.0]));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn removed_solid_is_not_found() {
        let mut store = SolidStore::new();
        let id = store.add_solid(SolidData::default());
        store.remove_solid(id);
        assert!(matches!(store.solid(id), Err(KernelError::SolidNotFound)));
        assert!(store.is_empty());
    }

    #[test]
    fn empty_solid_has_no_bounds() {
        assert!(SolidData::default().aabb().is_none());
    }
}
