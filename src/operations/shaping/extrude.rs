use std::collections::{HashMap, HashSet, VecDeque};

use spade::handles::{FixedFaceHandle, InnerTag};
use spade::{ConstrainedDelaunayTriangulation, Point2 as SpadePoint2, Triangulation};
use tracing::warn;

use crate::error::{KernelError, Result};
use crate::math::polygon_2d::{open_ring, signed_area_2d};
use crate::math::{Point2, Point3, TOLERANCE};
use crate::solid::{Facet, SolidData, SolidId, SolidStore};

type Cdt = ConstrainedDelaunayTriangulation<SpadePoint2<f64>>;

/// Extrudes a closed 2-D outline along +Z into a prism.
///
/// The outline may be open or closed (first point repeated) and wound either
/// way. The bottom cap sits at `z = 0`, the top cap at `z = height`.
pub struct ExtrudeLinear {
    outline: Vec<Point2>,
    height: f64,
}

impl ExtrudeLinear {
    /// Creates a new `ExtrudeLinear` operation.
    #[must_use]
    pub fn new(outline: Vec<Point2>, height: f64) -> Self {
        Self { outline, height }
    }

    /// Executes the extrusion, creating the solid in the store.
    ///
    /// # Errors
    ///
    /// Returns [`KernelError::InvalidInput`] for a non-positive height and
    /// [`KernelError::Degenerate`] when the outline has no area.
    pub fn execute(&self, store: &mut SolidStore) -> Result<SolidId> {
        if self.height <= TOLERANCE {
            return Err(KernelError::InvalidInput("extrusion height must be positive".into()).into());
        }

        let mut ring = open_ring(&self.outline);
        if ring.len() < 3 {
            return Err(KernelError::Degenerate(format!(
                "outline has {} distinct points",
                ring.len()
            ))
            .into());
        }
        let area = signed_area_2d(&ring);
        if area.abs() < TOLERANCE {
            return Err(KernelError::Degenerate("outline has zero area".into()).into());
        }
        if area < 0.0 {
            ring.reverse();
        }

        let triangles = triangulate_ring(&ring)?;
        if triangles.is_empty() {
            return Err(KernelError::Degenerate("cap triangulation is empty".into()).into());
        }

        let h = self.height;
        let at = |p: &Point2, z: f64| Point3::new(p.x, p.y, z);
        let mut facets = Vec::with_capacity(triangles.len() * 2 + ring.len());

        for [a, b, c] in &triangles {
            facets.extend(Facet::new(vec![at(a, 0.0), at(c, 0.0), at(b, 0.0)]));
            facets.extend(Facet::new(vec![at(a, h), at(b, h), at(c, h)]));
        }
        for (i, p) in ring.iter().enumerate() {
            let q = &ring[(i + 1) % ring.len()];
            facets.extend(Facet::new(vec![at(p, 0.0), at(q, 0.0), at(q, h), at(p, h)]));
        }

        Ok(store.add_solid(SolidData::new(facets)))
    }
}

/// Triangulates a counter-clockwise ring, returning counter-clockwise
/// triangles that cover its interior.
fn triangulate_ring(ring: &[Point2]) -> Result<Vec<[Point2; 3]>> {
    let mut cdt = Cdt::new();
    let mut handles = Vec::with_capacity(ring.len());
    for p in ring {
        let handle = cdt
            .insert(SpadePoint2::new(p.x, p.y))
            .map_err(|e| KernelError::Triangulation(format!("CDT insert: {e}")))?;
        handles.push(handle);
    }

    let mut skipped = 0usize;
    for i in 0..handles.len() {
        let from = handles[i];
        let to = handles[(i + 1) % handles.len()];
        if from == to {
            continue;
        }
        if cdt.can_add_constraint(from, to) {
            cdt.add_constraint(from, to);
        } else {
            skipped += 1;
        }
    }
    if skipped > 0 {
        warn!(skipped, "outline crosses itself; some edges left unconstrained");
    }

    let interior = classify_interior_faces(&cdt);
    let mut triangles = Vec::with_capacity(interior.len());
    for face in cdt.inner_faces() {
        if !interior.contains(&face.fix().index()) {
            continue;
        }
        let [a, b, c] = face.vertices().map(|v| {
            let pos = v.position();
            Point2::new(pos.x, pos.y)
        });
        let cross = (b - a).perp(&(c - a));
        if cross > 0.0 {
            triangles.push([a, b, c]);
        } else if cross < 0.0 {
            triangles.push([a, c, b]);
        }
    }
    Ok(triangles)
}

/// Marks the inner faces that lie inside the constrained outline.
///
/// Faces next to the outer face start at depth 0; crossing a constraint edge
/// adds one. Odd depth is interior.
fn classify_interior_faces(cdt: &Cdt) -> HashSet<usize> {
    let mut interior = HashSet::new();
    let mut depth_of: HashMap<usize, u32> = HashMap::new();
    let mut queue: VecDeque<(FixedFaceHandle<InnerTag>, u32)> = VecDeque::new();

    let outer = cdt.outer_face().fix();
    for edge in cdt.directed_edges() {
        if edge.face().fix() != outer {
            continue;
        }
        let Some(inner) = edge.rev().face().as_inner() else {
            continue;
        };
        let index = inner.fix().index();
        if depth_of.contains_key(&index) {
            continue;
        }
        let depth = u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
        depth_of.insert(index, depth);
        if depth % 2 == 1 {
            interior.insert(index);
        }
        queue.push_back((inner.fix(), depth));
    }

    while let Some((fix, depth)) = queue.pop_front() {
        for edge in cdt.face(fix).adjacent_edges() {
            let Some(neighbor) = edge.rev().face().as_inner() else {
                continue;
            };
            let index = neighbor.fix().index();
            if depth_of.contains_key(&index) {
                continue;
            }
            let depth = depth + u32::from(cdt.is_constraint_edge(edge.as_undirected().fix()));
            depth_of.insert(index, depth);
            if depth % 2 == 1 {
                interior.insert(index);
            }
            queue.push_back((neighbor.fix(), depth));
        }
    }

    interior
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::GlyphFuseError;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    #[test]
    fn square_prism_volume_and_bounds() {
        let mut store = SolidStore::new();
        let id = ExtrudeLinear::new(pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, 3.0), (0.0, 3.0)]), 5.0)
            .execute(&mut store)
            .unwrap();
        let solid = store.solid(id).unwrap();
        assert_relative_eq!(solid.volume(), 30.0, epsilon = 1e-9);
        let (lo, hi) = solid.aabb().unwrap();
        assert_relative_eq!(lo.z, 0.0);
        assert_relative_eq!(hi.z, 5.0);
    }

    #[test]
    fn clockwise_closed_outline_is_normalized() {
        let mut store = SolidStore::new();
        let outline = pts(&[(0.0, 0.0), (0.0, 3.0), (2.0, 3.0), (2.0, 0.0), (0.0, 0.0)]);
        let id = ExtrudeLinear::new(outline, 1.0).execute(&mut store).unwrap();
        assert_relative_eq!(store.solid(id).unwrap().volume(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn concave_outline_caps_only_cover_interior() {
        // An L shape: 3x3 square minus its top-right 2x2 corner.
        let outline = pts(&[
            (0.0, 0.0),
            (3.0, 0.0),
            (3.0, 1.0),
            (1.0, 1.0),
            (1.0, 3.0),
            (0.0, 3.0),
        ]);
        let mut store = SolidStore::new();
        let id = ExtrudeLinear::new(outline, 2.0).execute(&mut store).unwrap();
        assert_relative_eq!(store.solid(id).unwrap().volume(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn side_facets_point_outward() {
        let mut store = SolidStore::new();
        let id = ExtrudeLinear::new(pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]), 1.0)
            .execute(&mut store)
            .unwrap();
        let center = Point3::new(0.5, 0.5, 0.5);
        for facet in &store.solid(id).unwrap().facets {
            assert!(facet.plane.distance(&center) < 0.0);
        }
    }

    #[test]
    fn collinear_outline_is_degenerate() {
        let mut store = SolidStore::new();
        let result =
            ExtrudeLinear::new(pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]), 1.0).execute(&mut store);
        assert!(matches!(
            result,
            Err(GlyphFuseError::Kernel(KernelError::Degenerate(_)))
        ));
    }

    #[test]
    fn zero_height_is_rejected() {
        let mut store = SolidStore::new();
        let result = ExtrudeLinear::new(pts(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]), 0.0)
            .execute(&mut store);
        assert!(matches!(
            result,
            Err(GlyphFuseError::Kernel(KernelError::InvalidInput(_)))
        ));
    }
}
