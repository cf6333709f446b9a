use tracing::debug;

use crate::error::Result;
use crate::math::Point3;
use crate::solid::{Facet, SolidData, SolidId, SolidStore};

use super::bsp::BspNode;

/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Subtract,
    Intersect,
}

/// Executes a boolean operation on two solids and stores the result.
///
/// The result takes the color of `solid_a`. An empty result is a valid solid
/// with no facets.
pub fn boolean_execute(
    store: &mut SolidStore,
    solid_a: SolidId,
    solid_b: SolidId,
    op: BooleanOp,
) -> Result<SolidId> {
    let a = store.solid(solid_a)?;
    let b = store.solid(solid_b)?;
    let color = a.color;

    let facets = if aabb_overlap(a.aabb(), b.aabb()) {
        combine(a.facets.clone(), b.facets.clone(), op)
    } else {
        handle_disjoint(a, b, op)
    };

    debug!(?op, facets = facets.len(), "boolean finished");
    Ok(store.add_solid(SolidData { facets, color }))
}

/// Boolean of two solids whose bounding boxes do not touch.
fn handle_disjoint(a: &SolidData, b: &SolidData, op: BooleanOp) -> Vec<Facet> {
    match op {
        BooleanOp::Union => a.facets.iter().chain(&b.facets).cloned().collect(),
        BooleanOp::Subtract => a.facets.clone(),
        BooleanOp::Intersect => Vec::new(),
    }
}

/// Runs the BSP clip sequence for `op`.
fn combine(a: Vec<Facet>, b: Vec<Facet>, op: BooleanOp) -> Vec<Facet> {
    let mut a = BspNode::new(a);
    let mut b = BspNode::new(b);
    match op {
        BooleanOp::Union => {
            a.clip_to(&b);
            b.clip_to(&a);
            b.invert();
            b.clip_to(&a);
            b.invert();
            a.build(b.all_facets());
        }
        BooleanOp::Subtract => {
            a.invert();
            a.clip_to(&b);
            b.clip_to(&a);
            b.invert();
            b.clip_to(&a);
            b.invert();
            a.build(b.all_facets());
            a.invert();
        }
        BooleanOp::Intersect => {
            a.invert();
            b.clip_to(&a);
            b.invert();
            a.clip_to(&b);
            b.clip_to(&a);
            a.build(b.all_facets());
            a.invert();
        }
    }
    a.all_facets()
}

fn aabb_overlap(a: Option<(Point3, Point3)>, b: Option<(Point3, Point3)>) -> bool {
    let (Some((a_min, a_max)), Some((b_min, b_max))) = (a, b) else {
        return false;
    };
    (0..3).all(|i| a_min[i] <= b_max[i] && b_min[i] <= a_max[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn touching_boxes_overlap() {
        let a = Some((p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)));
        let b = Some((p(1.0, 0.0, 0.0), p(2.0, 1.0, 1.0)));
        assert!(aabb_overlap(a, b));
    }

    #[test]
    fn separated_or_empty_boxes_do_not_overlap() {
        let a = Some((p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)));
        let b = Some((p(0.0, 0.0, 2.0), p(1.0, 1.0, 3.0)));
        assert!(!aabb_overlap(a, b));
        assert!(!aabb_overlap(a, None));
    }
}
