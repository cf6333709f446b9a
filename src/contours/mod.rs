//! Polygon extraction: figure masks to simplified outline rings.
//!
//! Each figure is traced with Suzuki–Abe border following. Outer borders
//! become top-level polygons, hole borders point at the outer border that
//! encloses them. Islands inside holes are promoted to top-level polygons,
//! so the hierarchy is never deeper than two levels.

use imageproc::contours::{find_contours, BorderType, Contour};
use imageproc::geometry::{approximate_polygon_dp, arc_length};
use tracing::{debug, warn};

use crate::config::ExtractionParams;
use crate::math::polygon_2d::{close_ring, open_ring};
use crate::math::{BoundingBox, Point2};
use crate::raster::{Figure, PixelMask};

/// A closed outline ring.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Ring points; the first point is repeated at the end.
    pub points: Vec<Point2>,
    /// Index of the enclosing outer polygon in the owning [`PolygonSet`],
    /// or `None` for an outer polygon.
    pub parent: Option<usize>,
    pub bounds: BoundingBox,
}

impl Polygon {
    #[must_use]
    pub fn is_outer(&self) -> bool {
        self.parent.is_none()
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            points: self
                .points
                .iter()
                .map(|p| Point2::new(p.x * factor, p.y * factor))
                .collect(),
            parent: self.parent,
            bounds: self.bounds.scaled(factor),
        }
    }
}

/// All polygons of one side, with the bounds of all of them together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolygonSet {
    pub polygons: Vec<Polygon>,
    pub bounds: BoundingBox,
}

impl PolygonSet {
    /// Iterates the outer polygons with their indices.
    pub fn outers(&self) -> impl Iterator<Item = (usize, &Polygon)> {
        self.polygons
            .iter()
            .enumerate()
            .filter(|(_, polygon)| polygon.is_outer())
    }

    /// Iterates the holes whose parent is `index`.
    pub fn holes_of(&self, index: usize) -> impl Iterator<Item = &Polygon> {
        self.polygons
            .iter()
            .filter(move |polygon| polygon.parent == Some(index))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }
}

/// Traces every figure and gathers the polygons into one set, scaled into
/// model units.
pub struct ExtractPolygons<'a> {
    figures: &'a [Figure],
    params: ExtractionParams,
}

impl<'a> ExtractPolygons<'a> {
    /// Creates a new `ExtractPolygons` operation.
    #[must_use]
    pub fn new(figures: &'a [Figure], params: ExtractionParams) -> Self {
        Self { figures, params }
    }

    /// Executes the extraction.
    ///
    /// Parent indices of each figure's holes are shifted by the number of
    /// polygons already collected, so they stay valid in the combined set.
    #[must_use]
    pub fn execute(&self) -> PolygonSet {
        let mut set = PolygonSet::default();
        for figure in self.figures {
            let traced = trace_figure(figure, set.polygons.len(), self.params.epsilon_ratio);
            for polygon in &traced {
                set.bounds.include(&polygon.bounds);
            }
            set.polygons.extend(traced);
        }

        let scale = self.params.scale;
        set.polygons = set.polygons.iter().map(|p| p.scaled(scale)).collect();
        set.bounds = set.bounds.scaled(scale);

        debug!(
            polygons = set.polygons.len(),
            outers = set.outers().count(),
            "extracted polygons"
        );
        set
    }
}

/// Traces one figure into canvas-space polygons.
///
/// `index_offset` is added to every parent index. Borders that simplify to
/// fewer than three distinct points are skipped, and so are the holes of a
/// skipped outer border.
#[must_use]
pub fn trace_figure(figure: &Figure, index_offset: usize, epsilon_ratio: f64) -> Vec<Polygon> {
    let contours = trace_padded(&figure.mask);

    let rings: Vec<Option<Vec<Point2>>> = contours
        .iter()
        .map(|contour| simplify(contour, figure, epsilon_ratio))
        .collect();

    // Position of each kept outer border in the output.
    let mut slot = vec![None; contours.len()];
    let mut kept = 0;
    for (i, contour) in contours.iter().enumerate() {
        if !matches!(contour.border_type, BorderType::Outer) {
            continue;
        }
        if rings[i].is_some() {
            slot[i] = Some(kept);
            kept += 1;
        } else {
            warn!(
                x = figure.offset.x,
                y = figure.offset.y,
                "skipping degenerate outer border"
            );
        }
    }

    let mut polygons = Vec::with_capacity(contours.len());
    for (contour, ring) in contours.iter().zip(rings) {
        let Some(points) = ring else {
            continue;
        };
        let parent = match contour.border_type {
            BorderType::Outer => None,
            BorderType::Hole => {
                let Some(owner) = contour.parent.and_then(|p| slot.get(p).copied().flatten())
                else {
                    warn!(
                        x = figure.offset.x,
                        y = figure.offset.y,
                        "skipping hole without a usable outer border"
                    );
                    continue;
                };
                Some(owner + index_offset)
            }
        };
        polygons.push(Polygon {
            bounds: BoundingBox::from_points(&points),
            points,
            parent,
        });
    }

    // Outers first, in discovery order, so positions match `slot`.
    let (mut ordered, holes): (Vec<Polygon>, Vec<Polygon>) =
        polygons.into_iter().partition(Polygon::is_outer);
    ordered.extend(holes);
    ordered
}

/// Runs border following on a copy of the mask with a one-pixel blank frame,
/// so borders touching the mask edge are closed.
fn trace_padded(mask: &PixelMask) -> Vec<Contour<i32>> {
    if mask.is_blank() {
        return Vec::new();
    }
    let padded = PixelMask::from_fn(mask.width() + 2, mask.height() + 2, |x, y| {
        x > 0 && y > 0 && mask.get(x - 1, y - 1)
    });
    find_contours::<i32>(&padded.to_gray_image())
}

/// Simplifies one border and moves it to canvas coordinates. Returns `None`
/// when fewer than three distinct points remain.
#[allow(clippy::cast_precision_loss)]
fn simplify(contour: &Contour<i32>, figure: &Figure, epsilon_ratio: f64) -> Option<Vec<Point2>> {
    if contour.points.len() < 3 {
        return None;
    }
    let epsilon = epsilon_ratio * arc_length(&contour.points, true);
    let simplified = if epsilon > 0.0 {
        approximate_polygon_dp(&contour.points, epsilon, true)
    } else {
        contour.points.clone()
    };

    // Undo the frame added by `trace_padded`.
    let dx = figure.offset.x as f64 - 1.0;
    let dy = figure.offset.y as f64 - 1.0;
    let canvas: Vec<Point2> = simplified
        .iter()
        .map(|p| Point2::new(f64::from(p.x) + dx, f64::from(p.y) + dy))
        .collect();

    let ring = open_ring(&canvas);
    (ring.len() >= 3).then(|| close_ring(ring))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::raster::PixelPoint;

    fn params(scale: f64) -> ExtractionParams {
        ExtractionParams {
            scale,
            ..ExtractionParams::default()
        }
    }

    fn square(offset: (usize, usize)) -> Figure {
        Figure::new(
            PixelMask::from_fn(10, 10, |_, _| true),
            PixelPoint::new(offset.0, offset.1),
        )
    }

    fn ring(offset: (usize, usize)) -> Figure {
        let mask = PixelMask::from_fn(12, 12, |x, y| {
            !((4..8).contains(&x) && (4..8).contains(&y))
        });
        Figure::new(mask, PixelPoint::new(offset.0, offset.1))
    }

    #[test]
    fn solid_square_gives_one_closed_outer() {
        let polygons = trace_figure(&square((5, 7)), 0, 0.001);
        assert_eq!(polygons.len(), 1);
        let outer = &polygons[0];
        assert!(outer.is_outer());
        assert!(outer.points.len() >= 5);
        assert_eq!(outer.points.first(), outer.points.last());
        assert_relative_eq!(outer.bounds.left, 5.0);
        assert_relative_eq!(outer.bounds.top, 7.0);
        assert_relative_eq!(outer.bounds.right, 14.0);
        assert_relative_eq!(outer.bounds.bottom, 16.0);
    }

    #[test]
    fn ring_gives_outer_and_hole() {
        let polygons = trace_figure(&ring((0, 0)), 3, 0.001);
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0].parent, None);
        assert_eq!(polygons[1].parent, Some(3));
        let hole = polygons[1].bounds;
        let outer = polygons[0].bounds;
        assert!(hole.left > outer.left && hole.right < outer.right);
        assert!(hole.top > outer.top && hole.bottom < outer.bottom);
    }

    #[test]
    fn tiny_figure_is_skipped() {
        let dot = Figure::new(PixelMask::from_fn(1, 1, |_, _| true), PixelPoint::new(3, 3));
        assert!(trace_figure(&dot, 0, 0.001).is_empty());
    }

    #[test]
    fn parent_indices_are_renumbered_across_figures() {
        let figures = [ring((0, 0)), ring((20, 0))];
        let set = ExtractPolygons::new(&figures, params(1.0)).execute();
        assert_eq!(set.polygons.len(), 4);
        assert_eq!(set.polygons[1].parent, Some(0));
        assert_eq!(set.polygons[3].parent, Some(2));
        assert_eq!(set.outers().count(), 2);
        assert_eq!(set.holes_of(2).count(), 1);
    }

    #[test]
    fn set_is_scaled_into_model_units() {
        let figures = [square((10, 20)), square((40, 20))];
        let set = ExtractPolygons::new(&figures, params(0.1)).execute();
        assert_relative_eq!(set.bounds.left, 1.0, epsilon = 1e-9);
        assert_relative_eq!(set.bounds.right, 4.9, epsilon = 1e-9);
        assert_relative_eq!(set.bounds.top, 2.0, epsilon = 1e-9);
        assert_relative_eq!(set.bounds.bottom, 2.9, epsilon = 1e-9);
        for polygon in &set.polygons {
            for p in &polygon.points {
                assert!(p.x >= 1.0 - 1e-9 && p.x <= 4.9 + 1e-9);
            }
        }
    }

    #[test]
    fn no_figures_gives_empty_set() {
        let set = ExtractPolygons::new(&[], params(0.1)).execute();
        assert!(set.is_empty());
        assert!(set.bounds.is_empty());
    }
}
