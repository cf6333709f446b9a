use std::f64::consts::{FRAC_PI_2, PI};

use tracing::{debug, warn};

use crate::config::ExtrusionParams;
use crate::contours::{Polygon, PolygonSet};
use crate::error::{GlyphFuseError, Result};
use crate::math::Vector3;
use crate::operations::boolean::Subtract;
use crate::operations::shaping::ExtrudeLinear;
use crate::operations::transform::{Colorize, Rotate, Translate};
use crate::solid::{Color, SolidId, SolidStore};

use super::{ExtrudedPolygon, Side, Span};

/// Color of a plain outer letter solid.
pub const OUTER_COLOR: Color = [0.0, 1.0, 0.0];
/// Color of an outer letter solid that had holes cut out of it.
pub const HOLED_COLOR: Color = [1.0, 0.0, 0.0];

/// How far hole cutters reach past each cap, so the cut never shares a
/// plane with the letter.
const HOLE_OVERSHOOT: f64 = 1.0;

/// Builds one side's letter solids from its polygons.
///
/// Every outer polygon is extruded by the configured height, its holes are
/// subtracted, and it is tagged with its horizontal span. All solids are then
/// moved so the centre of the polygon set sits at the origin (half the height
/// below it) and turned to face the other side.
pub struct ExtrudeLetters<'a> {
    polygons: &'a PolygonSet,
    params: &'a ExtrusionParams,
    side: Side,
}

impl<'a> ExtrudeLetters<'a> {
    /// Creates a new `ExtrudeLetters` operation.
    #[must_use]
    pub fn new(polygons: &'a PolygonSet, params: &'a ExtrusionParams, side: Side) -> Self {
        Self {
            polygons,
            params,
            side,
        }
    }

    /// Executes the builder, creating the letter solids in the store.
    ///
    /// Outlines the kernel rejects as degenerate are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns an error if a kernel operation fails for another reason.
    pub fn execute(&self, store: &mut SolidStore) -> Result<Vec<ExtrudedPolygon>> {
        let height = self.params.height;
        let mut letters = Vec::new();

        for (index, outer) in self.polygons.outers() {
            let Some(solid) = skip_degenerate(extrude_reversed(store, outer, height, 0.0))? else {
                warn!(side = ?self.side, index, "skipping degenerate outer polygon");
                continue;
            };
            Colorize::new(solid, OUTER_COLOR).execute(store)?;
            let solid = self.cut_holes(store, solid, index)?;

            if store.solid(solid)?.is_empty() {
                warn!(side = ?self.side, index, "letter solid is empty after cutting holes");
                store.remove_solid(solid);
                continue;
            }
            letters.push(ExtrudedPolygon {
                solid,
                span: Span::from_bounds(&outer.bounds),
            });
        }

        let mid = self.polygons.bounds.center();
        let shift = Vector3::new(-mid.x, -mid.y, -height / 2.0);
        let turn = Vector3::new(0.0, self.side.rotation(self.params), 0.0);
        let realign = Vector3::new(FRAC_PI_2, PI, -FRAC_PI_2);
        for letter in &letters {
            Translate::new(letter.solid, shift).execute(store)?;
            Rotate::new(letter.solid, turn).execute(store)?;
            Rotate::new(letter.solid, realign).execute(store)?;
        }

        debug!(side = ?self.side, letters = letters.len(), "extruded letters");
        Ok(letters)
    }

    /// Subtracts every hole of outer polygon `index` from `solid`.
    fn cut_holes(&self, store: &mut SolidStore, solid: SolidId, index: usize) -> Result<SolidId> {
        let height = self.params.height + 2.0 * HOLE_OVERSHOOT;
        let mut current = solid;
        for hole in self.polygons.holes_of(index) {
            let Some(cutter) = skip_degenerate(extrude_reversed(store, hole, height, -HOLE_OVERSHOOT))?
            else {
                warn!(side = ?self.side, index, "skipping degenerate hole polygon");
                continue;
            };
            let cut = Subtract::new(current, cutter).execute(store)?;
            store.remove_solid(cutter);
            store.remove_solid(current);
            Colorize::new(cut, HOLED_COLOR).execute(store)?;
            current = cut;
        }
        Ok(current)
    }
}

/// Extrudes a polygon with its winding reversed, starting at height `z`.
fn extrude_reversed(
    store: &mut SolidStore,
    polygon: &Polygon,
    height: f64,
    z: f64,
) -> Result<SolidId> {
    let outline = polygon.points.iter().rev().copied().collect();
    let solid = ExtrudeLinear::new(outline, height).execute(store)?;
    if z.abs() > 0.0 {
        Translate::new(solid, Vector3::new(0.0, 0.0, z)).execute(store)?;
    }
    Ok(solid)
}

/// Turns a degenerate-geometry error into `None`.
fn skip_degenerate(result: Result<SolidId>) -> Result<Option<SolidId>> {
    match result {
        Ok(solid) => Ok(Some(solid)),
        Err(GlyphFuseError::Kernel(e)) if e.is_degenerate() => {
            debug!(error = %e, "degenerate outline");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
