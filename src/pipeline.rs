//! The generate entry point: two texts in, one fused solid list out.
//!
//! ```text
//! rasterize → split components → segment → extract polygons → extrude → combine
//! ```
//!
//! Each side runs through the first five stages on its own; only the last
//! stage sees both.

use tracing::{debug, info};

use crate::config::FuseConfig;
use crate::contours::ExtractPolygons;
use crate::error::{InputError, RasterError, Result};
use crate::export::solids_to_stl;
use crate::fuse::{Combine, ExtrudeLetters, ExtrudedPolygon, Side};
use crate::raster::{split_components, PixelPoint, TextRasterizer};
use crate::segmentation::Segmenter;
use crate::solid::{SolidId, SolidStore};

/// The result of one generate invocation.
#[derive(Debug)]
pub struct FusedModel {
    /// Owns every solid created along the way.
    pub store: SolidStore,
    /// The final solids, in combination order.
    pub solids: Vec<SolidId>,
}

impl FusedModel {
    /// Serializes the final solids as binary STL.
    ///
    /// # Errors
    ///
    /// Returns an error if there is nothing to export.
    pub fn to_stl_binary(&self) -> Result<Vec<u8>> {
        solids_to_stl(&self.store, &self.solids)
    }
}

/// Fuses two texts into one solid list.
///
/// The configuration is validated and both texts are checked before any
/// geometry work starts.
///
/// # Errors
///
/// Returns [`InputError`] for empty text or an invalid configuration, and
/// raster or kernel errors that cannot be recovered from.
pub fn generate(
    text_a: &str,
    text_b: &str,
    config: &FuseConfig,
    rasterizer: &dyn TextRasterizer,
) -> Result<FusedModel> {
    config.validate()?;
    let text_a = non_empty(text_a, Side::A)?;
    let text_b = non_empty(text_b, Side::B)?;

    let mut store = SolidStore::new();
    let side_a = build_side(text_a, Side::A, config, rasterizer, &mut store)?;
    let side_b = build_side(text_b, Side::B, config, rasterizer, &mut store)?;
    info!(
        side_a = side_a.len(),
        side_b = side_b.len(),
        "letters ready to combine"
    );

    let solids = Combine::new(config.strategy, side_a, side_b).execute(&mut store)?;
    Ok(FusedModel { store, solids })
}

fn non_empty(text: &str, side: Side) -> Result<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::EmptyText { side: side.label() }.into());
    }
    Ok(trimmed)
}

/// Runs one side from text to extruded letters.
fn build_side(
    text: &str,
    side: Side,
    config: &FuseConfig,
    rasterizer: &dyn TextRasterizer,
    store: &mut SolidStore,
) -> Result<Vec<ExtrudedPolygon>> {
    let mask = rasterizer.rasterize(text, &config.raster)?;
    if mask.is_blank() {
        return Err(RasterError::EmptyCanvas.into());
    }

    let figures = split_components(&mask, PixelPoint::new(0, 0));
    drop(mask);
    debug!(?side, figures = figures.len(), "split text into figures");

    let figures = Segmenter::new(config.segmentation.clone()).segment_all(figures);
    info!(?side, figures = figures.len(), "segmented figures");

    let polygons = ExtractPolygons::new(&figures, config.extraction.clone()).execute();
    drop(figures);

    ExtrudeLetters::new(&polygons, &config.extrusion, side).execute(store)
}
