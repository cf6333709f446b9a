use std::path::Path;

use ab_glyph::{point, Font, FontVec, GlyphId, PxScale, ScaleFont};
use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::morphology::dilate;
use tracing::debug;

use super::mask::PixelMask;
use crate::config::RasterParams;
use crate::error::{InputError, RasterError, Result};

/// Turns a line of text into a binary ink mask.
pub trait TextRasterizer {
    /// Renders `text` on a single baseline.
    ///
    /// # Errors
    ///
    /// Returns an error if no usable canvas can be produced.
    fn rasterize(&self, text: &str, params: &RasterParams) -> Result<PixelMask>;
}

/// [`TextRasterizer`] backed by an outline font.
///
/// Bold and italic are synthesized: bold dilates the coverage image, italic
/// shears the binarized mask about the baseline.
pub struct GlyphRasterizer {
    font: FontVec,
}

impl GlyphRasterizer {
    /// Loads a TrueType/OpenType font from memory.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::FontLoad`] if the data is not a font.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = FontVec::try_from_vec(data).map_err(|e| InputError::FontLoad(e.to_string()))?;
        Ok(Self { font })
    }

    /// Loads a TrueType/OpenType font file.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::FontLoad`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)
            .map_err(|e| InputError::FontLoad(format!("{}: {e}", path.display())))?;
        Self::from_bytes(data)
    }
}

impl TextRasterizer for GlyphRasterizer {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    fn rasterize(&self, text: &str, params: &RasterParams) -> Result<PixelMask> {
        let scale = PxScale::from(params.font_size_px);
        let scaled = self.font.as_scaled(scale);
        let margin = params.margin_px as f32;
        let baseline = margin + scaled.ascent();

        let mut caret = margin;
        let mut previous: Option<GlyphId> = None;
        let mut glyphs = Vec::new();
        for c in text.chars().filter(|c| !c.is_control()) {
            let id = self.font.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            glyphs.push(id.with_scale_and_position(scale, point(caret, baseline)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }

        let width = (caret + margin).ceil().max(0.0) as u32;
        let height = (baseline - scaled.descent() + margin).ceil().max(0.0) as u32;
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions { width, height }.into());
        }

        let mut canvas = GrayImage::new(width, height);
        for glyph in glyphs {
            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|x, y, coverage| {
                let px = bounds.min.x as i64 + i64::from(x);
                let py = bounds.min.y as i64 + i64::from(y);
                if px < 0 || py < 0 || px >= i64::from(width) || py >= i64::from(height) {
                    return;
                }
                let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                pixel[0] = pixel[0].max(value);
            });
        }

        if params.bold {
            let radius = (params.font_size_px / 48.0).round().clamp(1.0, 255.0) as u8;
            canvas = dilate(&canvas, Norm::LInf, radius);
        }

        let mut mask = PixelMask::from_gray_image(&canvas, params.threshold);
        if params.italic {
            mask = mask.sheared(params.italic_slope, baseline.max(0.0) as usize);
        }

        debug!(
            width = mask.width(),
            height = mask.height(),
            ink = mask.ink_count(),
            "rasterized text"
        );
        Ok(mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GlyphFuseError;

    #[test]
    fn garbage_bytes_are_not_a_font() {
        let result = GlyphRasterizer::from_bytes(vec![0, 1, 2, 3]);
        assert!(matches!(
            result,
            Err(GlyphFuseError::Input(InputError::FontLoad(_)))
        ));
    }

    #[test]
    fn missing_font_file_is_reported() {
        let result = GlyphRasterizer::from_file(Path::new("/nonexistent/font.ttf"));
        assert!(matches!(
            result,
            Err(GlyphFuseError::Input(InputError::FontLoad(_)))
        ));
    }
}
