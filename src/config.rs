//! Configuration snapshot for one generate invocation.
//!
//! A [`FuseConfig`] is read once at the pipeline entry point and passed down
//! by reference; no stage reads configuration from anywhere else.

use std::f64::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};

/// How the two sides' extrusions are merged into one result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CombineStrategy {
    /// Concatenate both sides without boolean interaction.
    None,
    /// Span-ordered merge-join, intersecting one pair per step.
    #[default]
    OverlapInterleave,
    /// Union each side, then intersect the two unions.
    ZigZag,
}

/// Text rendering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RasterParams {
    /// Glyph height in pixels.
    pub font_size_px: f32,
    /// Blank border around the rendered text, in pixels.
    pub margin_px: u32,
    /// Coverage level (0-255) at or above which a pixel counts as ink.
    pub threshold: u8,
    pub bold: bool,
    pub italic: bool,
    /// Horizontal shift per row used to synthesize italics.
    pub italic_slope: f64,
}

impl Default for RasterParams {
    fn default() -> Self {
        Self {
            font_size_px: 720.0,
            margin_px: 100,
            threshold: 128,
            bold: false,
            italic: false,
            italic_slope: 0.2,
        }
    }
}

/// Tuning constants of the glyph segmentation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationParams {
    /// Distance of the source scan line from the bottom, as a fraction of
    /// the mask height.
    pub scan_fraction: f64,
    /// Runs longer than this (in pixels) are treated as two merged stems.
    pub long_run_threshold: usize,
    /// Where the two sources of a long run sit, as a fraction from each end.
    pub long_run_inset: f64,
    /// Integer reduction applied before the flood fill.
    pub downscale_factor: usize,
    /// Maximum distance difference for a pixel to count as a joint.
    pub joint_tolerance: f64,
    /// Padding (full-resolution pixels) added around each joint box.
    pub joint_padding: usize,
    /// Upper bound on finalized pixels per flood fill.
    pub max_flood_iterations: usize,
    /// How many times an output figure may be resegmented.
    pub max_depth: usize,
}

impl Default for SegmentationParams {
    fn default() -> Self {
        Self {
            scan_fraction: 0.05,
            long_run_threshold: 150,
            long_run_inset: 0.1,
            downscale_factor: 4,
            joint_tolerance: 2.0,
            joint_padding: 2,
            max_flood_iterations: 2_000_000,
            max_depth: 4,
        }
    }
}

/// Contour simplification and pixel-to-model scaling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionParams {
    /// Simplification tolerance as a fraction of the contour's arc length.
    pub epsilon_ratio: f64,
    /// Model units per pixel.
    pub scale: f64,
}

impl Default for ExtractionParams {
    fn default() -> Self {
        Self {
            epsilon_ratio: 0.001,
            scale: 0.1,
        }
    }
}

/// Extrusion depth and the viewing angle of each side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrusionParams {
    pub height: f64,
    /// Rotation about the Y axis applied to side A, in radians.
    pub side_a_rotation: f64,
    /// Rotation about the Y axis applied to side B, in radians.
    pub side_b_rotation: f64,
}

impl Default for ExtrusionParams {
    fn default() -> Self {
        Self {
            height: 500.0,
            side_a_rotation: -FRAC_PI_4,
            side_b_rotation: FRAC_PI_4,
        }
    }
}

/// Everything a generate invocation needs besides the two texts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuseConfig {
    pub strategy: CombineStrategy,
    pub raster: RasterParams,
    pub segmentation: SegmentationParams,
    pub extraction: ExtractionParams,
    pub extrusion: ExtrusionParams,
}

impl FuseConfig {
    /// Parses a JSON document; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidConfig`] if the document does not parse or
    /// fails [`FuseConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| InputError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the pipeline cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::InvalidConfig`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let invalid =
            |msg: &str| -> Result<()> { Err(InputError::InvalidConfig(msg.into()).into()) };
        if self.raster.font_size_px <= 0.0 {
            return invalid("raster.font_size_px must be positive");
        }
        if self.segmentation.downscale_factor == 0 {
            return invalid("segmentation.downscale_factor must be at least 1");
        }
        if !(0.0..1.0).contains(&self.segmentation.scan_fraction) {
            return invalid("segmentation.scan_fraction must be in [0, 1)");
        }
        if !(0.0..0.5).contains(&self.segmentation.long_run_inset) {
            return invalid("segmentation.long_run_inset must be in [0, 0.5)");
        }
        if self.extraction.scale <= 0.0 {
            return invalid("extraction.scale must be positive");
        }
        if self.extrusion.height <= 0.0 {
            return invalid("extrusion.height must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        FuseConfig::default().validate().unwrap();
    }

    #[test]
    fn strategy_uses_kebab_case() {
        let json = serde_json::to_string(&CombineStrategy::OverlapInterleave).unwrap();
        assert_eq!(json, "\"overlap-interleave\"");
        let parsed: CombineStrategy = serde_json::from_str("\"zig-zag\"").unwrap();
        assert_eq!(parsed, CombineStrategy::ZigZag);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config =
            FuseConfig::from_json(r#"{"strategy": "none", "raster": {"bold": true}}"#).unwrap();
        assert_eq!(config.strategy, CombineStrategy::None);
        assert!(config.raster.bold);
        assert_eq!(config.raster.threshold, 128);
        assert_eq!(config.segmentation, SegmentationParams::default());
    }

    #[test]
    fn zero_downscale_is_rejected() {
        let result = FuseConfig::from_json(r#"{"segmentation": {"downscale_factor": 0}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn malformed_json_is_rejected() {
        assert!(FuseConfig::from_json("{not json").is_err());
    }
}
