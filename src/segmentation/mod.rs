//! Glyph segmentation: splitting figures whose letters touch.
//!
//! ```text
//! sources.rs        — seed columns from the bottom scan line
//! distance_field.rs — path-distance flood fill per seed
//! joints.rs         — near-equidistant seams between seed pairs
//! cut.rs            — carve the seams out, rejoin the two pieces
//! ```
//!
//! Segmentation is best effort. Any cut that does not produce exactly two
//! pieces falls back to keeping the figure whole, so the ink of the input
//! is always fully accounted for by the output figures.

mod cut;
mod distance_field;
mod joints;
mod sources;

pub use cut::{cut_and_rejoin, CutOutcome};
pub use distance_field::{DistanceField, UNREACHED};
pub use joints::{find_joints, JointSearch};
pub use sources::{find_sources, scan_row, SourceScan};

use tracing::{debug, warn};

use crate::config::SegmentationParams;
use crate::raster::Figure;

/// Result of one segmentation pass over a figure.
#[derive(Debug)]
pub enum SplitOutcome {
    /// The figure is treated as a single glyph and returned unchanged.
    Terminal(Figure),
    /// The figure was cut into two glyphs.
    Split(Figure, Figure),
}

/// Splits touching glyphs apart.
///
/// Each output figure of a successful split is segmented again, up to
/// `max_depth` levels.
pub struct Segmenter {
    params: SegmentationParams,
}

impl Segmenter {
    /// Creates a new `Segmenter`.
    #[must_use]
    pub fn new(params: SegmentationParams) -> Self {
        Self { params }
    }

    /// Segments every figure, preserving their order.
    #[must_use]
    pub fn segment_all(&self, figures: Vec<Figure>) -> Vec<Figure> {
        let mut out = Vec::with_capacity(figures.len());
        for figure in figures {
            self.segment_into(figure, 0, &mut out);
        }
        debug!(figures = out.len(), "segmentation finished");
        out
    }

    /// Segments one figure into one or more terminal figures.
    #[must_use]
    pub fn segment(&self, figure: Figure) -> Vec<Figure> {
        let mut out = Vec::new();
        self.segment_into(figure, 0, &mut out);
        out
    }

    fn segment_into(&self, figure: Figure, depth: usize, out: &mut Vec<Figure>) {
        if depth >= self.params.max_depth {
            out.push(figure);
            return;
        }
        match self.split_once(figure) {
            SplitOutcome::Terminal(figure) => out.push(figure),
            SplitOutcome::Split(a, b) => {
                self.segment_into(a, depth + 1, out);
                self.segment_into(b, depth + 1, out);
            }
        }
    }

    /// Runs a single detection and cut pass.
    #[must_use]
    pub fn split_once(&self, figure: Figure) -> SplitOutcome {
        let params = &self.params;
        let scan = find_sources(&figure.mask, params);
        if scan.columns.len() < 2 {
            return SplitOutcome::Terminal(figure);
        }

        let factor = params.downscale_factor.max(1);
        let reduced = figure.mask.downscale(factor);
        let fields: Vec<DistanceField> = scan
            .columns
            .iter()
            .map(|&x| {
                DistanceField::flood(
                    &reduced,
                    (x / factor, scan.row / factor),
                    params.max_flood_iterations,
                )
            })
            .collect();
        drop(reduced);

        let joints = find_joints(
            &fields,
            &JointSearch {
                factor,
                tolerance: params.joint_tolerance,
                padding: params.joint_padding,
                width: figure.mask.width(),
                height: figure.mask.height(),
            },
        );
        drop(fields);
        if joints.is_empty() {
            debug!("no joint between sources; figure kept whole");
            return SplitOutcome::Terminal(figure);
        }

        match cut_and_rejoin(&figure, &joints) {
            CutOutcome::Split(a, b) => {
                let total = figure.ink_count();
                if a.ink_count() >= total || b.ink_count() >= total {
                    debug!("cut made no progress; figure kept whole");
                    return SplitOutcome::Terminal(figure);
                }
                debug!(
                    left = a.ink_count(),
                    right = b.ink_count(),
                    "figure split in two"
                );
                SplitOutcome::Split(a, b)
            }
            CutOutcome::NothingLeft => {
                warn!(
                    x = figure.offset.x,
                    y = figure.offset.y,
                    "joint cut removed all ink; figure kept whole"
                );
                SplitOutcome::Terminal(figure)
            }
            CutOutcome::TooManyPieces(pieces) => {
                warn!(
                    pieces,
                    x = figure.offset.x,
                    y = figure.offset.y,
                    "joint cut produced too many pieces; figure kept whole"
                );
                SplitOutcome::Terminal(figure)
            }
            CutOutcome::StillConnected => {
                debug!("joint cut left figure connected; figure kept whole");
                SplitOutcome::Terminal(figure)
            }
        }
    }
}
