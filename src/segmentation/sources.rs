use crate::config::SegmentationParams;
use crate::raster::PixelMask;

/// Flood-fill seeds found on the scan line near the bottom of a mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceScan {
    /// Row that was scanned.
    pub row: usize,
    /// Seed columns, left to right. At most two.
    pub columns: Vec<usize>,
}

/// Row scanned for sources: `scan_fraction` of the height above the bottom,
/// never past the last row.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn scan_row(height: usize, scan_fraction: f64) -> usize {
    let row = (height as f64 * (1.0 - scan_fraction)).floor().max(0.0) as usize;
    row.min(height.saturating_sub(1))
}

/// Finds the seed columns for a figure's distance fields.
///
/// Every ink run on the scan row yields one seed at its midpoint, or two
/// seeds at `long_run_inset` from each end when the run is longer than
/// `long_run_threshold` (two stems that merged). Interior seeds are dropped
/// so that at most the first and last remain.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn find_sources(mask: &PixelMask, params: &SegmentationParams) -> SourceScan {
    let row = scan_row(mask.height(), params.scan_fraction);
    let mut columns = Vec::new();

    for (start, len) in mask.row_runs(row) {
        if len > params.long_run_threshold {
            let inset = (len as f64 * params.long_run_inset).floor() as usize;
            let last = start + len - 1;
            columns.push(start + inset);
            columns.push(last.saturating_sub(inset).max(start));
        } else {
            columns.push(start + len / 2);
        }
    }

    if columns.len() > 2 {
        let last = columns[columns.len() - 1];
        columns.truncate(1);
        columns.push(last);
    }

    SourceScan { row, columns }
}
