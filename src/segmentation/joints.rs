use tracing::debug;

use super::distance_field::DistanceField;
use crate::raster::PixelRect;

/// Settings for [`find_joints`], taken from the segmentation parameters.
#[derive(Debug, Clone, Copy)]
pub struct JointSearch {
    /// Factor the fields were reduced by.
    pub factor: usize,
    /// A pixel is a joint when its two distances differ by less than this.
    pub tolerance: f64,
    /// Full-resolution padding added around each joint box.
    pub padding: usize,
    /// Full-resolution mask size, used to clamp the boxes.
    pub width: usize,
    pub height: usize,
}

/// Finds the seams between every pair of sources.
///
/// A pixel reached by both fields of a pair whose distances differ by less
/// than the tolerance lies on the watershed between the two sources. Each
/// pair with at least one such pixel contributes the bounding box of all of
/// them, scaled back to full resolution and padded. Unreached pixels never
/// match.
#[must_use]
pub fn find_joints(fields: &[DistanceField], search: &JointSearch) -> Vec<PixelRect> {
    let mut joints = Vec::new();
    if search.width == 0 || search.height == 0 {
        return joints;
    }

    for (i, a) in fields.iter().enumerate() {
        for b in &fields[i + 1..] {
            let mut reduced: Option<PixelRect> = None;
            let mut count = 0usize;
            for y in 0..a.height().min(b.height()) {
                for x in 0..a.width().min(b.width()) {
                    let (Some(da), Some(db)) = (a.get(x, y), b.get(x, y)) else {
                        continue;
                    };
                    if (da - db).abs() >= search.tolerance {
                        continue;
                    }
                    count += 1;
                    match reduced.as_mut() {
                        Some(rect) => rect.include(x, y),
                        None => reduced = Some(PixelRect::at(x, y)),
                    }
                }
            }
            if let Some(rect) = reduced {
                debug!(pixels = count, "joint found between source pair");
                joints.push(to_full_resolution(&rect, search));
            }
        }
    }

    joints
}

/// Maps a rectangle of reduced pixels onto the full-resolution pixels they
/// cover, then pads and clamps it.
fn to_full_resolution(rect: &PixelRect, search: &JointSearch) -> PixelRect {
    let f = search.factor.max(1);
    let max_x = search.width - 1;
    let max_y = search.height - 1;
    PixelRect {
        left: (rect.left * f).saturating_sub(search.padding).min(max_x),
        top: (rect.top * f).saturating_sub(search.padding).min(max_y),
        right: (rect.right * f + f - 1 + search.padding).min(max_x),
        bottom: (rect.bottom * f + f - 1 + search.padding).min(max_y),
    }
}
