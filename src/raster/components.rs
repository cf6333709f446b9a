use std::collections::HashMap;

use image::Luma;
use imageproc::region_labelling::{connected_components, Connectivity};
use tracing::debug;

use super::figure::{Figure, PixelPoint};
use super::mask::{PixelMask, PixelRect};

/// Splits a mask into one [`Figure`] per 8-connected ink component.
///
/// Each figure is cropped to its component's bounding rectangle and carries
/// the absolute canvas offset `offset + rectangle origin`. Other components
/// that happen to fall inside the rectangle are left out. Components are
/// returned in the order their first pixel appears in a raster scan.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn split_components(mask: &PixelMask, offset: PixelPoint) -> Vec<Figure> {
    if mask.is_blank() {
        return Vec::new();
    }

    let labels = connected_components(&mask.to_gray_image(), Connectivity::Eight, Luma([0u8]));

    let mut slot_of_label: HashMap<u32, usize> = HashMap::new();
    let mut components: Vec<(u32, PixelRect)> = Vec::new();
    for (x, y, pixel) in labels.enumerate_pixels() {
        let label = pixel[0];
        if label == 0 {
            continue;
        }
        let (x, y) = (x as usize, y as usize);
        if let Some(&slot) = slot_of_label.get(&label) {
            components[slot].1.include(x, y);
        } else {
            slot_of_label.insert(label, components.len());
            components.push((label, PixelRect::at(x, y)));
        }
    }

    let figures: Vec<Figure> = components
        .iter()
        .map(|&(label, rect)| {
            let component = PixelMask::from_fn(rect.width(), rect.height(), |x, y| {
                labels.get_pixel((rect.left + x) as u32, (rect.top + y) as u32)[0] == label
            });
            Figure::new(
                component,
                PixelPoint::new(offset.x + rect.left, offset.y + rect.top),
            )
        })
        .collect();

    debug!(components = figures.len(), "split mask into figures");
    figures
}
