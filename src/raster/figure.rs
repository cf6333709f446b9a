use super::mask::{PixelMask, PixelRect};

/// A position on the full-size canvas, in pixels.
pub type PixelPoint = nalgebra::Point2<usize>;

/// One connected ink blob and where it sits on the canvas.
///
/// A figure holds a single letter, or several letters whose strokes touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Figure {
    pub mask: PixelMask,
    pub offset: PixelPoint,
}

impl Figure {
    #[must_use]
    pub fn new(mask: PixelMask, offset: PixelPoint) -> Self {
        Self { mask, offset }
    }

    #[must_use]
    pub fn ink_count(&self) -> usize {
        self.mask.ink_count()
    }

    /// Canvas-space rectangle covered by the mask, or `None` for an empty mask.
    #[must_use]
    pub fn canvas_rect(&self) -> Option<PixelRect> {
        if self.mask.width() == 0 || self.mask.height() == 0 {
            return None;
        }
        Some(PixelRect {
            left: self.offset.x,
            top: self.offset.y,
            right: self.offset.x + self.mask.width() - 1,
            bottom: self.offset.y + self.mask.height() - 1,
        })
    }

    /// Iterates ink pixels in canvas coordinates.
    pub fn canvas_ink(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.mask
            .ink_pixels()
            .map(|(x, y)| (x + self.offset.x, y + self.offset.y))
    }

    /// Crops the mask to its ink, moving the offset so canvas positions are
    /// unchanged. A blank figure becomes an empty 0x0 mask.
    #[must_use]
    pub fn trimmed(&self) -> Figure {
        let mut pixels = self.mask.ink_pixels();
        let Some((x, y)) = pixels.next() else {
            return Figure::new(PixelMask::new(0, 0), self.offset);
        };
        let mut rect = PixelRect::at(x, y);
        for (x, y) in pixels {
            rect.include(x, y);
        }
        Figure::new(
            self.mask.crop(&rect),
            PixelPoint::new(self.offset.x + rect.left, self.offset.y + rect.top),
        )
    }

    /// Pixel-wise OR of two figures on a canvas large enough for both.
    #[must_use]
    pub fn merge(&self, other: &Figure) -> Figure {
        let rect = match (self.canvas_rect(), other.canvas_rect()) {
            (Some(mut a), Some(b)) => {
                a.include(b.left, b.top);
                a.include(b.right, b.bottom);
                a
            }
            (Some(a), None) => a,
            (None, Some(b)) => b,
            (None, None) => return self.clone(),
        };
        let mut mask = PixelMask::new(rect.width(), rect.height());
        for (x, y) in self.canvas_ink().chain(other.canvas_ink()) {
            mask.set(x - rect.left, y - rect.top, true);
        }
        Figure::new(mask, PixelPoint::new(rect.left, rect.top))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn merge_covers_both_rectangles() {
        let a = Figure::new(PixelMask::from_fn(2, 2, |_, _| true), PixelPoint::new(10, 5));
        let b = Figure::new(PixelMask::from_fn(3, 1, |_, _| true), PixelPoint::new(13, 9));
        let merged = a.merge(&b);
        assert_eq!(merged.offset, PixelPoint::new(10, 5));
        assert_eq!((merged.mask.width(), merged.mask.height()), (6, 5));

        let expected: HashSet<_> = a.canvas_ink().chain(b.canvas_ink()).collect();
        let actual: HashSet<_> = merged.canvas_ink().collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn merge_of_overlapping_figures_does_not_double_count() {
        let a = Figure::new(PixelMask::from_fn(4, 1, |_, _| true), PixelPoint::new(0, 0));
        let b = Figure::new(PixelMask::from_fn(4, 1, |_, _| true), PixelPoint::new(2, 0));
        assert_eq!(a.merge(&b).ink_count(), 6);
    }

    #[test]
    fn trimmed_keeps_canvas_positions() {
        let mask = PixelMask::from_fn(6, 5, |x, y| (2..4).contains(&x) && y == 3);
        let figure = Figure::new(mask, PixelPoint::new(10, 10));
        let trimmed = figure.trimmed();
        assert_eq!(trimmed.offset, PixelPoint::new(12, 13));
        assert_eq!((trimmed.mask.width(), trimmed.mask.height()), (2, 1));
        let before: HashSet<_> = figure.canvas_ink().collect();
        let after: HashSet<_> = trimmed.canvas_ink().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn trimming_blank_figure_gives_empty_mask() {
        let figure = Figure::new(PixelMask::new(4, 4), PixelPoint::new(1, 1));
        assert!(figure.trimmed().canvas_rect().is_none());
    }

    #[test]
    fn merge_with_empty_mask_keeps_other() {
        let a = Figure::new(PixelMask::new(0, 0), PixelPoint::new(0, 0));
        let b = Figure::new(PixelMask::from_fn(1, 1, |_, _| true), PixelPoint::new(7, 7));
        let merged = a.merge(&b);
        assert_eq!(merged.offset, PixelPoint::new(7, 7));
        assert_eq!(merged.ink_count(), 1);
    }
}
