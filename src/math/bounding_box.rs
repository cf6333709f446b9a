use super::Point2;

/// An axis-aligned rectangle in image or model space.
///
/// A freshly created box is empty: its sides hold sentinel values
/// (`left`/`top` at `f64::MAX`, `right`/`bottom` at `f64::MIN`) and must not
/// be read until at least one point has been merged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// Creates an empty bounding box.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            left: f64::MAX,
            top: f64::MAX,
            right: f64::MIN,
            bottom: f64::MIN,
        }
    }

    /// Computes the bounding box of a set of points.
    #[must_use]
    pub fn from_points(points: &[Point2]) -> Self {
        let mut bounds = Self::empty();
        for p in points {
            bounds.include_point(p);
        }
        bounds
    }

    /// Returns `true` until a point has been merged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    /// Grows the box to contain `p`.
    pub fn include_point(&mut self, p: &Point2) {
        self.left = self.left.min(p.x);
        self.top = self.top.min(p.y);
        self.right = self.right.max(p.x);
        self.bottom = self.bottom.max(p.y);
    }

    /// Grows the box to contain `other`. Merging an empty box is a no-op.
    pub fn include(&mut self, other: &BoundingBox) {
        if other.is_empty() {
            return;
        }
        self.left = self.left.min(other.left);
        self.top = self.top.min(other.top);
        self.right = self.right.max(other.right);
        self.bottom = self.bottom.max(other.bottom);
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.left + self.right) * 0.5,
            (self.top + self.bottom) * 0.5,
        )
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Returns a copy with every side multiplied by `factor`.
    #[must_use]
    pub fn scaled(&self, factor: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self {
            left: self.left * factor,
            top: self.top * factor,
            right: self.right * factor,
            bottom: self.bottom * factor,
        }
    }
}
