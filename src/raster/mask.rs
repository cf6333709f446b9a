use image::{GrayImage, Luma};

/// Grey level written for ink pixels when a mask is exported as an image.
pub const INK: u8 = 255;

/// A rectangular grid of ink/background pixels.
///
/// The mask knows nothing about where it sits on the canvas; that is the job
/// of [`Figure`](super::Figure). Reads outside the grid return background.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMask {
    width: usize,
    height: usize,
    ink: Vec<bool>,
}

/// An inclusive pixel rectangle inside a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl PixelRect {
    /// Creates a rectangle covering a single pixel.
    #[must_use]
    pub fn at(x: usize, y: usize) -> Self {
        Self {
            left: x,
            top: y,
            right: x,
            bottom: y,
        }
    }

    /// Grows the rectangle to cover `(x, y)`.
    pub fn include(&mut self, x: usize, y: usize) {
        self.left = self.left.min(x);
        self.top = self.top.min(y);
        self.right = self.right.max(x);
        self.bottom = self.bottom.max(y);
    }

    #[must_use]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }
}

impl PixelMask {
    /// Creates an all-background mask.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ink: vec![false; width * height],
        }
    }

    /// Creates a mask whose ink is given by `f(x, y)`.
    #[must_use]
    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                mask.ink[y * width + x] = f(x, y);
            }
        }
        mask
    }

    /// Binarizes a grey image: pixels at or above `threshold` are ink.
    #[must_use]
    pub fn from_gray_image(image: &GrayImage, threshold: u8) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let mut mask = Self::new(width, height);
        for (x, y, pixel) in image.enumerate_pixels() {
            if pixel[0] >= threshold {
                mask.ink[y as usize * width + x as usize] = true;
            }
        }
        mask
    }

    /// Exports the mask as a grey image with ink at [`INK`] and background at 0.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_gray_image(&self) -> GrayImage {
        GrayImage::from_fn(self.width as u32, self.height as u32, |x, y| {
            if self.get(x as usize, y as usize) {
                Luma([INK])
            } else {
                Luma([0])
            }
        })
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns whether `(x, y)` is ink. Out-of-range reads are background.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.ink[y * self.width + x]
    }

    /// Writes one pixel. Out-of-range writes are ignored.
    pub fn set(&mut self, x: usize, y: usize, ink: bool) {
        if x < self.width && y < self.height {
            self.ink[y * self.width + x] = ink;
        }
    }

    #[must_use]
    pub fn ink_count(&self) -> usize {
        self.ink.iter().filter(|&&v| v).count()
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        !self.ink.iter().any(|&v| v)
    }

    /// Iterates the coordinates of every ink pixel in raster order.
    pub fn ink_pixels(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.ink
            .iter()
            .enumerate()
            .filter(|(_, v)| **v)
            .map(|(i, _)| (i % self.width, i / self.width))
    }

    /// Returns the maximal ink runs of row `y` as `(start, length)` pairs.
    #[must_use]
    pub fn row_runs(&self, y: usize) -> Vec<(usize, usize)> {
        let mut runs = Vec::new();
        if y >= self.height {
            return runs;
        }
        let mut start: Option<usize> = None;
        for x in 0..self.width {
            match (self.get(x, y), start) {
                (true, None) => start = Some(x),
                (false, Some(s)) => {
                    runs.push((s, x - s));
                    start = None;
                }
                _ => {}
            }
        }
        if let Some(s) = start {
            runs.push((s, self.width - s));
        }
        runs
    }

    /// Copies the pixels inside `rect` into a new mask of the rectangle's size.
    #[must_use]
    pub fn crop(&self, rect: &PixelRect) -> Self {
        Self::from_fn(rect.width(), rect.height(), |x, y| {
            self.get(rect.left + x, rect.top + y)
        })
    }

    /// Zeroes every pixel inside `rect`.
    pub fn clear_rect(&mut self, rect: &PixelRect) {
        if self.width == 0 || self.height == 0 {
            return;
        }
        let bottom = rect.bottom.min(self.height.saturating_sub(1));
        let right = rect.right.min(self.width.saturating_sub(1));
        for y in rect.top..=bottom {
            for x in rect.left..=right {
                self.ink[y * self.width + x] = false;
            }
        }
    }

    /// Returns a same-sized mask holding only the ink that falls inside one of `rects`.
    #[must_use]
    pub fn restricted_to(&self, rects: &[PixelRect]) -> Self {
        Self::from_fn(self.width, self.height, |x, y| {
            self.get(x, y) && rects.iter().any(|r| r.contains(x, y))
        })
    }

    /// Shrinks the mask by an integer factor. A reduced pixel is ink when any
    /// pixel of its block is ink, so thin strokes stay connected.
    #[must_use]
    pub fn downscale(&self, factor: usize) -> Self {
        let factor = factor.max(1);
        let width = self.width.div_ceil(factor).max(1);
        let height = self.height.div_ceil(factor).max(1);
        let mut reduced = Self::new(width, height);
        for (x, y) in self.ink_pixels() {
            reduced.ink[(y / factor) * width + x / factor] = true;
        }
        reduced
    }

    /// Shifts each row right in proportion to its height above `baseline`,
    /// widening the mask to fit. Rows at or below the baseline stay in place.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    pub fn sheared(&self, slope: f64, baseline: usize) -> Self {
        let shift_of = |y: usize| -> usize {
            let rise = baseline.saturating_sub(y) as f64;
            (rise * slope).round().max(0.0) as usize
        };
        let extra = shift_of(0);
        let mut out = Self::new(self.width + extra, self.height);
        for (x, y) in self.ink_pixels() {
            out.set(x + shift_of(y), y, true);
        }
        out
    }
}
