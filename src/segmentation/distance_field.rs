use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f64::consts::SQRT_2;

use tracing::debug;

use crate::raster::PixelMask;

/// Marker stored for pixels the flood fill never finalized.
pub const UNREACHED: f64 = -1.0;

/// 4-neighbours at unit cost, diagonals at sqrt(2).
const STEPS: [(isize, isize, f64); 8] = [
    (1, 0, 1.0),
    (-1, 0, 1.0),
    (0, 1, 1.0),
    (0, -1, 1.0),
    (1, 1, SQRT_2),
    (1, -1, SQRT_2),
    (-1, 1, SQRT_2),
    (-1, -1, SQRT_2),
];

/// Path distance from one source pixel to every ink pixel reachable from it
/// without leaving the ink.
#[derive(Debug, Clone)]
pub struct DistanceField {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

/// Heap entry ordered so the smallest distance pops first.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Frontier {
    distance: f64,
    index: usize,
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.index.cmp(&self.index))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl DistanceField {
    /// Floods `mask` outward from `source`.
    ///
    /// A pixel keeps the first distance it is finalized with; a queued
    /// provisional distance is replaced whenever a shorter one is found. At
    /// most `max_iterations` pixels are finalized; once the cap is hit the
    /// remaining pixels stay [`UNREACHED`]. A source outside the ink yields an
    /// entirely unreached field.
    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    pub fn flood(mask: &PixelMask, source: (usize, usize), max_iterations: usize) -> Self {
        let width = mask.width();
        let height = mask.height();
        let mut values = vec![UNREACHED; width * height];

        let (sx, sy) = source;
        if !mask.get(sx, sy) {
            return Self {
                width,
                height,
                values,
            };
        }

        let mut provisional = vec![f64::INFINITY; width * height];
        let mut finalized = vec![false; width * height];
        let mut heap = BinaryHeap::new();

        let start = sy * width + sx;
        provisional[start] = 0.0;
        heap.push(Frontier {
            distance: 0.0,
            index: start,
        });

        let mut iterations = 0;
        while let Some(Frontier { distance, index }) = heap.pop() {
            if finalized[index] {
                continue;
            }
            if iterations >= max_iterations {
                debug!(max_iterations, "flood fill truncated at iteration cap");
                break;
            }
            iterations += 1;
            finalized[index] = true;
            values[index] = distance;

            let x = (index % width) as isize;
            let y = (index / width) as isize;
            for &(dx, dy, cost) in &STEPS {
                let nx = x + dx;
                let ny = y + dy;
                if nx < 0 || ny < 0 {
                    continue;
                }
                let (nx, ny) = (nx as usize, ny as usize);
                if !mask.get(nx, ny) {
                    continue;
                }
                let neighbor = ny * width + nx;
                if finalized[neighbor] {
                    continue;
                }
                let candidate = distance + cost;
                if candidate < provisional[neighbor] {
                    provisional[neighbor] = candidate;
                    heap.push(Frontier {
                        distance: candidate,
                        index: neighbor,
                    });
                }
            }
        }

        Self {
            width,
            height,
            values,
        }
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Distance at `(x, y)`, or `None` if the pixel was never reached.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let value = self.values[y * self.width + x];
        (value >= 0.0).then_some(value)
    }

    #[must_use]
    pub fn reached_count(&self) -> usize {
        self.values.iter().filter(|&&v| v >= 0.0).count()
    }
}
